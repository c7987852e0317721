// ============================================================================
// SESSION STORE - Estado de autenticación (token + nickname)
// ============================================================================
// Único componente que lee/escribe la entrada del token en localStorage.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::error::ApiError;
use crate::services::ApiGateway;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::constants::{MSG_LOGIN_FAILED, MSG_TOKEN_NOT_PERSISTED};
use crate::utils::storage::KeyValueStore;

/// Estado de sesión. `is_authenticated()` se deriva del token, no se guarda.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub token: Option<String>,
    /// Solo se conoce tras un `fetch_profile` exitoso
    pub nickname: Option<String>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    state: ReactiveState<SessionState>,
    api: Rc<dyn ApiGateway>,
    storage: Rc<dyn KeyValueStore>,
    token_key: Rc<str>,
    initialized: Rc<Cell<bool>>,
}

impl SessionStore {
    pub fn new(api: Rc<dyn ApiGateway>, storage: Rc<dyn KeyValueStore>, token_key: &str) -> Self {
        Self {
            state: ReactiveState::new(SessionState::default()),
            api,
            storage,
            token_key: Rc::from(token_key),
            initialized: Rc::new(Cell::new(false)),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    /// Token actual. ContentStore lo vuelve a leer antes de cada llamada.
    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    /// Hidratar desde localStorage. Solo la primera llamada tiene efecto.
    pub async fn initialize(&self) {
        if self.initialized.replace(true) {
            log::warn!("⚠️ [SESSION] initialize() ya se ejecutó, se ignora");
            return;
        }
        let Some(saved_token) = self.storage.get(&self.token_key) else {
            log::info!("ℹ️ [SESSION] No hay token guardado");
            return;
        };
        log::info!("🔑 [SESSION] Token restaurado desde storage");
        // El token solo no dice quién es el usuario
        self.state.update(|s| {
            s.token = Some(saved_token.clone());
            s.is_loading = true;
        });
        self.load_profile(saved_token).await;
    }

    /// Devuelve `true` si y solo si se obtuvo y persistió un token.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        self.state.update(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        let token = match self.obtain_token(username, password).await {
            Ok(token) => token,
            Err(err) => {
                let message = match &err {
                    ApiError::Storage(_) => MSG_TOKEN_NOT_PERSISTED.to_string(),
                    other => other.user_message(MSG_LOGIN_FAILED),
                };
                self.state.update(|s| {
                    s.is_loading = false;
                    s.last_error = Some(message);
                });
                return false;
            }
        };
        log::info!("✅ [SESSION] Login correcto: {}", username);

        // is_loading sigue activo hasta que llegue el perfil
        self.state.update(|s| s.token = Some(token.clone()));
        self.load_profile(token).await;
        true
    }

    async fn obtain_token(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let token = self.api.login(username, password).await.map_err(|err| {
            log::error!("❌ [SESSION] Login fallido para {}: {}", username, err);
            err
        })?;

        self.storage.set(&self.token_key, &token).map_err(|err| {
            log::error!("❌ [SESSION] No se pudo guardar el token: {}", err);
            ApiError::from(err)
        })?;
        Ok(token)
    }

    /// Best-effort: solo un 401 cambia el estado de autenticación.
    pub async fn fetch_profile(&self) {
        let Some(token) = self.token() else {
            return;
        };
        self.state.update(|s| s.is_loading = true);
        self.load_profile(token).await;
    }

    /// Pide el perfil de `token` y aplica el resultado en una sola escritura.
    /// Quien llama ya puso `is_loading`.
    async fn load_profile(&self, token: String) {
        let result = self.api.fetch_profile(&token).await;

        // Si el token cambió mientras esperábamos, la respuesta ya no aplica
        let still_current = self.token().as_deref() == Some(token.as_str());
        match result {
            Ok(nickname) if still_current => {
                log::info!("👤 [SESSION] Perfil: {}", nickname);
                self.state.update(|s| {
                    s.nickname = Some(nickname);
                    s.is_loading = false;
                });
            }
            Err(err) if err.is_unauthorized() && still_current => {
                log::warn!("🚫 [SESSION] Token rechazado por el servidor, cerrando sesión");
                self.remove_saved_token();
                self.state.update(|s| {
                    clear_session(s);
                    s.is_loading = false;
                });
            }
            Ok(_) => {
                log::warn!("⚠️ [SESSION] Perfil descartado: el token cambió durante la petición");
                self.state.update(|s| s.is_loading = false);
            }
            Err(err) => {
                log::error!("❌ [SESSION] Error obteniendo perfil: {}", err);
                self.state.update(|s| s.is_loading = false);
            }
        }
    }

    /// Logout local: síncrono, siempre funciona, no llama al servidor.
    pub fn logout(&self) {
        // Storage primero: los subscribers ya no deben encontrar el token
        self.remove_saved_token();
        self.state.update(clear_session);
        log::info!("👋 [SESSION] Sesión local limpiada");
    }

    fn remove_saved_token(&self) {
        if let Err(err) = self.storage.remove(&self.token_key) {
            log::warn!("⚠️ [SESSION] Error eliminando token de storage: {}", err);
        }
    }
}

fn clear_session(s: &mut SessionState) {
    s.token = None;
    s.nickname = None;
    s.last_error = None;
}
