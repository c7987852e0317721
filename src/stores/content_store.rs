// ============================================================================
// CONTENT STORE - Posts + borrador en curso
// ============================================================================
// Depende de SessionStore solo para leer el token/autenticación y para el
// logout compuesto. Nunca escribe campos de la sesión.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::StaleResponsePolicy;
use crate::error::ApiError;
use crate::models::Post;
use crate::services::ApiGateway;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::stores::session_store::SessionStore;
use crate::utils::constants::{
    MSG_CREATE_POST_FAILED, MSG_EMPTY_POST, MSG_FETCH_POSTS_FAILED, MSG_NOT_LOGGED_IN,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentState {
    /// Más recientes primero, en el orden del servidor
    pub posts: Vec<Post>,
    pub draft_content: String,
    pub is_loading: bool,
    pub is_submitting: bool,
    /// Logout remoto en vuelo
    pub is_logging_out: bool,
    pub last_error: Option<String>,
}

impl ContentState {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[derive(Clone)]
pub struct ContentStore {
    state: ReactiveState<ContentState>,
    session: SessionStore,
    api: Rc<dyn ApiGateway>,
    policy: StaleResponsePolicy,
    // Contador de peticiones de `fetch_posts` emitidas
    list_generation: Rc<Cell<u64>>,
}

impl ContentStore {
    pub fn new(session: SessionStore, api: Rc<dyn ApiGateway>, policy: StaleResponsePolicy) -> Self {
        Self {
            state: ReactiveState::new(ContentState::default()),
            session,
            api,
            policy,
            list_generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn snapshot(&self) -> ContentState {
        self.state.snapshot()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn set_draft_content(&self, content: impl Into<String>) {
        let content = content.into();
        self.state.update(|s| s.draft_content = content);
    }

    /// Autenticado, borrador no vacío y ningún create en vuelo
    pub fn can_create_post(&self) -> bool {
        let ready = self
            .state
            .with(|s| !s.draft_content.trim().is_empty() && !s.is_submitting);
        ready && self.session.is_authenticated()
    }

    /// Refresco completo de `posts`. Sin cancelación: con
    /// `LastResolvedWins` la última respuesta en llegar sobrescribe.
    pub async fn fetch_posts(&self) {
        let generation = self.list_generation.get() + 1;
        self.list_generation.set(generation);
        self.state.update(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        // El token pudo cambiar desde la construcción del store
        let token = self.session.token();
        let result = self.api.list_posts(token.as_deref()).await;

        if self.policy == StaleResponsePolicy::LatestIssuedWins
            && generation != self.list_generation.get()
        {
            log::info!(
                "⏭️ [CONTENT] Respuesta de posts #{} descartada (última emitida: #{})",
                generation,
                self.list_generation.get()
            );
            return;
        }

        match result {
            Ok(posts) => {
                log::info!("📋 [CONTENT] {} posts cargados (petición #{})", posts.len(), generation);
                self.state.update(|s| {
                    s.posts = posts;
                    s.is_loading = false;
                });
            }
            Err(err) => {
                log::error!("❌ [CONTENT] Error cargando posts: {}", err);
                self.state.update(|s| {
                    s.last_error = Some(err.user_message(MSG_FETCH_POSTS_FAILED));
                    s.is_loading = false;
                });
            }
        }
    }

    /// Publica el borrador. Solo un `Post` confirmado por el servidor entra
    /// en `posts`; si falla, el borrador se conserva.
    pub async fn create_post(&self) -> bool {
        let content = self.state.with(|s| s.draft_content.trim().to_string());

        let token = match self.validate_create(&content) {
            Ok(token) => token,
            Err(err) => {
                log::warn!("⚠️ [CONTENT] Post rechazado localmente: {}", err);
                self.state.update(|s| s.last_error = Some(err.user_message(MSG_CREATE_POST_FAILED)));
                return false;
            }
        };

        self.state.update(|s| {
            s.is_submitting = true;
            s.last_error = None;
        });

        match self.api.create_post(&token, &content).await {
            Ok(post) => {
                log::info!("✅ [CONTENT] Post {} publicado", post.id);
                self.state.update(|s| {
                    s.posts.insert(0, post);
                    s.draft_content.clear();
                    s.is_submitting = false;
                });
                true
            }
            Err(err) => {
                log::error!("❌ [CONTENT] Error publicando post: {}", err);
                self.state.update(|s| {
                    s.last_error = Some(err.user_message(MSG_CREATE_POST_FAILED));
                    s.is_submitting = false;
                });
                false
            }
        }
    }

    fn validate_create(&self, trimmed: &str) -> Result<String, ApiError> {
        if trimmed.is_empty() {
            return Err(ApiError::Validation(MSG_EMPTY_POST.to_string()));
        }
        self.session
            .token()
            .ok_or_else(|| ApiError::Validation(MSG_NOT_LOGGED_IN.to_string()))
    }

    /// Logout compuesto: logout remoto best-effort y después, pase lo que
    /// pase, limpieza local de ambos stores.
    pub async fn logout(&self) {
        if let Some(token) = self.session.token() {
            self.state.update(|s| s.is_logging_out = true);
            match self.api.logout(&token).await {
                Ok(()) => log::info!("✅ [CONTENT] Logout remoto completado"),
                Err(err) => log::warn!("⚠️ [CONTENT] Logout remoto fallido, se continúa: {}", err),
            }
        }

        self.session.logout();
        self.state.update(|s| {
            s.posts.clear();
            s.draft_content.clear();
            s.last_error = None;
            s.is_logging_out = false;
        });
    }
}
