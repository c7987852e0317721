// ============================================================================
// APP STATE - Contexto de la aplicación (stores construidos una sola vez)
// ============================================================================
// Se crea al arrancar y se pasa explícitamente a quien lo necesite.
// Cada test construye el suyo, aislado.
// ============================================================================

use std::rc::Rc;

use serde::Serialize;

use crate::config::{AppConfig, StaleResponsePolicy};
use crate::services::{ApiClient, ApiGateway};
use crate::stores::{ContentStore, SessionStore};
use crate::utils::storage::{BrowserStorage, KeyValueStore};

/// Fase del ciclo de vida de la sesión, derivada de ambos stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    LoggedOut,
    Authenticating,
    LoggedIn,
    LoggingOut,
}

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub content: ContentStore,
}

impl AppContext {
    pub fn new(
        api: Rc<dyn ApiGateway>,
        storage: Rc<dyn KeyValueStore>,
        token_key: &str,
        policy: StaleResponsePolicy,
    ) -> Self {
        let session = SessionStore::new(api.clone(), storage, token_key);
        let content = ContentStore::new(session.clone(), api, policy);
        Self { session, content }
    }

    /// Contexto real del navegador: gloo-net + localStorage
    pub fn browser(config: &AppConfig) -> Self {
        log::info!("🔧 [APP] Backend: {} ({})", config.backend_url(), config.environment);
        Self::new(
            Rc::new(ApiClient::new(config.backend_url())),
            Rc::new(BrowserStorage),
            &config.token_storage_key,
            config.stale_response_policy,
        )
    }

    /// Arranque: hidrata la sesión desde storage
    pub async fn start(&self) {
        self.session.initialize().await;
    }

    pub fn phase(&self) -> SessionPhase {
        let session = self.session.snapshot();
        let content = self.content.snapshot();
        match (session.is_authenticated(), session.is_loading, content.is_logging_out) {
            (true, _, true) => SessionPhase::LoggingOut,
            (true, _, false) => SessionPhase::LoggedIn,
            (false, true, _) => SessionPhase::Authenticating,
            (false, false, _) => SessionPhase::LoggedOut,
        }
    }
}
