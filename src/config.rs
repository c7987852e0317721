use serde::{Deserialize, Serialize};

use crate::utils::constants::STORAGE_KEY_TOKEN;

/// Qué respuesta de `fetch_posts` gana cuando dos peticiones se solapan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StaleResponsePolicy {
    /// La última respuesta en resolverse sobrescribe `posts`, aunque sea de
    /// una petición más antigua (comportamiento histórico del cliente).
    #[default]
    LastResolvedWins,
    /// Solo se aplica la respuesta de la petición emitida más recientemente;
    /// las anteriores se descartan al resolverse.
    LatestIssuedWins,
}

impl StaleResponsePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last-resolved" | "last-resolved-wins" => Some(Self::LastResolvedWins),
            "latest-issued" | "latest-issued-wins" => Some(Self::LatestIssuedWins),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub token_storage_key: String,
    pub stale_response_policy: StaleResponsePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:8080".to_string(),
            backend_url_production: "https://api.example.com".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            token_storage_key: STORAGE_KEY_TOKEN.to_string(),
            stale_response_policy: StaleResponsePolicy::LastResolvedWins,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: option_env!("LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.token_storage_key),
            stale_response_policy: option_env!("STALE_RESPONSE_POLICY")
                .and_then(StaleResponsePolicy::parse)
                .unwrap_or(defaults.stale_response_policy),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    /// Nivel para wasm-logger; `None` si el logging está desactivado
    pub fn log_level(&self) -> Option<log::Level> {
        if !self.enable_logging {
            return None;
        }
        Some(self.log_level.parse().unwrap_or(log::Level::Info))
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
