// ============================================================================
// ERRORES - Taxonomía de fallos del gateway y del storage
// ============================================================================
// Los stores nunca propagan estos errores a la UI: los convierten en
// `last_error` + bool. Aquí solo vive la clasificación.
// ============================================================================

use thiserror::Error;

/// Fallo de una operación remota (o validación local previa a la red)
/// `Storage` cubre lo que falla después de una respuesta correcta.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Detectado localmente, no se hizo ninguna llamada de red
    #[error("validation error: {0}")]
    Validation(String),

    /// El servidor rechazó el token (401)
    #[error("unauthorized: {}", .message.as_deref().unwrap_or("token rejected"))]
    Unauthorized { message: Option<String> },

    /// Red inalcanzable o respuesta mal formada
    #[error("request error: {0}")]
    Request(String),

    /// El servidor entendió la petición pero se negó a cumplirla
    #[error("server error (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// La respuesta llegó bien pero no se pudo persistir localmente
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Clasifica una respuesta HTTP no exitosa
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            401 => ApiError::Unauthorized { message },
            _ => ApiError::Server { status, message },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Mensaje para `last_error`: el del servidor si existe, si no el genérico.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::Unauthorized { message: Some(message) }
            | ApiError::Server { message: Some(message), .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Fallo del almacenamiento persistente (localStorage)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("persistent storage is not available")]
    Unavailable,

    #[error("failed to write key `{key}`")]
    Write { key: String },

    #[error("failed to remove key `{key}`")]
    Remove { key: String },
}
