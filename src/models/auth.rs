use serde::{Deserialize, Serialize};

// ============================================================================
// AUTH - Modelos compartidos con el backend (/user/*)
// ============================================================================

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Respuesta de POST /user/login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Respuesta de GET /user/info
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UserInfoResponse {
    #[serde(default)]
    pub nick_name: Option<String>,
}

/// Respuesta de POST /user/logout (solo acuse de recibo)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Cuerpo de error del backend: `{"error": "..."}`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}
