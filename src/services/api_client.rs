// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio ni guarda el token: los stores lo pasan en cada
// llamada autenticada.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    CreatePostRequest, ErrorResponse, LoginRequest, LoginResponse, LogoutResponse, Post,
    UserInfoResponse,
};
use crate::utils::constants::MSG_NO_TOKEN;

/// Las cinco operaciones remotas que consumen los stores.
///
/// Los futures no son `Send`: en el navegador todo corre en un único hilo
/// cooperativo (`spawn_local`).
#[async_trait(?Send)]
pub trait ApiGateway {
    /// Devuelve el token de sesión (string opaco)
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    /// Devuelve el nickname del usuario dueño del token
    async fn fetch_profile(&self, token: &str) -> Result<String, ApiError>;

    /// Lista de posts, más recientes primero
    async fn list_posts(&self, token: Option<&str>) -> Result<Vec<Post>, ApiError>;

    async fn create_post(&self, token: &str, content: &str) -> Result<Post, ApiError>;

    async fn logout(&self, token: &str) -> Result<(), ApiError>;
}

/// Cliente API sobre gloo-net
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn with_bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

async fn send(request: Request) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Request(format!("Network error: {}", e)))
}

/// Convierte la respuesta en `T`, o clasifica el error leyendo `{"error": ...}`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error);
        return Err(ApiError::from_status(status, message));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Request(format!("Parse error: {}", e)))
}

#[async_trait(?Send)]
impl ApiGateway for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        log::info!("🔐 [API] Login para usuario: {}", username);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = Request::post(&self.url("/user/login"))
            .json(&body)
            .map_err(|e| ApiError::Request(format!("Serialization error: {}", e)))?;

        let response: LoginResponse = read_json(send(request).await?).await?;
        response
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Server {
                status: 200,
                message: Some(MSG_NO_TOKEN.to_string()),
            })
    }

    async fn fetch_profile(&self, token: &str) -> Result<String, ApiError> {
        let request = with_bearer(Request::get(&self.url("/user/info")), token)
            .build()
            .map_err(|e| ApiError::Request(format!("Request build error: {}", e)))?;

        let info: UserInfoResponse = read_json(send(request).await?).await?;
        info.nick_name
            .ok_or_else(|| ApiError::Request("Parse error: missing nick_name".to_string()))
    }

    async fn list_posts(&self, token: Option<&str>) -> Result<Vec<Post>, ApiError> {
        let mut builder = Request::get(&self.url("/posts"));
        if let Some(token) = token {
            builder = with_bearer(builder, token);
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::Request(format!("Request build error: {}", e)))?;

        // El backend serializa una lista vacía como `null`
        let posts: Option<Vec<Post>> = read_json(send(request).await?).await?;
        let posts = posts.unwrap_or_default();
        log::info!("📋 [API] {} posts recibidos", posts.len());
        Ok(posts)
    }

    async fn create_post(&self, token: &str, content: &str) -> Result<Post, ApiError> {
        let body = CreatePostRequest {
            content: content.to_string(),
        };
        let request = with_bearer(Request::post(&self.url("/posts")), token)
            .json(&body)
            .map_err(|e| ApiError::Request(format!("Serialization error: {}", e)))?;

        let post: Post = read_json(send(request).await?).await?;
        log::info!("✅ [API] Post creado: {}", post.id);
        Ok(post)
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let request = with_bearer(Request::post(&self.url("/user/logout")), token)
            .build()
            .map_err(|e| ApiError::Request(format!("Request build error: {}", e)))?;

        let ack: LogoutResponse = read_json(send(request).await?).await?;
        log::info!("👋 [API] Logout: {}", ack.message.unwrap_or_default());
        Ok(())
    }
}
