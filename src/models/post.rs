use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// POST - Publicación tal como la devuelve el backend
// ============================================================================

/// Publicación inmutable. `id` y `created_at` los asigna el servidor:
/// el cliente nunca construye un `Post` por su cuenta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Cuerpo de POST /posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}
