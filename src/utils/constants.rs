
/// Clave de localStorage donde vive el token de sesión
pub const STORAGE_KEY_TOKEN: &str = "token";

// Mensajes genéricos cuando el servidor no manda `error`
pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_NO_TOKEN: &str = "No token received from server";
pub const MSG_TOKEN_NOT_PERSISTED: &str = "Could not save the session token";
pub const MSG_FETCH_POSTS_FAILED: &str = "Failed to fetch posts";
pub const MSG_CREATE_POST_FAILED: &str = "Failed to create post";
pub const MSG_EMPTY_POST: &str = "Post content cannot be empty";
pub const MSG_NOT_LOGGED_IN: &str = "You must be logged in to create a post";
