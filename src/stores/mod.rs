// ============================================================================
// STORES - Sesión y contenido, instancias explícitas (sin singletons)
// ============================================================================

pub mod session_store;
pub mod content_store;

pub use session_store::{SessionState, SessionStore};
pub use content_store::{ContentState, ContentStore};
