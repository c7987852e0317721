// ============================================================================
// MICROBLOG PWA - CAPA DE ESTADO DEL CLIENTE (RUST + WASM)
// ============================================================================
// - Stores: SessionStore (token, nickname) y ContentStore (posts, borrador)
// - Services: SOLO comunicación API (trait ApiGateway + cliente gloo-net)
// - State: Rc<RefCell> + subscribers, contexto de app explícito
// - Models: Estructuras compartidas con backend
// - App: fachada wasm-bindgen para la capa de vistas
// ============================================================================

mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;

pub use crate::app::App;
pub use crate::state::{AppContext, SessionPhase};
pub use crate::stores::{ContentStore, SessionStore};

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    if let Some(level) = CONFIG.log_level() {
        wasm_logger::init(wasm_logger::Config::new(level));
    }
    log::info!("🚀 Microblog PWA - Rust + WASM ({})", CONFIG.environment);

    Ok(())
}
