// ============================================================================
// APP - Fachada WASM que ve la capa de vistas (JavaScript)
// ============================================================================
// Sin lógica: cada método delega en un store. Las vistas leen snapshots JSON
// y se suscriben para re-renderizar.
// ============================================================================

use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::config::CONFIG;
use crate::state::{AppContext, SessionPhase, SubscriptionId};
use crate::stores::{ContentState, SessionState};

#[derive(Serialize)]
struct SessionView<'a> {
    #[serde(flatten)]
    state: &'a SessionState,
    is_authenticated: bool,
    phase: SessionPhase,
}

#[derive(Serialize)]
struct ContentView<'a> {
    #[serde(flatten)]
    state: &'a ContentState,
    can_create_post: bool,
    is_empty: bool,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Error serializando: {}", e)))
}

/// Adapta un callback JS a subscriber de store
fn js_subscriber(callback: Function) -> impl Fn() + 'static {
    move || {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("❌ [APP] Subscriber JS falló: {:?}", e);
        }
    }
}

/// Aplicación principal
#[wasm_bindgen]
pub struct App {
    context: AppContext,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl App {
    /// Crea los stores e hidrata la sesión guardada en segundo plano
    #[wasm_bindgen(constructor)]
    pub fn new() -> App {
        let context = AppContext::browser(&CONFIG);
        let starting = context.clone();
        spawn_local(async move { starting.start().await });
        App { context }
    }

    /// Resuelve a `true` si el login obtuvo y guardó un token
    pub fn login(&self, username: String, password: String) -> Promise {
        let session = self.context.session.clone();
        future_to_promise(async move {
            let ok = session.login(&username, &password).await;
            Ok(JsValue::from_bool(ok))
        })
    }

    /// Logout compuesto (remoto best-effort + limpieza local)
    pub fn logout(&self) -> Promise {
        let content = self.context.content.clone();
        future_to_promise(async move {
            content.logout().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = fetchPosts)]
    pub fn fetch_posts(&self) -> Promise {
        let content = self.context.content.clone();
        future_to_promise(async move {
            content.fetch_posts().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = createPost)]
    pub fn create_post(&self) -> Promise {
        let content = self.context.content.clone();
        future_to_promise(async move { Ok(JsValue::from_bool(content.create_post().await)) })
    }

    #[wasm_bindgen(js_name = setDraftContent)]
    pub fn set_draft_content(&self, content: String) {
        self.context.content.set_draft_content(content);
    }

    #[wasm_bindgen(js_name = canCreatePost)]
    pub fn can_create_post(&self) -> bool {
        self.context.content.can_create_post()
    }

    #[wasm_bindgen(js_name = sessionSnapshot)]
    pub fn session_snapshot(&self) -> Result<String, JsValue> {
        let state = self.context.session.snapshot();
        to_json(&SessionView {
            is_authenticated: state.is_authenticated(),
            phase: self.context.phase(),
            state: &state,
        })
    }

    #[wasm_bindgen(js_name = contentSnapshot)]
    pub fn content_snapshot(&self) -> Result<String, JsValue> {
        let state = self.context.content.snapshot();
        to_json(&ContentView {
            can_create_post: self.context.content.can_create_post(),
            is_empty: state.is_empty(),
            state: &state,
        })
    }

    #[wasm_bindgen(js_name = subscribeSession)]
    pub fn subscribe_session(&self, callback: Function) -> u32 {
        self.context.session.subscribe(js_subscriber(callback)).0
    }

    #[wasm_bindgen(js_name = unsubscribeSession)]
    pub fn unsubscribe_session(&self, id: u32) -> bool {
        self.context.session.unsubscribe(SubscriptionId(id))
    }

    #[wasm_bindgen(js_name = subscribeContent)]
    pub fn subscribe_content(&self, callback: Function) -> u32 {
        self.context.content.subscribe(js_subscriber(callback)).0
    }

    #[wasm_bindgen(js_name = unsubscribeContent)]
    pub fn unsubscribe_content(&self, id: u32) -> bool {
        self.context.content.unsubscribe(SubscriptionId(id))
    }
}
