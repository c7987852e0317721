// ============================================================================
// STATE MODULE - Reactividad (Rc<RefCell> + subscribers) y contexto de app
// ============================================================================

pub mod reactivity;
pub mod app_state;

pub use reactivity::{ReactiveState, SubscriptionId};
pub use app_state::{AppContext, SessionPhase};
