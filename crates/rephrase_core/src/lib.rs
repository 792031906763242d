//! Rephrase core: pure session state machine and view-model helpers.
mod effect;
mod event;
mod msg;
mod state;
mod style;
mod update;
mod view_model;

pub use effect::Effect;
pub use event::StreamEvent;
pub use msg::Msg;
pub use state::{AppState, BackendHealth, SessionId, Status, ERROR_MARKER};
pub use style::{StyleDescriptor, StyleSet, StyleSetError};
pub use update::update;
pub use view_model::{AppViewModel, OutputBoxView};
