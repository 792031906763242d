//! Rephrase engine: backend calls, event-stream subscription and effect execution.
mod api;
mod engine;
mod settings;
mod stream;
mod types;
mod wire;

pub use api::{RephraseApi, ReqwestApi};
pub use engine::EngineHandle;
pub use settings::{ClientSettings, DEFAULT_API_BASE};
pub use stream::WireEventStream;
pub use types::{ApiError, EngineEvent};
pub use wire::{decode_event, CancelAck, JobCreated, WireEvent};
