use rephrase_core::{Effect, Msg, SessionId, StreamEvent};
use rephrase_engine::{EngineEvent, EngineHandle, WireEvent};
use rephrase_logging::{rephrase_debug, rephrase_info, rephrase_warn};

use super::clipboard::Clipboard;

/// Executes effects from `update` and turns engine results back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Clipboard,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            clipboard: Clipboard::default(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob { text } => {
                    rephrase_info!("StartJob text_len={}", text.chars().count());
                    self.engine.start_job(text);
                }
                Effect::OpenStream { session_id } => {
                    rephrase_info!("OpenStream session={}", session_id);
                    self.engine.open_stream(session_id.as_str());
                }
                Effect::CloseStream { session_id } => {
                    rephrase_debug!("CloseStream session={}", session_id);
                    self.engine.close_stream(session_id.as_str());
                }
                Effect::CancelJob { session_id } => {
                    rephrase_info!("CancelJob session={}", session_id);
                    self.engine.cancel_job(session_id.as_str());
                }
                Effect::CopyToClipboard { text } => {
                    if let Err(err) = self.clipboard.copy(&text) {
                        rephrase_debug!("Copy to clipboard failed: {}", err);
                    }
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }

    /// Drains everything the engine reported since the last call, in order.
    pub fn poll_messages(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_engine_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }
}

fn map_engine_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::JobStarted { session_id } => {
            rephrase_info!("Job started session={}", session_id);
            Some(Msg::JobStarted {
                session_id: SessionId::new(session_id),
            })
        }
        EngineEvent::JobStartFailed { error } => {
            rephrase_warn!("Processing error: {}", error);
            Some(Msg::JobStartFailed {
                reason: error.to_string(),
            })
        }
        EngineEvent::Stream { session_id, event } => Some(Msg::Stream {
            session_id: SessionId::new(session_id),
            event: map_event(event),
        }),
        EngineEvent::StreamFailed { session_id, error } => {
            rephrase_warn!("Stream connection error session={}: {}", session_id, error);
            Some(Msg::StreamFailed {
                session_id: SessionId::new(session_id),
                reason: error.to_string(),
            })
        }
        EngineEvent::CancelCompleted { session_id, result } => {
            match result {
                Ok(ack) => rephrase_debug!(
                    "Cancel acknowledged session={} status={}",
                    session_id,
                    ack.status.as_deref().unwrap_or("-")
                ),
                Err(err) => rephrase_warn!("Cancel error session={}: {}", session_id, err),
            }
            None
        }
        EngineEvent::Health { reachable } => {
            if !reachable {
                rephrase_warn!("Backend health check failed");
            }
            Some(Msg::BackendHealth { reachable })
        }
    }
}

fn map_event(event: WireEvent) -> StreamEvent {
    match event {
        WireEvent::Done => StreamEvent::Done,
        WireEvent::Cancelled => StreamEvent::Cancelled,
        WireEvent::StyleError { style, message } => StreamEvent::StyleError { style, message },
        WireEvent::Delta { style, delta } => StreamEvent::Delta { style, delta },
    }
}
