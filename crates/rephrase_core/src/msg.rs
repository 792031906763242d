use crate::{SessionId, StreamEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input box.
    InputChanged(String),
    /// User clicked Process.
    SubmitClicked,
    /// Backend accepted the job and issued a session.
    JobStarted { session_id: SessionId },
    /// Job creation failed (transport or non-success status).
    JobStartFailed { reason: String },
    /// One event from the session's stream, in transport order.
    Stream {
        session_id: SessionId,
        event: StreamEvent,
    },
    /// The stream broke or ended without a terminal event.
    StreamFailed {
        session_id: SessionId,
        reason: String,
    },
    /// User clicked Cancel Processing.
    CancelClicked,
    /// User clicked Clear All Styles.
    ClearAllOutputs,
    /// User clicked Clear Input.
    ClearInput,
    /// User clicked Clear on one output box.
    ClearOutput { style: String },
    /// User clicked Copy on one output box.
    CopyOutput { style: String },
    /// Result of the startup health probe.
    BackendHealth { reachable: bool },
    /// User asked to leave the application.
    QuitRequested,
    /// UI tick to coalesce rendering.
    Tick,
    /// Fallback for unmapped input.
    NoOp,
}
