use crate::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartJob { text: String },
    OpenStream { session_id: SessionId },
    CloseStream { session_id: SessionId },
    CancelJob { session_id: SessionId },
    CopyToClipboard { text: String },
    CheckHealth,
}
