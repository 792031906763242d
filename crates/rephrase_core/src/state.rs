use std::fmt;

use crate::view_model::{AppViewModel, OutputBoxView};
use crate::StyleSet;

/// Prefix appended to a style's output when the backend reports an error for it.
pub const ERROR_MARKER: &str = "[ERROR]";

/// Opaque identifier the backend issues for one submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    styles: StyleSet,
    input: String,
    status: Status,
    /// At most one session; `None` while idle or while job creation is in flight.
    session: Option<SessionId>,
    /// One buffer per style, indexed like `styles`.
    outputs: Vec<String>,
    health: BackendHealth,
    quit: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_styles(StyleSet::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(styles: StyleSet) -> Self {
        let outputs = vec![String::new(); styles.len()];
        Self {
            styles,
            input: String::new(),
            status: Status::Idle,
            session: None,
            outputs,
            health: BackendHealth::Unknown,
            quit: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let processing = self.status == Status::Processing;
        let outputs = self
            .styles
            .iter()
            .zip(&self.outputs)
            .map(|(style, text)| OutputBoxView {
                key: style.key.clone(),
                label: style.label.clone(),
                text: text.clone(),
            })
            .collect();

        AppViewModel {
            status: self.status,
            input: self.input.clone(),
            input_enabled: !processing,
            char_count: self.input.chars().count(),
            can_cancel: self.session.is_some(),
            submit_label: if processing { "Processing…" } else { "Process" },
            status_label: if processing { "Streaming…" } else { "Idle" },
            health: self.health,
            outputs,
            dirty: self.dirty,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self, style: &str) -> Option<&str> {
        self.styles
            .position(style)
            .map(|idx| self.outputs[idx].as_str())
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Returns whether a re-render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_job(&mut self) {
        self.clear_outputs();
        self.status = Status::Processing;
        self.session = None;
        self.mark_dirty();
    }

    /// True while a job request is in flight and no session has been issued yet.
    pub fn job_pending(&self) -> bool {
        self.status == Status::Processing && self.session.is_none()
    }

    pub(crate) fn attach_session(&mut self, session_id: SessionId) {
        self.session = Some(session_id);
        self.mark_dirty();
    }

    pub(crate) fn is_active_session(&self, session_id: &SessionId) -> bool {
        self.session.as_ref() == Some(session_id)
    }

    /// Drops the session (if any) and returns to idle.
    pub(crate) fn finish(&mut self) -> Option<SessionId> {
        self.status = Status::Idle;
        self.mark_dirty();
        self.session.take()
    }

    /// Appends to a style's buffer. Unknown keys are ignored.
    pub(crate) fn append_output(&mut self, style: &str, text: &str) -> bool {
        let Some(idx) = self.styles.position(style) else {
            return false;
        };
        self.outputs[idx].push_str(text);
        self.mark_dirty();
        true
    }

    pub(crate) fn clear_outputs(&mut self) {
        for output in &mut self.outputs {
            output.clear();
        }
        self.mark_dirty();
    }

    pub(crate) fn clear_output(&mut self, style: &str) {
        if let Some(idx) = self.styles.position(style) {
            self.outputs[idx].clear();
            self.mark_dirty();
        }
    }

    pub(crate) fn set_health(&mut self, health: BackendHealth) {
        if self.health != health {
            self.health = health;
            self.mark_dirty();
        }
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit = true;
        self.mark_dirty();
    }
}
