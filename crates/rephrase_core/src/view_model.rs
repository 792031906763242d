use crate::{BackendHealth, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub status: Status,
    pub input: String,
    pub input_enabled: bool,
    pub char_count: usize,
    pub can_cancel: bool,
    pub submit_label: &'static str,
    pub status_label: &'static str,
    pub health: BackendHealth,
    pub outputs: Vec<OutputBoxView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBoxView {
    pub key: String,
    pub label: String,
    pub text: String,
}
