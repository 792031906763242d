//! Best-effort clipboard for the output boxes.
//!
//! Tries the OSC 52 escape sequence first (works over SSH), then the system
//! clipboard through `arboard`. Callers ignore failures.

use std::io::Write;

use base64::Engine;
use thiserror::Error;

#[derive(Default)]
pub struct Clipboard {
    /// Kept alive so X11/Wayland selections survive after `copy` returns.
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if copy_osc52(text).is_ok() {
            // Also set the system clipboard when one is available; OSC 52 is
            // silently ignored by some terminals.
            let _ = self.copy_system(text);
            return Ok(());
        }
        self.copy_system(text)
    }

    fn copy_system(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.system.is_none() {
            self.system =
                Some(arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?);
        }
        match self.system.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::System(e.to_string())),
            None => Err(ClipboardError::System("clipboard unavailable".to_string())),
        }
    }
}

fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b]52;c;{}\x1b\\", encoded).map_err(|e| ClipboardError::Osc52(e.to_string()))?;
    stdout.flush().map_err(|e| ClipboardError::Osc52(e.to_string()))
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("OSC 52 clipboard failed: {0}")]
    Osc52(String),
    #[error("system clipboard failed: {0}")]
    System(String),
}
