pub const APP_TITLE: &str = "AI Writing Assistant";
pub const APP_SUBTITLE: &str = "Rephrase text into multiple tones. Streamed output, cancel anytime.";
pub const INPUT_PLACEHOLDER: &str = "Type something to rephrase.";
pub const KEY_HINTS: &str =
    "Ctrl+R process · Ctrl+X cancel · Ctrl+L clear styles · Ctrl+U clear input · Tab focus · c copy · d clear · Esc quit";

pub const INPUT_HEIGHT: u16 = 6;
pub const OUTPUT_COLUMNS: usize = 2;
