/// A decoded message from a session's event stream.
///
/// Payloads that match none of these shapes never reach the core; the
/// engine drops them while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Backend finished all styles.
    Done,
    /// Backend acknowledged a cancellation.
    Cancelled,
    /// One style failed; the others keep streaming.
    StyleError { style: String, message: String },
    /// Next fragment of rephrased text for one style.
    Delta { style: String, delta: String },
}
