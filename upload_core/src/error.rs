/// A JSON decode failure at the Dispatcher. Always non-fatal — every call
/// site logs it and moves on, never lets it escape further. An unrecognized
/// `message_type` is handled by the Dispatcher itself (logged, `Ok(())`
/// returned) rather than surfaced here, since it isn't a decode problem.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode {message_type} payload: {source}")]
pub struct DispatchError {
    pub message_type: String,
    #[source]
    pub source: serde_json::Error,
}
