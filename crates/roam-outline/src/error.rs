//! Outline decoding errors.

/// Error decoding an outline payload.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    /// Payload is not valid JSON or does not have the shape of a node list.
    #[error("Invalid outline JSON: {0}")]
    Json(#[from] serde_json::Error),
}
