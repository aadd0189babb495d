// Error types for the enhancement pipeline

use thiserror::Error;

/// Failures of a single enhancement call. Each variant is a terminal outcome
/// for the request; nothing in the pipeline retries.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// The uploaded bytes could not be decoded as an image.
    #[error("cannot decode input image")]
    Decode(#[source] image::ImageError),

    /// The external tool was available but its invocation failed: non-zero
    /// exit (message carries the captured stderr), missing output file
    /// ("output not found"), undecodable output ("unreadable result"), or
    /// an expired bounded wait ("timeout").
    #[error("external enhancer failed: {0}")]
    ExternalTool(String),

    /// The enhanced image could not be encoded to PNG.
    #[error("cannot encode enhanced image")]
    Encode(#[source] image::ImageError),

    /// A blocking image task panicked or was cancelled.
    #[error("enhancement task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
