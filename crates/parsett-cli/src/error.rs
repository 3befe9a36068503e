use thiserror::Error;

/// Errors surfaced by the command adapters.
///
/// The usage variants display exactly as the message carried in the JSON
/// error envelope.
#[derive(Debug, Error)]
pub enum CliError {
    /// The single-title command was run without a title.
    #[error("No title provided")]
    NoTitle,

    /// The batch command was run without any title.
    #[error("No titles provided")]
    NoTitles,

    #[error("failed to encode JSON output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
