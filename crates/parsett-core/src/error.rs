use thiserror::Error;

/// Errors that can occur while parsing a release title.
#[derive(Debug, Error)]
pub enum ParsettError {
    /// The input string is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// No title text was left once the metadata tokens were removed.
    #[error("failed to extract a title from input: {input:?}")]
    ParseFailed {
        /// The input that could not be parsed.
        input: String,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for parsett operations.
pub type Result<T> = std::result::Result<T, ParsettError>;
