//! Error types for the puzzle site client

use thiserror::Error;

/// Errors raised while talking to adventofcode.com
#[derive(Error, Debug)]
pub enum AocError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Unexpected HTTP status (puzzle not unlocked yet, expired session, ...)
    #[error("Unexpected HTTP status {status} from {url}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
        /// The URL that was requested
        url: String,
    },

    /// Response body was not valid UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// Submission page had no `<main>` element
    #[error("Failed to find the answer text in the response")]
    HtmlParse,

    /// Session cookie or base URL cannot be used to build a request
    #[error("Invalid client configuration: {0}")]
    ClientInit(String),
}
