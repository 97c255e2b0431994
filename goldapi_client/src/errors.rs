//! Error types for the API client.

/// Errors that can occur when requesting a spot price.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or the body could not be read
    /// (connection failure, timeout, invalid URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not a valid spot price document.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
