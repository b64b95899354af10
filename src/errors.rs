/*!
 * Error types for the video2script application.
 *
 * This module contains custom error types for the external collaborators
 * (language-model providers, transcription, document rendering), using the
 * thiserror crate for ergonomic error definitions. Application glue wraps
 * them in `anyhow::Error` with context.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured time
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while turning an input file into a transcript
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// The input file is missing or of an unsupported type
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// Audio extraction with ffmpeg failed
    #[error("Audio extraction failed: {0}")]
    AudioExtraction(String),

    /// The transcription service failed
    #[error("Transcription service error: {0}")]
    Service(#[from] ProviderError),

    /// Local file handling failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when rendering a structured document
#[derive(Error, Debug)]
pub enum RenderError {
    /// Packing the document archive failed
    #[error("Failed to write document: {0}")]
    Write(String),

    /// Local file handling failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
