//! Result and error types for Navegar.

use thiserror::Error;

/// Result type for Navegar operations
pub type NavegarResult<T> = Result<T, NavegarError>;

/// Errors that can occur in Navegar
#[derive(Debug, Error)]
pub enum NavegarError {
    /// Wait condition never satisfied within the configured bound
    #[error("Timed out after {ms}ms waiting for {condition}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the condition waited for
        condition: String,
    },

    /// Field fill failed at some step (locate, wait, scroll, clear, type)
    #[error("Failed to fill field {locator}: {message}")]
    FieldFill {
        /// The offending locator
        locator: String,
        /// Underlying failure
        message: String,
    },

    /// Click failed at some step (locate, wait, scroll, clickability, click)
    #[error("Failed to click element {locator}: {message}")]
    Click {
        /// The offending locator
        locator: String,
        /// Underlying failure
        message: String,
    },

    /// Direct DOM-level click failed
    #[error("Script click failed for {locator}: {message}")]
    ScriptClick {
        /// The offending locator
        locator: String,
        /// Underlying failure
        message: String,
    },

    /// Text read failed
    #[error("Failed to read text of {locator}: {message}")]
    TextRead {
        /// The offending locator
        locator: String,
        /// Underlying failure
        message: String,
    },

    /// Carousel retry bound exhausted without the next item becoming visible
    #[error("Next card did not become visible; current card index: {index}")]
    CarouselAdvance {
        /// The index that failed to advance
        index: usize,
    },

    /// No element matched the locator
    #[error("No element found for {locator}")]
    ElementNotFound {
        /// The locator with zero matches
        locator: String,
    },

    /// Data source problem: missing file, missing header, malformed row
    #[error("Data source error: {message}")]
    DataSource {
        /// What went wrong
        message: String,
    },

    /// Failure reported by the underlying browser driver
    #[error("Driver error: {message}")]
    Driver {
        /// Error message from the driver
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
