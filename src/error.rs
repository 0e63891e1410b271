use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timeout for URL: {0}")]
    RequestTimeout(String),

    #[error("HTTP error {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    #[error("Audio stream not found")]
    AudioNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External command failed: {0}")]
    Command(String),

    #[error("Failed to extract audio: {0}")]
    ExtractionFailed(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
