use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsdeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("News API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Page {page} is out of range (1..={total_pages})")]
    InvalidPage { page: u32, total_pages: u32 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NewsdeskError>;
