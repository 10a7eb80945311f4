/// Error types shared by the book lookup crates.
///
/// These errors represent failures in the transport layer used to reach the bookstore.
/// Application-specific errors are defined in each binary crate and wrap `CommonError`
/// via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
