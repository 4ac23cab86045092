#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request: {}", .0)]
    Http(#[from] reqwest::Error),
    #[error("Unexpected response status: {}", .0)]
    Status(reqwest::StatusCode),
}
