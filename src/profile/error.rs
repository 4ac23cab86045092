/// Profile errors never invalidate a verified identity.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to fetch profile: {}", .0)]
    FetchFailed(#[from] crate::transports::Error),
    #[error("Profile unavailable: {}", .0)]
    Unavailable(String),
    #[error("Invalid URL: {}", .0)]
    InvalidUrl(#[from] url::ParseError),
}
