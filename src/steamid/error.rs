#[derive(Debug, thiserror::Error)]
pub enum SteamIdError {
    #[error("SteamID {} is not an individual account in the public universe", .0)]
    MalformedIdentity(u64),
    #[error("Invalid SteamID format: {}", .0)]
    InvalidFormat(String),
}
