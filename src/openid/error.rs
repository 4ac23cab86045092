use crate::steamid::SteamIdError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("realm {realm} and return_to {return_to} do not have matching hosts")]
    RealmMismatch {
        realm: String,
        return_to: String,
    },
    #[error("Invalid URL: {}", .0)]
    InvalidUrl(#[from] url::ParseError),
    #[error("OpenID provider returned an error: {}", .0)]
    ProviderError(String),
    #[error("Could not reach the OpenID provider: {}", .0)]
    VerificationUnreachable(#[from] crate::transports::Error),
    #[error("{}", .0)]
    MalformedIdentity(#[from] SteamIdError),
    #[error("serde_qs error: {}", .0)]
    SerdeQS(#[from] serde_qs::Error),
}
