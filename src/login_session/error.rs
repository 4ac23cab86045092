use crate::openid;
use crate::steamid::SteamIdError;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Steam rejected the login: {}", .0)]
    ProviderRejected(String),
    #[error("Login could not be verified")]
    NotAuthenticated,
    #[error("Could not reach Steam to verify the login: {}", .0)]
    VerificationUnreachable(crate::transports::Error),
    #[error("{}", .0)]
    MalformedIdentity(SteamIdError),
    #[error("realm {realm} and return_to {return_to} do not have matching hosts")]
    RealmMismatch {
        realm: String,
        return_to: String,
    },
    #[error("Invalid URL: {}", .0)]
    InvalidUrl(#[from] url::ParseError),
    #[error("OpenID error: {}", .0)]
    OpenId(openid::Error),
}

impl From<openid::Error> for LoginError {
    fn from(error: openid::Error) -> Self {
        match error {
            openid::Error::ProviderError(message) => Self::ProviderRejected(message),
            openid::Error::VerificationUnreachable(error) => Self::VerificationUnreachable(error),
            openid::Error::MalformedIdentity(error) => Self::MalformedIdentity(error),
            openid::Error::RealmMismatch { realm, return_to } => Self::RealmMismatch { realm, return_to },
            openid::Error::InvalidUrl(error) => Self::InvalidUrl(error),
            error => Self::OpenId(error),
        }
    }
}
