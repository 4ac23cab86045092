//! # OpenID
//!
//! The relying-party half of Steam's OpenID 2.0 flow: building the URL that sends a user to
//! Steam, and checking the signed parameters Steam sends back.
//!
//! ## Examples
//! ```
//! use steam_login::openid::build_login_url;
//! use url::Url;
//!
//! let realm = Url::parse("https://example.com").unwrap();
//! let return_to = Url::parse("https://example.com/auth/steam").unwrap();
//! let url = build_login_url(&realm, &return_to).unwrap();
//!
//! assert!(url.as_str().starts_with("https://steamcommunity.com/openid/login?"));
//! ```

mod error;
mod params;
pub mod helpers;

pub use error::Error;
pub use params::CallbackParams;

use crate::steamid::{CodecOptions, SteamIdentity};
use crate::transports::Transport;
use std::time::Duration;
use serde::Serialize;
use url::Url;

/// Steam's OpenID endpoint.
pub const OPENID_STEAM: &str = "https://steamcommunity.com/openid/login";
/// The OpenID 2.0 namespace.
pub const OPENID_SPECS: &str = "http://specs.openid.net/auth/2.0";
/// Identifier telling the provider to let the user choose the identity.
pub const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";
/// Default timeout for the `check_authentication` request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const REQUIRED_PARAMS: [&str; 4] = [
    "openid_assoc_handle",
    "openid_claimed_id",
    "openid_sig",
    "openid_signed",
];

#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    #[serde(rename = "openid.ns")]
    ns: &'static str,
    #[serde(rename = "openid.mode")]
    mode: &'static str,
    #[serde(rename = "openid.identity")]
    identity: &'static str,
    #[serde(rename = "openid.claimed_id")]
    claimed_id: &'static str,
    #[serde(rename = "openid.realm")]
    realm: &'a str,
    #[serde(rename = "openid.return_to")]
    return_to: &'a str,
}

/// Why a structurally valid callback was not accepted.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rejection {
    /// `openid_claimed_id` and `openid_identity` differ.
    IdentityMismatch,
    /// A field listed in `openid_signed` is not present in the callback.
    MissingSignedField(String),
    /// The provider did not answer `is_valid:true`.
    InvalidSignature,
    /// The provider confirmed the signature but the claimed id is not a Steam identity URL.
    UnexpectedClaimedId(String),
}

/// Outcome of checking a callback.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verification {
    /// The request does not carry an OpenID assertion.
    NotCallback,
    /// The assertion was checked and refused.
    Rejected(Rejection),
    /// The assertion was confirmed by the provider.
    Verified(SteamIdentity),
}

impl Verification {
    /// The identity if the callback was verified.
    pub fn into_identity(self) -> Option<SteamIdentity> {
        match self {
            Self::Verified(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Builds the URL that sends a user to Steam to log in. `realm` and `return_to` must share a
/// host and port. No request is made.
pub fn build_login_url(
    realm: &Url,
    return_to: &Url,
) -> Result<Url, Error> {
    if !helpers::same_host(realm, return_to) {
        return Err(Error::RealmMismatch {
            realm: realm.to_string(),
            return_to: return_to.to_string(),
        });
    }

    let realm = realm.origin().ascii_serialization();
    let form = LoginForm {
        ns: OPENID_SPECS,
        mode: "checkid_setup",
        identity: IDENTIFIER_SELECT,
        claimed_id: IDENTIFIER_SELECT,
        realm: &realm,
        return_to: return_to.as_str(),
    };
    let query = serde_qs::to_string(&form)?;
    let mut url = Url::parse(OPENID_STEAM)?;

    url.set_query(Some(&query));

    Ok(url)
}

/// Checks callback parameters against the provider.
#[derive(Debug)]
pub struct OpenIdVerifier<'a, T: ?Sized> {
    transport: &'a T,
    timeout: Duration,
    codec: CodecOptions,
}

impl<'a, T> OpenIdVerifier<'a, T>
where
    T: Transport + ?Sized,
{
    /// Creates a verifier using the default timeout and codec options.
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
            codec: CodecOptions::default(),
        }
    }

    /// Sets the timeout of the `check_authentication` request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how the verified id64 is decoded.
    pub fn codec(mut self, codec: CodecOptions) -> Self {
        self.codec = codec;
        self
    }

    /// Verifies the callback and returns the identity if the login is valid.
    ///
    /// Returns `Ok(None)` when the request is not a callback or the assertion was refused,
    /// and an error when Steam reported an error, could not be reached, or confirmed an
    /// identity that is not a valid individual SteamID.
    pub async fn validate_callback(
        &self,
        params: &CallbackParams,
    ) -> Result<Option<SteamIdentity>, Error> {
        let verification = self.verify(params).await?;

        if let Verification::Rejected(rejection) = &verification {
            log::debug!("OpenID assertion rejected: {rejection:?}");
        }

        Ok(verification.into_identity())
    }

    /// Like [`OpenIdVerifier::validate_callback`], but tells why an assertion was refused.
    pub async fn verify(
        &self,
        params: &CallbackParams,
    ) -> Result<Verification, Error> {
        if !REQUIRED_PARAMS.iter().all(|key| params.filled(key).is_some()) {
            if let Some(message) = params.get("openid_error") {
                return Err(Error::ProviderError(message.to_string()));
            }

            return Ok(Verification::NotCallback);
        }

        // Checked by the `REQUIRED_PARAMS` guard.
        let claimed_id = params.get("openid_claimed_id").unwrap_or_default();

        if params.get("openid_identity") != Some(claimed_id) {
            return Ok(Verification::Rejected(Rejection::IdentityMismatch));
        }

        let form = match check_authentication_form(params) {
            Ok(form) => form,
            Err(field) => return Ok(Verification::Rejected(Rejection::MissingSignedField(field))),
        };
        let endpoint = verification_endpoint(params)?;
        let body = self.transport.post_form(&endpoint, &form, self.timeout).await?;

        if !helpers::is_valid_response(&body) {
            return Ok(Verification::Rejected(Rejection::InvalidSignature));
        }

        let Some(id64) = helpers::steamid_from_claimed_id(claimed_id) else {
            return Ok(Verification::Rejected(Rejection::UnexpectedClaimedId(claimed_id.to_string())));
        };
        let identity = SteamIdentity::decode(id64, &self.codec)?;

        Ok(Verification::Verified(identity))
    }
}

/// Builds the `check_authentication` payload: the signature, the namespace, and every field
/// Steam signed, under their dotted names. Returns the name of the first signed field missing
/// from the callback.
fn check_authentication_form(
    params: &CallbackParams,
) -> Result<Vec<(String, String)>, String> {
    let signed = params.get("openid_signed").unwrap_or_default();
    let mut form = vec![
        ("openid.assoc_handle".to_string(), params.get("openid_assoc_handle").unwrap_or_default().to_string()),
        ("openid.signed".to_string(), signed.to_string()),
        ("openid.sig".to_string(), params.get("openid_sig").unwrap_or_default().to_string()),
        ("openid.ns".to_string(), params.filled("openid_ns").unwrap_or(OPENID_SPECS).to_string()),
    ];

    for field in signed.split(',').map(str::trim).filter(|field| !field.is_empty()) {
        let key = format!("openid.{field}");

        if field == "mode" || form.iter().any(|(k, _)| *k == key) {
            continue;
        }

        let value = params.signed_field(field)
            .ok_or_else(|| field.to_string())?;

        form.push((key, value.to_string()));
    }

    form.push(("openid.mode".to_string(), "check_authentication".to_string()));

    Ok(form)
}

/// The endpoint named in the callback, if it is Steam's; otherwise the fixed Steam endpoint.
fn verification_endpoint(params: &CallbackParams) -> Result<Url, Error> {
    if let Some(op_endpoint) = params.filled("openid_op_endpoint") {
        match Url::parse(op_endpoint) {
            Ok(url) if helpers::is_steam_endpoint(&url) => return Ok(url),
            _ => log::warn!("Ignoring openid.op_endpoint {op_endpoint}; using {OPENID_STEAM}"),
        }
    }

    Ok(Url::parse(OPENID_STEAM)?)
}
