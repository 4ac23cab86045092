//! # Login Session
//!
//! Drives one login attempt: send the user to Steam, verify what Steam sends back, and
//! return the user to the page they started from. Cookies and user storage are left to the
//! embedding application.
//!
//! ## Examples
//! ```no_run
//! use steam_login::login_session::{LoginSession, RequestContext};
//! use steam_login::openid::CallbackParams;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // GET /login/steam
//! let context = RequestContext::new("https://example.com")?;
//! let mut session = LoginSession::builder(context).build();
//! let redirect = session.start_login("https://example.com/servers")?;
//!
//! // GET /auth/steam?openid.ns=...
//! let context = RequestContext::new("https://example.com")?;
//! let mut session = LoginSession::builder(context).build();
//! let params = CallbackParams::from_query("openid.ns=...");
//! let user = session.complete_login(&params).await?;
//! let back_to = session.resume_original_page();
//! # Ok(())
//! # }
//! ```

mod error;
mod builder;
mod context;
mod helpers;

pub use error::LoginError;
pub use builder::LoginSessionBuilder;
pub use context::RequestContext;
pub use helpers::REDIRECT_PARAM;

use crate::config::SteamLoginConfig;
use crate::openid::{self, CallbackParams, OpenIdVerifier};
use crate::profile::{self, ProfileData, ProfileFetcher};
use crate::steam_user::SteamUser;
use crate::steamid::SteamIdentity;
use crate::transports::{Transport, WebApiTransport};
use url::Url;

/// A login attempt that has been sent to Steam.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PendingLogin {
    /// The Steam login URL the user is redirected to.
    pub login_url: Url,
    /// Where Steam sends the user back to. Carries the original page as `redirect_to`.
    pub return_to_url: Url,
    /// The origin the site claims to Steam. Shares a host with `return_to_url`.
    pub realm: Url,
    /// Where the user goes once the login is done.
    pub original_page: Url,
}

/// Handles a single request of the login flow. Not shared between requests.
#[derive(Debug)]
pub struct LoginSession<T = WebApiTransport> {
    config: SteamLoginConfig,
    context: RequestContext,
    transport: T,
    pending: Option<PendingLogin>,
    original_page: Option<Url>,
}

impl LoginSession<WebApiTransport> {
    /// Creates a new [`LoginSessionBuilder`].
    pub fn builder(context: RequestContext) -> LoginSessionBuilder<WebApiTransport> {
        LoginSessionBuilder::new(context)
    }
}

impl<T> LoginSession<T>
where
    T: Transport,
{
    /// Creates a new [`LoginSession`].
    pub fn new(
        config: SteamLoginConfig,
        context: RequestContext,
        transport: T,
    ) -> Self {
        Self {
            config,
            context,
            transport,
            pending: None,
            original_page: None,
        }
    }

    /// Records `current_url` as the page to return to and returns the Steam login URL to
    /// redirect the user to.
    ///
    /// The login and callback routes, and pages on other sites, are replaced with the site
    /// root. Fails if the callback URL does not share the site's host.
    pub fn start_login(
        &mut self,
        current_url: &str,
    ) -> Result<Url, LoginError> {
        let original_page = self.resolve_page(current_url);
        let realm = self.context.site_root().clone();
        let mut return_to_url = realm.join(self.config.callback_route())?;

        return_to_url
            .query_pairs_mut()
            .append_pair(REDIRECT_PARAM, original_page.as_str());

        let login_url = openid::build_login_url(&realm, &return_to_url)?;

        self.original_page = Some(original_page.clone());
        self.pending = Some(PendingLogin {
            login_url: login_url.clone(),
            return_to_url,
            realm,
            original_page,
        });

        Ok(login_url)
    }

    /// Like [`LoginSession::start_login`], using the current url of the [`RequestContext`].
    pub fn start_login_from_context(&mut self) -> Result<Url, LoginError> {
        let current_url = self.context
            .current_url()
            .map(|url| url.to_string())
            .unwrap_or_default();

        self.start_login(&current_url)
    }

    /// Verifies the parameters Steam sent to the callback route.
    ///
    /// Profile data is loaded when the config asks for it. A failed profile fetch is logged
    /// and leaves [`SteamUser::profile`] empty; the login still succeeds.
    pub async fn complete_login(
        &mut self,
        params: &CallbackParams,
    ) -> Result<SteamUser, LoginError> {
        if let Some(page) = params.get(REDIRECT_PARAM) {
            self.original_page = Some(self.resolve_page(page));
        }

        let identity = OpenIdVerifier::new(&self.transport)
            .timeout(self.config.timeout())
            .codec(self.config.codec())
            .validate_callback(params)
            .await?;
        let Some(identity) = identity else {
            log::debug!("Callback did not contain a verified login");
            return Err(LoginError::NotAuthenticated);
        };
        let mut user = SteamUser::new(identity);

        if self.config.fetch_profile() {
            match self.fetch_profile(&user.identity).await {
                Ok(profile) => user.profile = Some(profile),
                Err(error) => log::warn!("Failed to load profile for {}: {error}", user.identity),
            }
        }

        Ok(user)
    }

    /// Loads the profile of `identity` from the configured source.
    pub async fn fetch_profile(
        &self,
        identity: &SteamIdentity,
    ) -> Result<ProfileData, profile::Error> {
        ProfileFetcher::new(&self.transport)
            .timeout(self.config.profile_timeout())
            .fetch(identity, &self.config.profile_source())
            .await
    }

    /// The page to send the user back to. Defaults to the site root.
    pub fn resume_original_page(&self) -> Url {
        self.original_page
            .clone()
            .unwrap_or_else(|| self.context.site_root().clone())
    }

    /// The URL built by the last call to [`LoginSession::start_login`].
    pub fn login_url(&self) -> Option<&Url> {
        self.pending.as_ref().map(|pending| &pending.login_url)
    }

    /// The login attempt started by [`LoginSession::start_login`].
    pub fn pending(&self) -> Option<&PendingLogin> {
        self.pending.as_ref()
    }

    pub fn config(&self) -> &SteamLoginConfig {
        &self.config
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn resolve_page(&self, page: &str) -> Url {
        helpers::resolve_original_page(
            self.context.site_root(),
            page,
            &[self.config.login_route(), self.config.callback_route()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::OnlineState;
    use crate::transports::mock::MockTransport;

    const CLAIMED_ID: &str = "https://steamcommunity.com/openid/id/76561197960287930";
    const VALID: &str = "ns:http://specs.openid.net/auth/2.0\nis_valid:true\n";
    const XML_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<profile>
    <steamID><![CDATA[Rabscuttle]]></steamID>
    <onlineState>online</onlineState>
    <privacyState>public</privacyState>
    <visibilityState>3</visibilityState>
    <avatarIcon><![CDATA[https://avatars.steamstatic.com/abc.jpg]]></avatarIcon>
    <avatarMedium><![CDATA[https://avatars.steamstatic.com/abc_medium.jpg]]></avatarMedium>
    <avatarFull><![CDATA[https://avatars.steamstatic.com/abc_full.jpg]]></avatarFull>
</profile>"#;

    fn session(transport: MockTransport) -> LoginSession<MockTransport> {
        session_with_config(SteamLoginConfig::default(), transport)
    }

    fn session_with_config(
        config: SteamLoginConfig,
        transport: MockTransport,
    ) -> LoginSession<MockTransport> {
        let context = RequestContext::new("https://example.com").unwrap();

        LoginSession::new(config, context, transport)
    }

    fn callback_params(redirect_to: &str) -> CallbackParams {
        CallbackParams::from_iter([
            ("openid.ns", openid::OPENID_SPECS),
            ("openid.mode", "id_res"),
            ("openid.op_endpoint", openid::OPENID_STEAM),
            ("openid.claimed_id", CLAIMED_ID),
            ("openid.identity", CLAIMED_ID),
            ("openid.return_to", "https://example.com/auth/steam"),
            ("openid.response_nonce", "2024-01-01T00:00:00ZaBcDeF"),
            ("openid.assoc_handle", "1234567890"),
            ("openid.signed", "signed,op_endpoint,claimed_id,identity,return_to,response_nonce,assoc_handle"),
            ("openid.sig", "c2lnbmF0dXJl"),
            ("redirect_to", redirect_to),
        ])
    }

    #[test]
    fn start_login_builds_return_to() {
        let mut session = session(MockTransport::new());
        let login_url = session.start_login("https://example.com/servers").unwrap();
        let pending = session.pending().unwrap();

        assert_eq!(pending.realm.as_str(), "https://example.com/");
        assert_eq!(
            pending.return_to_url.as_str(),
            "https://example.com/auth/steam?redirect_to=https%3A%2F%2Fexample.com%2Fservers",
        );
        assert_eq!(pending.original_page.as_str(), "https://example.com/servers");
        assert_eq!(session.resume_original_page().as_str(), "https://example.com/servers");

        let return_to = login_url
            .query_pairs()
            .find(|(key, _)| key == "openid.return_to")
            .map(|(_, value)| value.into_owned());

        assert_eq!(return_to.as_deref(), Some(pending.return_to_url.as_str()));
        assert_eq!(session.login_url(), Some(&login_url));
        assert!(session.transport().requests().is_empty());
    }

    #[test]
    fn start_login_from_callback_route_returns_to_root() {
        let mut session = session(MockTransport::new());

        session.start_login("https://example.com/auth/steam").unwrap();

        assert_eq!(session.pending().unwrap().original_page.as_str(), "https://example.com/");

        session.start_login("/login/steam").unwrap();

        assert_eq!(session.resume_original_page().as_str(), "https://example.com/");
    }

    #[test]
    fn start_login_uses_context_url() {
        let context = RequestContext::new("https://example.com")
            .unwrap()
            .with_current_url("/maps/kz_checkmate");
        let mut session = LoginSession::new(SteamLoginConfig::default(), context, MockTransport::new());

        session.start_login_from_context().unwrap();

        assert_eq!(session.resume_original_page().as_str(), "https://example.com/maps/kz_checkmate");
    }

    #[test]
    fn login_url_is_empty_before_start() {
        let session = session(MockTransport::new());

        assert!(session.login_url().is_none());
        assert!(session.pending().is_none());
    }

    #[test]
    fn realm_mismatch_maps_to_login_error() {
        let realm = Url::parse("https://example.com").unwrap();
        let return_to = Url::parse("https://evil.example/auth/steam").unwrap();
        let error = LoginError::from(openid::build_login_url(&realm, &return_to).unwrap_err());

        assert!(matches!(error, LoginError::RealmMismatch { .. }));
    }

    #[test]
    fn resume_defaults_to_root() {
        let session = session(MockTransport::new());

        assert_eq!(session.resume_original_page().as_str(), "https://example.com/");
    }

    #[tokio::test]
    async fn completes_login() {
        let mut session = session(MockTransport::new().with_body(VALID));
        let user = session.complete_login(&callback_params("https://example.com/servers")).await.unwrap();

        assert_eq!(user.id64(), 76561197960287930);
        assert_eq!(user.identity.steam_id3(), "[U:1:22202]");
        assert!(user.profile.is_none());
        assert_eq!(session.resume_original_page().as_str(), "https://example.com/servers");
        assert_eq!(session.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn completes_login_with_profile() {
        let config = SteamLoginConfig::builder()
            .fetch_profile(true)
            .build()
            .unwrap();
        let transport = MockTransport::new()
            .with_body(VALID)
            .with_body(XML_BODY);
        let mut session = session_with_config(config, transport);
        let user = session.complete_login(&callback_params("/")).await.unwrap();
        let profile = user.profile.as_ref().unwrap();

        assert_eq!(user.display_name(), Some("Rabscuttle"));
        assert_eq!(profile.steam_id, user.id64());
        assert_eq!(profile.online_state, OnlineState::Online);
    }

    #[tokio::test]
    async fn profile_failure_keeps_identity() {
        let config = SteamLoginConfig::builder()
            .fetch_profile(true)
            .build()
            .unwrap();
        let transport = MockTransport::new()
            .with_body(VALID)
            .with_status(reqwest::StatusCode::GATEWAY_TIMEOUT);
        let mut session = session_with_config(config, transport);
        let user = session.complete_login(&callback_params("/")).await.unwrap();

        assert_eq!(user.id64(), 76561197960287930);
        assert!(user.profile.is_none());
        assert_eq!(session.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn missing_signature_is_not_authenticated() {
        let mut params = callback_params("/");

        params.insert("openid_sig", "");

        let mut session = session(MockTransport::new().with_body(VALID));
        let error = session.complete_login(&params).await.unwrap_err();

        assert!(matches!(error, LoginError::NotAuthenticated));
        assert!(session.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn invalid_signature_is_not_authenticated() {
        let mut session = session(MockTransport::new().with_body("is_valid:false"));
        let error = session.complete_login(&callback_params("/servers")).await.unwrap_err();

        assert!(matches!(error, LoginError::NotAuthenticated));
        // the user still goes back to where they were
        assert_eq!(session.resume_original_page().as_str(), "https://example.com/servers");
    }

    #[tokio::test]
    async fn provider_error_is_rejected() {
        let params = CallbackParams::from_query("openid.mode=error&openid.error=Invalid+request");
        let mut session = session(MockTransport::new());
        let error = session.complete_login(&params).await.unwrap_err();

        assert!(matches!(error, LoginError::ProviderRejected(message) if message == "Invalid request"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_distinct() {
        let transport = MockTransport::new()
            .with_status(reqwest::StatusCode::BAD_GATEWAY);
        let mut session = session(transport);
        let error = session.complete_login(&callback_params("/")).await.unwrap_err();

        assert!(matches!(error, LoginError::VerificationUnreachable(_)));
    }

    #[tokio::test]
    async fn off_site_redirect_is_ignored() {
        let mut session = session(MockTransport::new().with_body(VALID));

        session.complete_login(&callback_params("https://evil.example/phish")).await.unwrap();

        assert_eq!(session.resume_original_page().as_str(), "https://example.com/");
    }
}
