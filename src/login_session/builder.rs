use super::{LoginSession, RequestContext};
use crate::config::SteamLoginConfig;
use crate::transports::{Transport, WebApiTransport};

/// Builder for creating a [`LoginSession`].
///
/// # Examples
/// ```
/// use steam_login::login_session::{LoginSession, RequestContext};
/// use steam_login::config::SteamLoginConfig;
///
/// let context = RequestContext::new("https://example.com").unwrap();
/// let session = LoginSession::builder(context)
///     .config(SteamLoginConfig::default())
///     .build();
/// ```
#[derive(Debug)]
pub struct LoginSessionBuilder<T = WebApiTransport> {
    context: RequestContext,
    config: SteamLoginConfig,
    transport: T,
}

impl LoginSessionBuilder<WebApiTransport> {
    /// Creates a new [`LoginSessionBuilder`] using the default config and transport.
    pub fn new(context: RequestContext) -> Self {
        Self {
            context,
            config: SteamLoginConfig::default(),
            transport: WebApiTransport::new(),
        }
    }
}

impl<T> LoginSessionBuilder<T>
where
    T: Transport,
{
    /// Sets the config. Defaults to [`SteamLoginConfig::default`].
    pub fn config(mut self, config: SteamLoginConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the transport used for the verification and profile requests.
    pub fn transport<U>(self, transport: U) -> LoginSessionBuilder<U>
    where
        U: Transport,
    {
        LoginSessionBuilder {
            context: self.context,
            config: self.config,
            transport,
        }
    }

    /// Builds the [`LoginSession`].
    pub fn build(self) -> LoginSession<T> {
        LoginSession::new(self.config, self.context, self.transport)
    }
}
