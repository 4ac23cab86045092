use super::{ConfigError, ProfileMethod, SteamLoginConfig};
use crate::steamid::UniverseDigit;
use std::time::Duration;

/// Builder for creating a [`SteamLoginConfig`].
///
/// # Examples
/// ```
/// use steam_login::config::{SteamLoginConfig, ProfileMethod};
/// use std::time::Duration;
///
/// let config = SteamLoginConfig::builder()
///     .callback_route("/auth/steam/callback")
///     .timeout(Duration::from_secs(10))
///     .profile_method(ProfileMethod::Api)
///     .api_key("XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
///     .fetch_profile(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.callback_route(), "/auth/steam/callback");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SteamLoginConfigBuilder {
    config: SteamLoginConfig,
}

impl SteamLoginConfigBuilder {
    /// Creates a new [`SteamLoginConfigBuilder`] with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the route that starts a login. Defaults to `/login/steam`.
    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.config.login_route = route.into();
        self
    }

    /// Sets the route Steam redirects back to. Defaults to `/auth/steam`.
    pub fn callback_route(mut self, route: impl Into<String>) -> Self {
        self.config.callback_route = route.into();
        self
    }

    /// Sets the timeout of the verification request. Defaults to 5 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the timeout of profile requests. Defaults to 5 seconds.
    pub fn profile_timeout(mut self, timeout: Duration) -> Self {
        self.config.profile_timeout = timeout;
        self
    }

    pub fn profile_method(mut self, method: ProfileMethod) -> Self {
        self.config.profile_method = method;
        self
    }

    /// Sets the Steam Web API key. Required for [`ProfileMethod::Api`].
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Keeps the parity bit in SteamID2/SteamID3 output. Off by default.
    pub fn universe(mut self, universe: bool) -> Self {
        self.config.codec.universe = universe;
        self
    }

    pub fn universe_digit(mut self, universe_digit: UniverseDigit) -> Self {
        self.config.codec.universe_digit = universe_digit;
        self
    }

    /// Loads profile data after each successful login. Off by default.
    pub fn fetch_profile(mut self, fetch_profile: bool) -> Self {
        self.config.fetch_profile = fetch_profile;
        self
    }

    /// Builds the [`SteamLoginConfig`]. Returns an error if a route is not an absolute path on
    /// the site itself or the API method is selected without a key.
    pub fn build(self) -> Result<SteamLoginConfig, ConfigError> {
        let config = self.config;

        for route in [&config.login_route, &config.callback_route] {
            // "//host" and "/\host" resolve to another host when joined onto the site root.
            if !route.starts_with('/') || route.starts_with("//") || route.starts_with("/\\") {
                return Err(ConfigError::InvalidRoute(route.clone()));
            }
        }

        if config.profile_method == ProfileMethod::Api &&
            config.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(config)
    }
}
