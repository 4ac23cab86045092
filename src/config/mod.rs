//! # Config
//!
//! Settings consumed by [`LoginSession`](crate::login_session::LoginSession). Build one with
//! [`SteamLoginConfig::builder`] or load it from the environment:
//!
//! | variable | default |
//! |---|---|
//! | `STEAM_LOGIN` | `/login/steam` |
//! | `STEAM_RETURN` | `/auth/steam` |
//! | `STEAM_TIMEOUT` | `5` (seconds) |
//! | `STEAM_PROFILE_TIMEOUT` | `5` (seconds) |
//! | `STEAM_PROFILE_METHOD` | `xml` (or `api`) |
//! | `STEAM_API_KEY` | required for `api` |
//! | `STEAM_UNIVERSE` | `false` |
//! | `STEAM_UNIVERSE_DIGIT` | `zero` (or `byte`) |
//! | `STEAM_FETCH_PROFILE` | `false` |

mod error;
mod builder;

pub use error::ConfigError;
pub use builder::SteamLoginConfigBuilder;

use crate::openid;
use crate::profile::{self, ProfileSource};
use crate::steamid::{CodecOptions, UniverseDigit};
use std::ffi::OsString;
use std::str::FromStr;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGIN_ROUTE: &str = "/login/steam";
pub const DEFAULT_CALLBACK_ROUTE: &str = "/auth/steam";

/// How profile data is retrieved.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMethod {
    #[default]
    Xml,
    Api,
}

impl FromStr for ProfileMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "api" => Ok(Self::Api),
            _ => Err(ConfigError::InvalidValue {
                name: "STEAM_PROFILE_METHOD",
                value: s.into(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SteamLoginConfig {
    login_route: String,
    callback_route: String,
    timeout: Duration,
    profile_timeout: Duration,
    profile_method: ProfileMethod,
    api_key: Option<String>,
    codec: CodecOptions,
    fetch_profile: bool,
}

impl Default for SteamLoginConfig {
    fn default() -> Self {
        Self {
            login_route: DEFAULT_LOGIN_ROUTE.into(),
            callback_route: DEFAULT_CALLBACK_ROUTE.into(),
            timeout: openid::DEFAULT_TIMEOUT,
            profile_timeout: profile::DEFAULT_TIMEOUT,
            profile_method: ProfileMethod::Xml,
            api_key: None,
            codec: CodecOptions::default(),
            fetch_profile: false,
        }
    }
}

impl SteamLoginConfig {
    pub fn builder() -> SteamLoginConfigBuilder {
        SteamLoginConfigBuilder::new()
    }

    /// Loads the config from the process environment. Variables that are not valid
    /// unicode are skipped.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(unicode_vars(std::env::vars_os()))
    }

    /// Loads the config from `(name, value)` pairs using the `STEAM_*` names. Unknown names
    /// are ignored and missing ones fall back to defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = SteamLoginConfigBuilder::new();

        for (name, value) in vars {
            let value = value.into();

            builder = match name.as_ref() {
                "STEAM_LOGIN" => builder.login_route(value),
                "STEAM_RETURN" => builder.callback_route(value),
                "STEAM_TIMEOUT" => builder.timeout(parse_seconds("STEAM_TIMEOUT", &value)?),
                "STEAM_PROFILE_TIMEOUT" => builder.profile_timeout(parse_seconds("STEAM_PROFILE_TIMEOUT", &value)?),
                "STEAM_PROFILE_METHOD" => builder.profile_method(value.parse()?),
                "STEAM_API_KEY" if !value.is_empty() => builder.api_key(value),
                "STEAM_UNIVERSE" => builder.universe(parse_bool("STEAM_UNIVERSE", &value)?),
                "STEAM_UNIVERSE_DIGIT" => builder.universe_digit(parse_universe_digit(&value)?),
                "STEAM_FETCH_PROFILE" => builder.fetch_profile(parse_bool("STEAM_FETCH_PROFILE", &value)?),
                _ => builder,
            };
        }

        builder.build()
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn callback_route(&self) -> &str {
        &self.callback_route
    }

    /// Timeout of the verification request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn profile_timeout(&self) -> Duration {
        self.profile_timeout
    }

    pub fn profile_method(&self) -> ProfileMethod {
        self.profile_method
    }

    pub fn codec(&self) -> CodecOptions {
        self.codec
    }

    pub fn fetch_profile(&self) -> bool {
        self.fetch_profile
    }

    /// The profile source selected by the method and key.
    pub fn profile_source(&self) -> ProfileSource {
        match (self.profile_method, &self.api_key) {
            (ProfileMethod::Api, Some(key)) => ProfileSource::ApiKey(key.clone()),
            _ => ProfileSource::PublicXml,
        }
    }
}

fn unicode_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter().filter_map(|(name, value)| {
        Some((name.into_string().ok()?, value.into_string().ok()?))
    })
}

fn parse_seconds(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            name,
            value: value.into(),
        })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.into(),
        }),
    }
}

fn parse_universe_digit(value: &str) -> Result<UniverseDigit, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "zero" | "0" => Ok(UniverseDigit::Zero),
        "byte" | "top_byte" => Ok(UniverseDigit::TopByte),
        _ => Err(ConfigError::InvalidValue {
            name: "STEAM_UNIVERSE_DIGIT",
            value: value.into(),
        }),
    }
}
