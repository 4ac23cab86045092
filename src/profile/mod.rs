//! # Profile
//!
//! Public profile data for a verified identity, from either the Steam Web API or the
//! community XML profile page. Both sources produce the same [`ProfileData`].

mod error;
mod api;
mod xml;

pub use error::Error;

use crate::enums::{OnlineState, Visibility};
use crate::steamid::SteamIdentity;
use crate::transports::Transport;
use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default timeout for profile requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where profile data is loaded from.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum ProfileSource {
    /// `ISteamUser/GetPlayerSummaries` using a Web API key.
    ApiKey(String),
    /// The public `?xml=1` community profile. Needs no key.
    #[default]
    PublicXml,
}

/// Public profile attributes, joined to a [`SteamIdentity`] by `steam_id`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    /// The id64 this profile belongs to.
    pub steam_id: u64,
    pub display_name: String,
    pub real_name: Option<String>,
    pub profile_url: String,
    pub avatar_small: String,
    pub avatar_medium: String,
    pub avatar_large: String,
    pub online_state: OnlineState,
    /// Free-form status text. Only the XML source provides it.
    pub state_message: Option<String>,
    pub visibility: Visibility,
    /// The numeric visibility code as reported by Steam.
    pub visibility_code: u8,
    /// When the account was created. Hidden on private profiles.
    pub joined_at: Option<DateTime<Utc>>,
}

impl ProfileData {
    pub fn is_online(&self) -> bool {
        self.online_state.is_online()
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Loads [`ProfileData`] through a [`Transport`].
#[derive(Debug)]
pub struct ProfileFetcher<'a, T: ?Sized> {
    transport: &'a T,
    timeout: Duration,
}

impl<'a, T> ProfileFetcher<'a, T>
where
    T: Transport + ?Sized,
{
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetches the profile of `identity`. Failures leave the identity valid.
    pub async fn fetch(
        &self,
        identity: &SteamIdentity,
        source: &ProfileSource,
    ) -> Result<ProfileData, Error> {
        match source {
            ProfileSource::ApiKey(key) => {
                let url = api::url(identity, key)?;
                let body = self.transport.get(&url, self.timeout).await?;

                api::parse(identity, &body)
            },
            ProfileSource::PublicXml => {
                let url = xml::url(identity)?;
                let body = self.transport.get(&url, self.timeout).await?;

                xml::parse(identity, &body)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transports::mock::{MockTransport, Request};

    const API_BODY: &str = r#"{
        "response": {
            "players": [
                {
                    "steamid": "76561197960287930",
                    "communityvisibilitystate": 3,
                    "profilestate": 1,
                    "personaname": "Rabscuttle",
                    "profileurl": "https://steamcommunity.com/id/rabscuttle/",
                    "avatar": "https://avatars.steamstatic.com/abc.jpg",
                    "avatarmedium": "https://avatars.steamstatic.com/abc_medium.jpg",
                    "avatarfull": "https://avatars.steamstatic.com/abc_full.jpg",
                    "avatarhash": "abc",
                    "lastlogoff": 1700000000,
                    "personastate": 1,
                    "realname": "Rab Scuttle",
                    "primaryclanid": "103582791429521408",
                    "timecreated": 1063407589,
                    "personastateflags": 0,
                    "gameextrainfo": "Team Fortress 2",
                    "gameid": "440"
                }
            ]
        }
    }"#;

    const XML_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<profile>
    <steamID64>76561197960287930</steamID64>
    <steamID><![CDATA[Rabscuttle]]></steamID>
    <onlineState>in-game</onlineState>
    <stateMessage><![CDATA[In-Game<br/>Team Fortress 2]]></stateMessage>
    <privacyState>public</privacyState>
    <visibilityState>3</visibilityState>
    <avatarIcon><![CDATA[https://avatars.steamstatic.com/abc.jpg]]></avatarIcon>
    <avatarMedium><![CDATA[https://avatars.steamstatic.com/abc_medium.jpg]]></avatarMedium>
    <avatarFull><![CDATA[https://avatars.steamstatic.com/abc_full.jpg]]></avatarFull>
    <vacBanned>0</vacBanned>
    <tradeBanState>None</tradeBanState>
    <isLimitedAccount>0</isLimitedAccount>
    <customURL><![CDATA[rabscuttle]]></customURL>
    <inGameInfo>
        <gameName><![CDATA[Team Fortress 2]]></gameName>
        <gameLink><![CDATA[https://steamcommunity.com/app/440]]></gameLink>
    </inGameInfo>
    <memberSince>September 12, 2003</memberSince>
    <location><![CDATA[Washington, United States]]></location>
    <realname><![CDATA[Rab Scuttle]]></realname>
    <summary><![CDATA[No information given.]]></summary>
</profile>"#;

    fn identity() -> SteamIdentity {
        "76561197960287930".parse().unwrap()
    }

    #[tokio::test]
    async fn fetches_from_api() {
        let transport = MockTransport::new().with_body(API_BODY);
        let profile = ProfileFetcher::new(&transport)
            .fetch(&identity(), &ProfileSource::ApiKey("KEY".into()))
            .await
            .unwrap();

        assert_eq!(profile.steam_id, 76561197960287930);
        assert_eq!(profile.display_name, "Rabscuttle");
        assert_eq!(profile.real_name.as_deref(), Some("Rab Scuttle"));
        assert_eq!(profile.online_state, OnlineState::InGame);
        assert_eq!(profile.visibility, Visibility::Public);
        assert_eq!(profile.visibility_code, 3);
        assert_eq!(profile.joined_at.unwrap().timestamp(), 1063407589);
        assert_eq!(transport.requests(), vec![Request::Get {
            url: "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/?key=KEY&steamids=76561197960287930".into(),
        }]);
    }

    #[tokio::test]
    async fn fetches_from_xml() {
        let transport = MockTransport::new().with_body(XML_BODY);
        let profile = ProfileFetcher::new(&transport)
            .fetch(&identity(), &ProfileSource::PublicXml)
            .await
            .unwrap();

        assert_eq!(profile.display_name, "Rabscuttle");
        assert_eq!(profile.profile_url, "https://steamcommunity.com/id/rabscuttle/");
        assert_eq!(profile.online_state, OnlineState::InGame);
        assert_eq!(profile.state_message.as_deref(), Some("In-Game<br/>Team Fortress 2"));
        assert_eq!(profile.visibility, Visibility::Public);
        assert_eq!(profile.avatar_large, "https://avatars.steamstatic.com/abc_full.jpg");
        assert_eq!(transport.requests(), vec![Request::Get {
            url: "https://steamcommunity.com/profiles/76561197960287930?xml=1".into(),
        }]);
    }

    #[tokio::test]
    async fn sources_agree() {
        let api_transport = MockTransport::new().with_body(API_BODY);
        let xml_transport = MockTransport::new().with_body(XML_BODY);
        let from_api = ProfileFetcher::new(&api_transport)
            .fetch(&identity(), &ProfileSource::ApiKey("KEY".into()))
            .await
            .unwrap();
        let from_xml = ProfileFetcher::new(&xml_transport)
            .fetch(&identity(), &ProfileSource::PublicXml)
            .await
            .unwrap();

        assert_eq!(from_api.steam_id, from_xml.steam_id);
        assert_eq!(from_api.display_name, from_xml.display_name);
        assert_eq!(from_api.real_name, from_xml.real_name);
        assert_eq!(from_api.profile_url, from_xml.profile_url);
        assert_eq!(from_api.avatar_small, from_xml.avatar_small);
        assert_eq!(from_api.avatar_medium, from_xml.avatar_medium);
        assert_eq!(from_api.avatar_large, from_xml.avatar_large);
        assert_eq!(from_api.online_state, from_xml.online_state);
        assert_eq!(from_api.visibility, from_xml.visibility);
        assert_eq!(from_api.visibility_code, from_xml.visibility_code);
        assert_eq!(
            from_api.joined_at.map(|date| date.date_naive()),
            from_xml.joined_at.map(|date| date.date_naive()),
        );
    }

    #[tokio::test]
    async fn network_failure_is_fetch_failed() {
        let transport = MockTransport::new()
            .with_status(reqwest::StatusCode::FORBIDDEN);
        let error = ProfileFetcher::new(&transport)
            .fetch(&identity(), &ProfileSource::ApiKey("BAD".into()))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::FetchFailed(_)));
    }
}
