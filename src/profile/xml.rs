use super::{Error, ProfileData};
use crate::enums::{OnlineState, Visibility};
use crate::steamid::SteamIdentity;
use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;
use url::Url;

const CUSTOM_PROFILE_URL: &str = "https://steamcommunity.com/id";

/// The parts of `https://steamcommunity.com/profiles/<id64>?xml=1` that are used. Not found
/// profiles come back as `<response><error>...</error></response>`.
#[derive(Debug, Deserialize)]
struct XmlProfile {
    #[serde(rename = "steamID")]
    name: Option<String>,
    #[serde(rename = "onlineState")]
    online_state: Option<String>,
    #[serde(rename = "stateMessage")]
    state_message: Option<String>,
    #[serde(rename = "privacyState")]
    privacy_state: Option<String>,
    #[serde(rename = "visibilityState")]
    visibility_state: Option<u8>,
    #[serde(rename = "avatarIcon")]
    avatar_icon: Option<String>,
    #[serde(rename = "avatarMedium")]
    avatar_medium: Option<String>,
    #[serde(rename = "avatarFull")]
    avatar_full: Option<String>,
    #[serde(rename = "customURL")]
    custom_url: Option<String>,
    #[serde(rename = "memberSince")]
    member_since: Option<String>,
    #[serde(rename = "realname")]
    real_name: Option<String>,
    #[serde(rename = "inGameInfo")]
    in_game_info: Option<IgnoredAny>,
    error: Option<String>,
}

pub fn url(identity: &SteamIdentity) -> Result<Url, Error> {
    let mut url = Url::parse(&identity.profile_url())?;

    url.query_pairs_mut().append_pair("xml", "1");

    Ok(url)
}

pub fn parse(identity: &SteamIdentity, body: &str) -> Result<ProfileData, Error> {
    let profile = quick_xml::de::from_str::<XmlProfile>(body)
        .map_err(|error| Error::Unavailable(format!("invalid profile XML: {error}")))?;

    if let Some(error) = profile.error {
        return Err(Error::Unavailable(error.trim().to_string()));
    }

    let display_name = non_empty(profile.name)
        .ok_or_else(|| Error::Unavailable("profile XML has no steamID".into()))?;
    let profile_url = match non_empty(profile.custom_url) {
        Some(custom_url) => format!("{CUSTOM_PROFILE_URL}/{custom_url}/"),
        None => identity.profile_url(),
    };
    let online_state = if profile.in_game_info.is_some() {
        OnlineState::InGame
    } else {
        profile.online_state
            .as_deref()
            .map(OnlineState::from_xml)
            .unwrap_or_default()
    };

    Ok(ProfileData {
        steam_id: identity.id64(),
        display_name,
        real_name: non_empty(profile.real_name),
        profile_url,
        avatar_small: profile.avatar_icon.unwrap_or_default(),
        avatar_medium: profile.avatar_medium.unwrap_or_default(),
        avatar_large: profile.avatar_full.unwrap_or_default(),
        online_state,
        state_message: non_empty(profile.state_message),
        visibility: profile.privacy_state
            .as_deref()
            .map(Visibility::from_xml)
            .unwrap_or_default(),
        visibility_code: profile.visibility_state.unwrap_or_default(),
        joined_at: profile.member_since
            .as_deref()
            .and_then(parse_member_since),
    })
}

/// Parses dates like `October 5, 2011`.
fn parse_member_since(date: &str) -> Option<chrono::DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%B %d, %Y").ok()?;
    let datetime = date.and_hms_opt(0, 0, 0)?;

    Some(Utc.from_utc_datetime(&datetime))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
