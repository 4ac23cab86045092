use super::{Error, ProfileData};
use crate::enums::{OnlineState, Visibility};
use crate::steamid::SteamIdentity;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use url::Url;

const PLAYER_SUMMARIES_URL: &str = "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/";

#[derive(Debug, Deserialize)]
struct PlayerSummariesResponse {
    response: Players,
}

#[derive(Debug, Deserialize)]
struct Players {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    personaname: String,
    realname: Option<String>,
    profileurl: String,
    avatar: String,
    avatarmedium: String,
    avatarfull: String,
    #[serde(default)]
    personastate: u8,
    #[serde(default)]
    communityvisibilitystate: u8,
    gameid: Option<String>,
    timecreated: Option<i64>,
}

pub fn url(identity: &SteamIdentity, key: &str) -> Result<Url, Error> {
    let url = Url::parse_with_params(PLAYER_SUMMARIES_URL, &[
        ("key", key.to_string()),
        ("steamids", identity.id64().to_string()),
    ])?;

    Ok(url)
}

pub fn parse(identity: &SteamIdentity, body: &str) -> Result<ProfileData, Error> {
    let response = serde_json::from_str::<PlayerSummariesResponse>(body)
        .map_err(|error| Error::Unavailable(format!("invalid player summaries response: {error}")))?;
    let player = response.response.players
        .into_iter()
        .next()
        .ok_or_else(|| Error::Unavailable("no player in response".into()))?;
    let online_state = if player.gameid.is_some() {
        OnlineState::InGame
    } else {
        OnlineState::from_code(player.personastate)
    };

    Ok(ProfileData {
        steam_id: identity.id64(),
        display_name: player.personaname,
        real_name: player.realname.filter(|name| !name.is_empty()),
        profile_url: player.profileurl,
        avatar_small: player.avatar,
        avatar_medium: player.avatarmedium,
        avatar_large: player.avatarfull,
        online_state,
        state_message: None,
        visibility: Visibility::from_code(player.communityvisibilitystate),
        visibility_code: player.communityvisibilitystate,
        joined_at: player.timecreated
            .and_then(|timestamp| Utc.timestamp_opt(timestamp, 0).single()),
    })
}
