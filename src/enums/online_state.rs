use super::PersonaState;
use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum OnlineState {
    #[default]
    Offline,
    Online,
    Busy,
    Away,
    Snooze,
    LookingToTrade,
    LookingToPlay,
    InGame,
}

impl OnlineState {
    /// Maps an API `personastate` code. Unknown codes are treated as offline.
    pub fn from_code(code: u8) -> Self {
        match PersonaState::try_from(code) {
            Ok(state) => state.into(),
            Err(_) => {
                log::debug!("Unknown personastate {code}");
                Self::Offline
            },
        }
    }

    /// Maps the `onlineState` text of a community XML profile.
    pub fn from_xml(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "in-game" => Self::InGame,
            "online" => Self::Online,
            "busy" => Self::Busy,
            "away" => Self::Away,
            "snooze" => Self::Snooze,
            "looking to trade" => Self::LookingToTrade,
            "looking to play" => Self::LookingToPlay,
            _ => Self::Offline,
        }
    }

    pub fn is_online(&self) -> bool {
        *self != Self::Offline
    }
}

impl From<PersonaState> for OnlineState {
    fn from(state: PersonaState) -> Self {
        match state {
            PersonaState::Offline => Self::Offline,
            PersonaState::Online => Self::Online,
            PersonaState::Busy => Self::Busy,
            PersonaState::Away => Self::Away,
            PersonaState::Snooze => Self::Snooze,
            PersonaState::LookingToTrade => Self::LookingToTrade,
            PersonaState::LookingToPlay => Self::LookingToPlay,
        }
    }
}

impl fmt::Display for OnlineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
            Self::Busy => "Busy",
            Self::Away => "Away",
            Self::Snooze => "Snooze",
            Self::LookingToTrade => "Looking to trade",
            Self::LookingToPlay => "Looking to play",
            Self::InGame => "In-Game",
        };

        f.write_str(s)
    }
}
