use crate::profile::ProfileData;
use crate::steamid::SteamIdentity;
use serde::Serialize;

/// A verified identity and, if it was loaded, its profile.
#[derive(Debug, Clone, Serialize)]
pub struct SteamUser {
    pub identity: SteamIdentity,
    pub profile: Option<ProfileData>,
}

impl SteamUser {
    pub fn new(identity: SteamIdentity) -> Self {
        Self {
            identity,
            profile: None,
        }
    }

    pub fn id64(&self) -> u64 {
        self.identity.id64()
    }

    /// The display name, if the profile was loaded.
    pub fn display_name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .map(|profile| profile.display_name.as_str())
    }
}
