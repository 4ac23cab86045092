//! # SteamID
//!
//! Conversion between the 64-bit SteamID and its legacy text forms.
//!
//! ## Examples
//! ```
//! use steam_login::steamid::{SteamIdentity, CodecOptions};
//!
//! let identity = SteamIdentity::decode(76561197960287930, &CodecOptions::default()).unwrap();
//!
//! assert_eq!(identity.steam_id2(), "STEAM_0:0:11101");
//! assert_eq!(identity.steam_id3(), "[U:1:22202]");
//! ```

mod error;

pub use error::SteamIdError;

use std::fmt;
use std::str::FromStr;
use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};
use steamid_ng::SteamID;

/// The SteamID of the first individual account in the public universe. Every id64 handed out
/// by Steam's OpenID provider is this base plus the 32-bit account id.
pub const STEAM_ID_BASE: u64 = 76561197960265728;

const PROFILE_URL: &str = "https://steamcommunity.com/profiles";

/// How the `U` digit of a `STEAM_U:A:Z` string is rendered.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniverseDigit {
    /// Always `0`. Most game servers and older tools expect this.
    #[default]
    Zero,
    /// The universe byte of the id64 (bits 56-63), `1` for the public universe.
    TopByte,
}

/// Options used when decoding an id64.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CodecOptions {
    /// Keep the lowest bit of the id64 as the auth server parity (`A`). When off, `A` is
    /// always 0.
    pub universe: bool,
    /// How the universe digit of the SteamID2 is rendered.
    pub universe_digit: UniverseDigit,
}

/// A Steam account identity. All three encodings are computed once on creation.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SteamIdentity {
    id64: u64,
    account_id: u32,
    parity: u8,
    steam_id2: String,
    steam_id3: String,
}

impl SteamIdentity {
    /// Decodes an id64. Fails if the id64 is below [`STEAM_ID_BASE`] or its account id does
    /// not fit in 32 bits.
    pub fn decode(
        id64: u64,
        options: &CodecOptions,
    ) -> Result<Self, SteamIdError> {
        let account_id = id64
            .checked_sub(STEAM_ID_BASE)
            .and_then(|offset| u32::try_from(offset).ok())
            .ok_or(SteamIdError::MalformedIdentity(id64))?;
        let universe = universe_byte(id64);
        let parity = if options.universe { (id64 & 1) as u8 } else { 0 };
        // Z keeps all 31 remaining bits so W can always be rebuilt from it.
        let account_number = u64::from(account_id >> 1);
        let digit = match options.universe_digit {
            UniverseDigit::Zero => 0,
            UniverseDigit::TopByte => universe,
        };

        Ok(Self {
            id64,
            account_id,
            parity,
            steam_id2: format!("STEAM_{digit}:{parity}:{account_number}"),
            steam_id3: format!("[U:1:{}]", account_number * 2 + u64::from(parity)),
        })
    }

    /// Parses any of `76561197960287930`, `STEAM_0:0:11101`, `[U:1:22202]` or `U:1:22202`.
    pub fn parse(
        input: &str,
        options: &CodecOptions,
    ) -> Result<Self, SteamIdError> {
        let input = input.trim();
        let account_id = if let Some((_, y, z)) = regex_captures!(r#"^STEAM_[0-5]:([01]):(\d+)$"#, input) {
            let parity = y.parse::<u64>()
                .map_err(|_| SteamIdError::InvalidFormat(input.into()))?;
            let account_number = z.parse::<u64>()
                .map_err(|_| SteamIdError::InvalidFormat(input.into()))?;

            account_number
                .checked_mul(2)
                .and_then(|n| n.checked_add(parity))
                .ok_or_else(|| SteamIdError::InvalidFormat(input.into()))?
        } else if let Some((_, w)) = regex_captures!(r#"^\[?U:1:(\d+)\]?$"#, input) {
            w.parse::<u64>()
                .map_err(|_| SteamIdError::InvalidFormat(input.into()))?
        } else if let Ok(id64) = input.parse::<u64>() {
            return Self::decode(id64, options);
        } else {
            return Err(SteamIdError::InvalidFormat(input.into()));
        };
        let id64 = STEAM_ID_BASE
            .checked_add(account_id)
            .ok_or_else(|| SteamIdError::InvalidFormat(input.into()))?;

        Self::decode(id64, options)
    }

    /// The canonical 64-bit SteamID.
    pub fn id64(&self) -> u64 {
        self.id64
    }

    /// The 32-bit account id.
    pub fn account_id(&self) -> u32 {
        self.account_id
    }

    /// The auth server parity (`A`). Always 0 unless decoded with `universe` on.
    pub fn parity(&self) -> u8 {
        self.parity
    }

    /// The `STEAM_U:A:Z` form.
    pub fn steam_id2(&self) -> &str {
        &self.steam_id2
    }

    /// The `[U:1:W]` form.
    pub fn steam_id3(&self) -> &str {
        &self.steam_id3
    }

    /// The universe byte (bits 56-63).
    pub fn universe(&self) -> u64 {
        universe_byte(self.id64)
    }

    /// The `Z` part of the SteamID2.
    pub fn account_number(&self) -> u32 {
        self.account_id >> 1
    }

    /// Link to the user's community profile.
    pub fn profile_url(&self) -> String {
        format!("{PROFILE_URL}/{}", self.id64)
    }

    /// Converts the identity into a [`SteamID`].
    pub fn steamid(&self) -> SteamID {
        SteamID::from(self.id64)
    }
}

impl FromStr for SteamIdentity {
    type Err = SteamIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &CodecOptions::default())
    }
}

impl TryFrom<SteamID> for SteamIdentity {
    type Error = SteamIdError;

    fn try_from(steamid: SteamID) -> Result<Self, Self::Error> {
        Self::decode(u64::from(steamid), &CodecOptions::default())
    }
}

impl From<&SteamIdentity> for u64 {
    fn from(identity: &SteamIdentity) -> Self {
        identity.id64
    }
}

impl fmt::Display for SteamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id64)
    }
}

fn universe_byte(id64: u64) -> u64 {
    (id64 >> 56) & 0xFF
}
