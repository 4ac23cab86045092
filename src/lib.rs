//! Log users in through Steam's OpenID 2.0 provider.
//!
//! Start with [`login_session::LoginSession`]; the lower-level pieces are usable on their own.

pub mod config;
pub mod enums;
pub mod login_session;
pub mod openid;
pub mod profile;
pub mod steamid;
pub mod transports;

mod steam_user;

pub use config::SteamLoginConfig;
pub use login_session::{LoginError, LoginSession, RequestContext};
pub use openid::CallbackParams;
pub use profile::{ProfileData, ProfileSource};
pub use steam_user::SteamUser;
pub use steamid::SteamIdentity;
