use lazy_regex::{regex_captures, regex_is_match};
use url::Url;

/// Checks the key-value body of a `check_authentication` response for `is_valid:true`.
pub fn is_valid_response(body: &str) -> bool {
    regex_is_match!(r#"(?i)is_valid\s*:\s*true"#, body)
}

/// Extracts the id64 from a claimed id such as
/// `https://steamcommunity.com/openid/id/76561197960287930`.
pub fn steamid_from_claimed_id(claimed_id: &str) -> Option<u64> {
    let (_, id) = regex_captures!(r#"^https?://steamcommunity\.com/openid/id/([0-9]{17,25})"#, claimed_id)?;

    id.parse::<u64>().ok()
}

/// Checks whether `url` points at Steam's own OpenID endpoint.
pub fn is_steam_endpoint(url: &Url) -> bool {
    url.scheme() == "https" &&
    url.host_str() == Some("steamcommunity.com") &&
    url.port().is_none() &&
    url.path() == "/openid/login"
}

/// Checks whether two URLs share host and port.
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() &&
    a.port_or_known_default() == b.port_or_known_default()
}
