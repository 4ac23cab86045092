use std::collections::BTreeMap;
use url::form_urlencoded;

/// The parameters Steam sends back to the `return_to` URL.
///
/// Keys are stored in their underscored form (`openid_claimed_id`), which is how most web
/// frameworks expose the dotted `openid.claimed_id` names. Dotted keys are normalized on
/// insertion so either form can be passed in.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CallbackParams {
    params: BTreeMap<String, String>,
}

impl CallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Inserts a parameter, replacing `.` in the key with `_`.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.params.insert(normalize_key(key.as_ref()), value.into());
    }

    /// Gets a parameter by its underscored or dotted name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(&normalize_key(key))
            .map(String::as_str)
    }

    /// Gets a parameter only if it is present and not empty.
    pub fn filled(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Gets the value of a field named in `openid.signed`, e.g. `op_endpoint`.
    pub fn signed_field(&self, field: &str) -> Option<&str> {
        self.get(&format!("openid_{field}"))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(&normalize_key(key))
    }
}

impl<K, V> FromIterator<(K, V)> for CallbackParams
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();

        for (key, value) in iter {
            params.insert(key, value);
        }

        params
    }
}

fn normalize_key(key: &str) -> String {
    key.replace('.', "_")
}
