use serde::{Deserialize, Serialize};

/// Community profile visibility.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    /// Maps the API `communityvisibilitystate`. Only 3 is public.
    pub fn from_code(code: u8) -> Self {
        if code == 3 {
            Self::Public
        } else {
            Self::Private
        }
    }

    /// Maps the XML `privacyState` text.
    pub fn from_xml(state: &str) -> Self {
        if state.trim().eq_ignore_ascii_case("public") {
            Self::Public
        } else {
            Self::Private
        }
    }
}
