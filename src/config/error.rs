#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("An API key is required when the profile method is \"api\"")]
    MissingApiKey,
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        name: &'static str,
        value: String,
    },
    #[error("Route must be an absolute path on the site: {:?}", .0)]
    InvalidRoute(String),
}
