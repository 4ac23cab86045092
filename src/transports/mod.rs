//! Outbound HTTP used by the verifier and the profile fetcher.

mod error;
pub mod web_api;

pub use error::Error;
pub use web_api::WebApiTransport;

use std::time::Duration;
use async_trait::async_trait;
use url::Url;

/// Performs the two kinds of requests the login flow needs. Implementations must honor the
/// given timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a form-encoded POST and returns the response body as text.
    async fn post_form(
        &self,
        url: &Url,
        form: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, Error>;

    /// Sends a GET and returns the response body as text.
    async fn get(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> Result<String, Error>;
}
