use super::{Error, Transport};
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use url::Url;

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct WebApiTransport {
    client: Client,
}

impl WebApiTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Uses an existing client, e.g. one configured with a proxy.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl Transport for WebApiTransport {
    async fn post_form(
        &self,
        url: &Url,
        form: &[(String, String)],
        timeout: Duration,
    ) -> Result<String, Error> {
        log::debug!("POST {}", url);

        let response = self.client.post(url.clone())
            .headers(create_headers("text/plain, */*"))
            .form(form)
            .timeout(timeout)
            .send()
            .await?;

        read_body(response).await
    }

    async fn get(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> Result<String, Error> {
        log::debug!("GET {}", url);

        let response = self.client.get(url.clone())
            .headers(create_headers("application/json, text/xml, */*"))
            .timeout(timeout)
            .send()
            .await?;

        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, Error> {
    let status = response.status();

    if !status.is_success() {
        return Err(Error::Status(status));
    }

    Ok(response.text().await?)
}

fn create_headers(accept: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.append(ACCEPT, HeaderValue::from_static(accept));
    headers
}
