//! HTTP client for the now-playing text endpoint

use crate::error::{Error, Result};
use crate::models::StreamInfo;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default timeout for metadata HTTP requests
///
/// The endpoint serves a single short text line, so anything slower than
/// this is effectively down and the poller should move on to its next tick.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("radiometa/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the station's now-playing endpoint
///
/// The endpoint is a plain-text GET returning `"<artist> - <title>"` as a
/// UTF-8 body. The client is cheap to clone and safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// use radiometa::MetadataClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MetadataClient::new("https://radio.example.com/now_playing.txt")?;
///     let info = client.fetch_stream_info().await?;
///     println!("Now playing: {info}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: Client,
    info_url: Url,
}

impl MetadataClient {
    /// Create a new client with default settings for the given endpoint
    pub fn new(info_url: impl AsRef<str>) -> Result<Self> {
        Self::builder().info_url(info_url).build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The configured now-playing endpoint
    pub fn info_url(&self) -> &Url {
        &self.info_url
    }

    /// Fetch and parse the current now-playing text
    ///
    /// Non-success HTTP statuses are errors. The body is trimmed before
    /// parsing since several station backends terminate the line with a
    /// newline.
    pub async fn fetch_stream_info(&self) -> Result<StreamInfo> {
        let response = self
            .client
            .get(self.info_url.clone())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let line = body.trim();
        debug!(body = line, "Fetched now-playing text");

        Ok(StreamInfo::parse(line))
    }
}

/// Builder for [`MetadataClient`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    info_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    client: Option<Client>,
}

impl ClientBuilder {
    /// Set the now-playing endpoint URL (required)
    pub fn info_url(mut self, url: impl AsRef<str>) -> Self {
        self.info_url = Some(url.as_ref().to_string());
        self
    }

    /// Set the request timeout (default: 10 s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom User-Agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a pre-built `reqwest::Client`
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings.
    /// Timeout and User-Agent settings on the builder are ignored in that
    /// case.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<MetadataClient> {
        let info_url = Url::parse(&self.info_url.ok_or(Error::MissingUrl)?)?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(
                    self.timeout
                        .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
                )
                .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
                .build()?,
        };

        Ok(MetadataClient { client, info_url })
    }
}
