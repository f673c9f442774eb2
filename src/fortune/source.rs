use super::{Fortune, FortuneError};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Public endpoint returning one random quote per request.
pub const DEFAULT_ENDPOINT: &str = "https://random-quotes-freeapi.vercel.app/api/random";

/// Boxed future returned by [`FortuneSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Fortune, FortuneError>> + Send + 'a>>;

/// Something that can produce one fortune per call.
pub trait FortuneSource: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;
}

/// Response body of the remote endpoint
#[derive(Debug, Deserialize)]
struct RemoteQuote {
    quote: String,
    author: String,
}

/// Parse a response body into a [`Fortune`].
pub fn parse_response(body: &str) -> Result<Fortune, FortuneError> {
    let remote: RemoteQuote = serde_json::from_str(body)?;
    Ok(Fortune::from_remote(remote.quote, &remote.author))
}

/// Fetches fortunes from an HTTP endpoint with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFortuneSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFortuneSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FortuneError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fortune-tv/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl FortuneSource for HttpFortuneSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            tracing::debug!(endpoint = %self.endpoint, "fetching fortune");
            let response = self.client.get(&self.endpoint).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FortuneError::Status(status.as_u16()));
            }

            let body = response.text().await?;
            parse_response(&body)
        })
    }
}
