use std::{sync::Arc, time::Duration};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{error::HarvestError, management::TokenManager, warning};

/// Longest `Retry-After` we are willing to wait for.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Pause before retrying a 502/503 answer.
pub const DEFAULT_RETRY_PAUSE: Duration = Duration::from_secs(10);

/// HTTP client shared by all stages; `timeout` bounds every single request.
pub fn build_http_client(timeout: Duration) -> Result<Client, HarvestError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| HarvestError::Fetch(format!("cannot build HTTP client: {e}")))
}

/// Authenticated access to the Spotify Web API.
///
/// Every request asks the shared [`TokenManager`] for a valid bearer token, so
/// an expired credential is refreshed before use. Transient answers are retried
/// up to `max_retries` times:
///
/// - `429 Too Many Requests` waits for `Retry-After` (at most 120 seconds)
/// - `502 Bad Gateway` and `503 Service Unavailable` wait a fixed pause
///   ([`DEFAULT_RETRY_PAUSE`] unless set with [`SpotifyClient::with_retry_pause`])
/// - `401 Unauthorized` drops the cached credential and tries once more
///
/// Everything else that is not a success, as well as an empty body, becomes
/// [`HarvestError::Fetch`].
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Arc<TokenManager>,
    max_retries: u32,
    retry_pause: Duration,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: String, tokens: Arc<TokenManager>, max_retries: u32) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens,
            max_retries,
            retry_pause: DEFAULT_RETRY_PAUSE,
        }
    }

    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, HarvestError> {
        let mut attempt = 0;
        let mut reauthorized = false;

        loop {
            let token = self.tokens.get_valid_token().await?;
            let response = self
                .http
                .get(url)
                .query(query)
                .bearer_auth(token)
                .send()
                .await
                .map_err(|e| HarvestError::Fetch(format!("GET {url}: {e}")))?;

            let status = response.status();
            if status.is_success() {
                let body = response
                    .text()
                    .await
                    .map_err(|e| HarvestError::Fetch(format!("GET {url}: {e}")))?;
                if body.trim().is_empty() {
                    return Err(HarvestError::Fetch(format!("GET {url}: empty body")));
                }
                return serde_json::from_str(&body)
                    .map_err(|e| HarvestError::Fetch(format!("GET {url}: {e}")));
            }

            if status == StatusCode::UNAUTHORIZED && !reauthorized {
                reauthorized = true;
                self.tokens.invalidate().await;
                continue;
            }

            if attempt < self.max_retries {
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        attempt += 1;
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds.",
                        retry_after
                    );
                } else if status == StatusCode::BAD_GATEWAY
                    || status == StatusCode::SERVICE_UNAVAILABLE
                {
                    attempt += 1;
                    sleep(self.retry_pause).await;
                    continue;
                }
            }

            return Err(HarvestError::Fetch(format!("GET {url} answered {status}")));
        }
    }
}
