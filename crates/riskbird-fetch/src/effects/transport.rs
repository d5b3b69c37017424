use std::time::Duration;

use super::http::HttpClient;
use crate::core::{ApiRequest, classify};
use crate::data::RetryPolicy;
use crate::error::{Error, Result};

/// Sends requests one at a time, classifies responses and retries
/// network failures.
///
/// Every attempt, retries included, first waits for the configured delay.
/// A response of any status ends the call; only a failure to get a response
/// is retried, after the [`RetryPolicy`] cooldown.
#[derive(Debug)]
pub struct Transport<C> {
    http: C,
    delay: Duration,
    retry: RetryPolicy,
}

impl<C: HttpClient> Transport<C> {
    pub fn new(http: C, delay: Duration, retry: RetryPolicy) -> Self {
        Self { http, delay, retry }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Send `request` and return the body of a successful response.
    pub async fn send(&self, request: &ApiRequest) -> Result<String> {
        let mut retries = 0u32;

        loop {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            tracing::debug!(method = %request.method(), url = %request.url, "sending request");

            match self.http.send(request).await {
                Ok(response) => return classify(response.status, response.body, &request.url),
                Err(e) => {
                    if !self.retry.allows(retries) {
                        return Err(Error::RetriesExhausted {
                            attempts: retries + 1,
                            source: Box::new(e),
                        });
                    }

                    let cooldown = self.retry.delay(retries);
                    tracing::warn!(
                        url = %request.url,
                        error = %e,
                        retry = retries + 1,
                        cooldown_secs = cooldown.as_secs(),
                        "request failed, retrying"
                    );
                    tokio::time::sleep(cooldown).await;
                    retries += 1;
                }
            }
        }
    }
}
