use std::future::Future;

use crate::core::ApiRequest;

/// Status and body of a response, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// A 200 response carrying `value` serialized as JSON.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    /// A response with `status` and no body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, String::new())
    }
}

/// Asynchronous HTTP client abstraction.
///
/// An `Err` from [`send`](HttpClient::send) means no response was obtained at
/// all (connection refused, reset, timeout, DNS). Every response, whatever
/// its status, is returned as `Ok` and classified by the caller.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - `ChromeClient` (feature `chrome-tls`): `wreq` with a Chrome 124 TLS and
///   HTTP/2 fingerprint
/// - [`MockHttpClient`](crate::MockHttpClient): scripted responses for tests
pub trait HttpClient: Send + Sync {
    /// Error type for network-level failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send `request` and return the raw response.
    ///
    /// Implementations must not follow redirects: a 302 carries meaning for
    /// the provider and has to reach the classifier.
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = std::result::Result<RawResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::{Proxy, redirect};
    use thiserror::Error;

    use crate::core::identity_headers;
    use crate::data::ClientConfig;

    #[derive(Debug, Error)]
    pub enum ClientSettingError {
        #[error("invalid proxy URL {url}: {source}")]
        Proxy {
            url: String,
            #[source]
            source: reqwest::Error,
        },

        #[error("invalid value for header {name}")]
        InvalidHeader { name: String },

        #[error("failed to build client: {0}")]
        Build(#[from] reqwest::Error),
    }

    /// Production HTTP client implementation using reqwest.
    ///
    /// Built once from a [`ClientConfig`]: identity headers and the cookie are
    /// installed as default headers, certificate verification is disabled and
    /// redirects are never followed.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new(config: &ClientConfig) -> Result<Self, ClientSettingError> {
            let mut headers = HeaderMap::new();
            for (name, value) in identity_headers(config) {
                let invalid = || ClientSettingError::InvalidHeader { name: name.clone() };
                let key = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
                let value = HeaderValue::from_str(&value).map_err(|_| invalid())?;
                headers.insert(key, value);
            }

            let mut builder = reqwest::Client::builder()
                .default_headers(headers)
                .danger_accept_invalid_certs(true)
                .redirect(redirect::Policy::none());

            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }

            if let Some(url) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
                let proxy = Proxy::all(url).map_err(|source| ClientSettingError::Proxy {
                    url: url.to_string(),
                    source,
                })?;
                builder = builder.proxy(proxy);
            }

            Ok(Self {
                client: builder.build().map_err(ClientSettingError::Build)?,
            })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, Self::Error> {
            let mut builder = match &request.body {
                Some(body) => self.client.post(&request.url).body(body.clone()),
                None => self.client.get(&request.url),
            };

            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            Ok(RawResponse { status, body })
        }
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSettingError, ReqwestClient};

#[cfg(feature = "chrome-tls")]
mod chrome_impl {
    use super::*;
    use thiserror::Error;
    use wreq::header::{HeaderMap, HeaderName, HeaderValue};
    use wreq::{Proxy, redirect};
    use wreq_util::Emulation;

    use crate::core::identity_headers;
    use crate::data::ClientConfig;

    #[derive(Debug, Error)]
    pub enum ChromeSettingError {
        #[error("invalid proxy URL {url}: {source}")]
        Proxy {
            url: String,
            #[source]
            source: wreq::Error,
        },

        #[error("invalid value for header {name}")]
        InvalidHeader { name: String },

        #[error("failed to build client: {0}")]
        Build(#[from] wreq::Error),
    }

    /// HTTP client presenting the ClientHello and HTTP/2 settings of
    /// Chrome 124, matching the user agent in the identity headers.
    ///
    /// Otherwise configured like [`ReqwestClient`](super::ReqwestClient):
    /// identity headers as defaults, no certificate verification, no redirects.
    #[derive(Clone)]
    pub struct ChromeClient {
        client: wreq::Client,
    }

    impl ChromeClient {
        pub fn new(config: &ClientConfig) -> Result<Self, ChromeSettingError> {
            let mut headers = HeaderMap::new();
            for (name, value) in identity_headers(config) {
                let invalid = || ChromeSettingError::InvalidHeader { name: name.clone() };
                let key = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
                let value = HeaderValue::from_str(&value).map_err(|_| invalid())?;
                headers.insert(key, value);
            }

            let mut builder = wreq::Client::builder()
                .emulation(Emulation::Chrome124)
                .default_headers(headers)
                .cert_verification(false)
                .redirect(redirect::Policy::none());

            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }

            if let Some(url) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
                let proxy = Proxy::all(url).map_err(|source| ChromeSettingError::Proxy {
                    url: url.to_string(),
                    source,
                })?;
                builder = builder.proxy(proxy);
            }

            Ok(Self {
                client: builder.build()?,
            })
        }
    }

    impl HttpClient for ChromeClient {
        type Error = wreq::Error;

        async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, Self::Error> {
            let mut builder = match &request.body {
                Some(body) => self.client.post(&request.url).body(body.clone()),
                None => self.client.get(&request.url),
            };

            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            Ok(RawResponse { status, body })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn builds_with_default_config() {
            assert!(ChromeClient::new(&ClientConfig::default()).is_ok());
        }

        #[test]
        fn rejects_cookie_with_newline() {
            let config = ClientConfig::default().cookie("sid=1\r\nX-Injected: yes");
            assert!(matches!(
                ChromeClient::new(&config),
                Err(ChromeSettingError::InvalidHeader { name }) if name == "Cookie"
            ));
        }
    }
}

#[cfg(feature = "chrome-tls")]
pub use chrome_impl::{ChromeClient, ChromeSettingError};
