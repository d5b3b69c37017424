use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use super::http::HttpClient;
use super::transport::Transport;
use crate::data::ClientConfig;

#[cfg(feature = "chrome-tls")]
use super::http::ChromeClient;
#[cfg(feature = "reqwest")]
use super::http::ReqwestClient;
#[cfg(any(feature = "reqwest", feature = "chrome-tls"))]
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct CachedSession {
    pub(crate) token: String,
    pub(crate) issued: Instant,
}

/// RiskBird API client.
///
/// Owns the transport and the configuration for its whole lifetime. All
/// operations are sequential: each awaits its requests one after another and
/// none spawns work, so dropping a future stops the query at the next await.
///
/// Operations are spread over the `effects` submodules:
/// sessions and entity info, single pages, drained categories, search, and
/// the named per-category accessors.
#[derive(Debug)]
pub struct Client<C: HttpClient> {
    pub(crate) transport: Transport<C>,
    pub(crate) config: ClientConfig,
    pub(crate) sessions: Mutex<HashMap<String, CachedSession>>,
}

#[cfg(feature = "reqwest")]
impl Client<ReqwestClient> {
    /// Create a client backed by reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = ReqwestClient::new(&config).map_err(Error::client)?;
        Ok(Self::with_http(http, config))
    }
}

#[cfg(feature = "chrome-tls")]
impl Client<ChromeClient> {
    /// Create a client whose TLS handshake looks like Chrome 124.
    pub fn chrome(config: ClientConfig) -> Result<Self> {
        let http = ChromeClient::new(&config).map_err(Error::client)?;
        Ok(Self::with_http(http, config))
    }
}

impl<C: HttpClient> Client<C> {
    /// Create a client over any [`HttpClient`].
    pub fn with_http(http: C, config: ClientConfig) -> Self {
        let transport = Transport::new(http, config.delay(), config.retry.clone());
        Self {
            transport,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        self.transport.http()
    }

    pub(crate) fn sessions(&self) -> MutexGuard<'_, HashMap<String, CachedSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pause between two pages of the same query.
    pub(crate) async fn pause(&self) {
        let delay = self.config.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
