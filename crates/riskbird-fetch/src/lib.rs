//! Paginated retrieval of business-registry records from the RiskBird API.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration, categories, pages and typed records
//! - [`core`] - Pure transformations: request encoding, response classification,
//!   envelope decoding and the drain-to-completion state machine
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Drain-to-completion**: a category query is paged until the reported total
//!   is reached or a short page arrives, whichever comes first
//! - **Typed failures**: quota, access and protocol errors surface as [`Error`]
//!   variants; network failures are retried inside the transport
//! - **Sequential**: every request waits for the configured delay and no two
//!   requests are ever in flight at once
//!
//! # Features
//!
//! - `reqwest` (default): [`ReqwestClient`] and [`Client::new`]
//! - `chrome-tls`: `ChromeClient` and `Client::chrome`, which present a Chrome
//!   124 TLS fingerprint through `wreq`. The provider may reject handshakes
//!   that do not look like the browser named in the user agent.
//!
//! # Example
//!
//! ```no_run
//! use riskbird_fetch::{Category, Client, ClientConfig};
//!
//! # async fn run() -> riskbird_fetch::Result<()> {
//! let client = Client::new(ClientConfig::default().cookie("sid=..."))?;
//! let records = client.fetch_all("91110000000000000X", Category::PropertyIcp).await?;
//! println!("{} ICP filings", records.len());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{ApiRequest, Drain, DrainStep, Endpoint, HttpMethod, retry_delay};
pub use crate::data::{
    AbsorbPolicy, AppInfo, Backoff, BranchInfo, Category, CategoryRecord, ClientConfig,
    CompanyInfo, CopyrightInfo, EntityInfo, IcpInfo, InvestInfo, JobInfo, Page, PartnerInfo,
    RetryPolicy, SearchResult, SessionPolicy, WxAppInfo,
};
pub use crate::effects::{Client, HttpClient, MockHttpClient, MockNetworkError, RawResponse, Transport};

#[cfg(feature = "reqwest")]
pub use crate::effects::{ClientSettingError, ReqwestClient};

#[cfg(feature = "chrome-tls")]
pub use crate::effects::{ChromeClient, ChromeSettingError};

pub use error::{Error, ErrorKind, Result};
