//! I/O operations: the HTTP seam, the retrying transport and the client
//! operations built on top of it.
//!
//! Everything that touches the network lives here; request encoding and
//! response decoding stay in [`core`](crate::core).

mod accessors;
mod aggregator;
mod client;
mod fetcher;
mod http;
mod mock;
mod search;
mod session;
mod transport;

pub use client::Client;
pub use http::{HttpClient, RawResponse};
pub use mock::{MockHttpClient, MockNetworkError};
pub use transport::Transport;

#[cfg(feature = "reqwest")]
pub use http::{ClientSettingError, ReqwestClient};

#[cfg(feature = "chrome-tls")]
pub use http::{ChromeClient, ChromeSettingError};
