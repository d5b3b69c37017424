//! Error types for riskbird-fetch.

use thiserror::Error;

/// Coarse classification of an [`Error`], used by callers to decide on
/// remediation without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network-level failure that outlived the configured retry budget.
    Transient,
    /// The provider's daily query quota is exhausted.
    Quota,
    /// IP blocked or cookie expired, stale or missing.
    Access,
    /// Nothing exists at the requested URL, or nothing matched a keyword.
    NotFound,
    /// The provider answered with a non-success envelope or status.
    Protocol,
    /// The provider's response could not be decoded.
    Parse,
    /// The client could not be constructed from its configuration.
    Setup,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("daily query limit reached, supply a fresh cookie")]
    QuotaExceeded,

    #[error("IP address blocked by the provider, switch to another IP")]
    IpBlocked,

    #[error("cookie rejected or expired, obtain a new one")]
    AuthExpired,

    #[error("cookie needs to be refreshed")]
    AuthStale,

    #[error("request failed with 404: {url}")]
    NotFound { url: String },

    #[error("unknown error: HTTP status {0}")]
    UnknownStatus(u16),

    #[error("network failure persisted after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no session token (orderNo) issued for entity {entity}")]
    MissingSession { entity: String },

    #[error("category query failed: code={code}, msg={message}")]
    CategoryQueryFailed { code: String, message: String },

    #[error("search failed: {0}")]
    SearchFailed(String),

    #[error("no entity matched keyword: {0}")]
    KeywordNotFound(String),

    #[error("malformed provider response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RetriesExhausted { .. } => ErrorKind::Transient,
            Error::QuotaExceeded => ErrorKind::Quota,
            Error::IpBlocked | Error::AuthExpired | Error::AuthStale | Error::MissingSession { .. } => {
                ErrorKind::Access
            }
            Error::NotFound { .. } | Error::KeywordNotFound(_) => ErrorKind::NotFound,
            Error::UnknownStatus(_) | Error::CategoryQueryFailed { .. } | Error::SearchFailed(_) => {
                ErrorKind::Protocol
            }
            Error::Json(_) => ErrorKind::Parse,
            Error::Client(_) => ErrorKind::Setup,
        }
    }

    /// Whether the provider reported an unspecified server-side failure.
    ///
    /// Categories without data are known to answer page 1 with such an error
    /// instead of an empty page, so [`AbsorbPolicy`](crate::AbsorbPolicy) may
    /// treat it as "no records". Matches a 5xx HTTP status, an envelope code
    /// containing `500`, or an "unknown error" message.
    pub fn is_server_unknown(&self) -> bool {
        match self {
            Error::UnknownStatus(status) => (500..600).contains(status),
            Error::CategoryQueryFailed { code, message } => {
                code.contains("500")
                    || message.contains("未知错误")
                    || message.to_ascii_lowercase().contains("unknown error")
            }
            _ => false,
        }
    }

    pub(crate) fn client(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Client(Box::new(e))
    }
}
