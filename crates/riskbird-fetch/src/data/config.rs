use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::core::{CATEGORY_PAGE_SIZE, retry_delay};

pub const DEFAULT_BASE_URL: &str = "https://www.riskbird.com";

/// Client settings, fixed for the lifetime of a [`Client`](crate::Client).
///
/// Every field has a default so partial TOML files and environment overrides
/// deserialize cleanly.
///
/// # Examples
///
/// ```
/// use riskbird_fetch::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .cookie("sid=abc")
///     .proxy("http://127.0.0.1:8080")
///     .delay_secs(2);
/// assert_eq!(config.delay(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Cookie header copied from a logged-in browser session.
    pub cookie: Option<String>,

    /// Replaces the built-in browser user agent.
    pub user_agent: Option<String>,

    /// Proxy URL applied to every request.
    pub proxy: Option<String>,

    /// Per-request timeout in minutes. `0` disables the timeout.
    ///
    /// Default: 5
    pub timeout_minutes: u64,

    /// Pause before every request, in seconds.
    ///
    /// Default: 1
    pub delay_secs: u64,

    /// Records requested per category page.
    ///
    /// Default: 100
    pub page_size: u32,

    /// Scheme and host of the provider.
    ///
    /// Default: `https://www.riskbird.com`
    pub base_url: String,

    pub retry: RetryPolicy,
    pub session: SessionPolicy,
    pub absorb: AbsorbPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            user_agent: None,
            proxy: None,
            timeout_minutes: 5,
            delay_secs: 1,
            page_size: CATEGORY_PAGE_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            session: SessionPolicy::default(),
            absorb: AbsorbPolicy::default(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn timeout_minutes(mut self, minutes: u64) -> Self {
        self.timeout_minutes = minutes;
        self
    }

    #[must_use]
    pub fn delay_secs(mut self, secs: u64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Values below 1 are raised to 1.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn session(mut self, session: SessionPolicy) -> Self {
        self.session = session;
        self
    }

    #[must_use]
    pub fn absorb(mut self, absorb: AbsorbPolicy) -> Self {
        self.absorb = absorb;
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_minutes > 0)
            .then(|| Duration::from_secs(self.timeout_minutes.saturating_mul(60)))
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Growth of the cooldown between network retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    /// Same cooldown before every retry.
    #[default]
    Fixed,
    /// `cooldown * (n + 1)` before retry `n`.
    Linear,
    /// `cooldown * 2^n` before retry `n`.
    Exponential,
}

/// Retry behaviour for network-level failures.
///
/// HTTP responses are never retried: any status code is classified and
/// returned. Only failures to obtain a response at all go through this policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `None` retries until a response arrives.
    ///
    /// Default: `None`
    pub max_retries: Option<u32>,

    /// Base cooldown in seconds.
    ///
    /// Default: 5
    pub cooldown_secs: u64,

    /// Default: [`Backoff::Fixed`]
    pub backoff: Backoff,

    /// Upper bound for a single cooldown, in seconds.
    ///
    /// Default: 300
    pub max_cooldown_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: None,
            cooldown_secs: 5,
            backoff: Backoff::Fixed,
            max_cooldown_secs: 300,
        }
    }
}

impl RetryPolicy {
    /// Give up after `max_retries` retries.
    #[must_use]
    pub fn capped(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    #[must_use]
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn cooldown_secs(mut self, secs: u64) -> Self {
        self.cooldown_secs = secs;
        self
    }

    /// Cooldown before retry `retry_count` (0 = first retry).
    pub fn delay(&self, retry_count: u32) -> Duration {
        let base = Duration::from_secs(self.cooldown_secs);
        let delay = match self.backoff {
            Backoff::Fixed => base,
            Backoff::Linear => base.saturating_mul(retry_count.saturating_add(1)),
            Backoff::Exponential => retry_delay(retry_count, base),
        };
        delay.min(Duration::from_secs(self.max_cooldown_secs))
    }

    /// Whether another retry is allowed after `retries` have been spent.
    pub fn allows(&self, retries: u32) -> bool {
        self.max_retries.is_none_or(|max| retries < max)
    }
}

/// How session tokens (`orderNo`) are reused between page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionPolicy {
    /// Resolve a fresh token before every page request.
    #[default]
    AlwaysRefresh,
    /// Reuse a token for the same entity until it is `ttl_secs` old.
    Cache { ttl_secs: u64 },
}

impl SessionPolicy {
    pub fn ttl(&self) -> Option<Duration> {
        match self {
            SessionPolicy::AlwaysRefresh => None,
            SessionPolicy::Cache { ttl_secs } => Some(Duration::from_secs(*ttl_secs)),
        }
    }
}

/// Whether a server-side failure on page 1 of a category means "no records".
///
/// The provider answers some empty categories with an unspecified server error
/// rather than an empty page. When absorption applies, such an error on the
/// first page yields an empty result; on later pages it always propagates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsorbPolicy {
    /// Default: true
    pub enabled: bool,
    /// Categories whose page-1 errors always propagate.
    pub exempt: Vec<Category>,
}

impl Default for AbsorbPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            exempt: Vec::new(),
        }
    }
}

impl AbsorbPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            exempt: Vec::new(),
        }
    }

    #[must_use]
    pub fn exempt(mut self, category: Category) -> Self {
        self.exempt.push(category);
        self
    }

    pub fn absorbs(&self, category: Category) -> bool {
        self.enabled && !self.exempt.contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_provider_integration() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Some(Duration::from_secs(300)));
        assert_eq!(config.delay(), Duration::from_secs(1));
        assert_eq!(config.page_size, 100);
        assert_eq!(config.retry.max_retries, None);
        assert_eq!(config.retry.delay(0), Duration::from_secs(5));
        assert_eq!(config.session, SessionPolicy::AlwaysRefresh);
        assert!(config.absorb.absorbs(Category::PropertyIcp));
    }

    #[test]
    fn zero_timeout_disables_it() {
        assert_eq!(ClientConfig::default().timeout_minutes(0).timeout(), None);
    }

    #[test]
    fn huge_timeout_saturates() {
        let config = ClientConfig::default().timeout_minutes(u64::MAX);
        assert_eq!(config.timeout(), Some(Duration::from_secs(u64::MAX)));
    }

    #[test]
    fn base_strips_trailing_slash() {
        let config = ClientConfig::default().base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base(), "http://127.0.0.1:9000");
    }

    #[test]
    fn backoff_shapes() {
        let fixed = RetryPolicy::default();
        assert_eq!(fixed.delay(3), Duration::from_secs(5));

        let linear = RetryPolicy::default().backoff(Backoff::Linear);
        assert_eq!(linear.delay(0), Duration::from_secs(5));
        assert_eq!(linear.delay(2), Duration::from_secs(15));

        let exponential = RetryPolicy::default().backoff(Backoff::Exponential);
        assert_eq!(exponential.delay(0), Duration::from_secs(5));
        assert_eq!(exponential.delay(3), Duration::from_secs(40));
        assert_eq!(exponential.delay(20), Duration::from_secs(300));
    }

    #[test]
    fn retry_budget() {
        let unbounded = RetryPolicy::default();
        assert!(unbounded.allows(u32::MAX - 1));

        let capped = RetryPolicy::default().capped(2);
        assert!(capped.allows(0));
        assert!(capped.allows(1));
        assert!(!capped.allows(2));
    }

    #[test]
    fn absorb_exemptions() {
        let policy = AbsorbPolicy::default().exempt(Category::PropertyJob);
        assert!(policy.absorbs(Category::PropertyApp));
        assert!(!policy.absorbs(Category::PropertyJob));
        assert!(!AbsorbPolicy::disabled().absorbs(Category::PropertyApp));
    }

    #[test]
    fn deserializes_partial_documents() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "cookie": "sid=1",
            "retry": { "max_retries": 4, "backoff": "exponential" },
            "session": { "mode": "cache", "ttl_secs": 60 },
            "absorb": { "exempt": ["propertyJob"] }
        }))
        .unwrap();

        assert_eq!(config.cookie.as_deref(), Some("sid=1"));
        assert_eq!(config.delay_secs, 1);
        assert_eq!(config.retry.max_retries, Some(4));
        assert_eq!(config.retry.cooldown_secs, 5);
        assert_eq!(config.retry.backoff, Backoff::Exponential);
        assert_eq!(config.session.ttl(), Some(Duration::from_secs(60)));
        assert!(config.absorb.enabled);
        assert!(!config.absorb.absorbs(Category::PropertyJob));
    }
}
