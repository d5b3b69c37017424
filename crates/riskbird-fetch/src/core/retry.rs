use std::time::Duration;

/// Calculate the delay before a retry attempt using exponential backoff.
///
/// The delay formula is: `base * 2^retry_count`, saturating instead of
/// overflowing.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use riskbird_fetch::retry_delay;
///
/// assert_eq!(retry_delay(0, Duration::from_secs(5)), Duration::from_secs(5));
/// assert_eq!(retry_delay(1, Duration::from_secs(5)), Duration::from_secs(10));
/// assert_eq!(retry_delay(2, Duration::from_secs(5)), Duration::from_secs(20));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}
