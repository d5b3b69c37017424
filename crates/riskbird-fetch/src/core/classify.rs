use serde_json::Value;

use crate::error::{Error, Result};

const QUOTA_STATE: &str = "limit:auth";

/// Turn a raw HTTP response into the body on success or a typed failure.
///
/// | status | outcome |
/// |---|---|
/// | 200, `state == "limit:auth"` | [`Error::QuotaExceeded`] |
/// | 200 | body |
/// | 403 | [`Error::IpBlocked`] |
/// | 401 | [`Error::AuthExpired`] |
/// | 302 | [`Error::AuthStale`] |
/// | 404 | [`Error::NotFound`] |
/// | other | [`Error::UnknownStatus`] |
///
/// A 200 body that is not JSON is still a success; decoding is up to the caller.
pub fn classify(status: u16, body: String, url: &str) -> Result<String> {
    match status {
        200 => {
            let quota_hit = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("state").and_then(Value::as_str).map(|s| s == QUOTA_STATE))
                .unwrap_or(false);
            if quota_hit {
                Err(Error::QuotaExceeded)
            } else {
                Ok(body)
            }
        }
        403 => Err(Error::IpBlocked),
        401 => Err(Error::AuthExpired),
        302 => Err(Error::AuthStale),
        404 => Err(Error::NotFound {
            url: url.to_string(),
        }),
        other => Err(Error::UnknownStatus(other)),
    }
}
