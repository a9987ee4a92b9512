use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an access token.
///
/// Deliberately minimal: the subject (a username) and the expiry instant.
/// Validity is determined solely by signature and `exp` at verification
/// time; nothing is persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject` expiring `ttl` from now.
    pub fn for_subject(subject: impl Into<String>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}
