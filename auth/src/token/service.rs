use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Configuration for [`TokenService`].
///
/// Injected at construction; the service never reads ambient process state.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret for signing tokens. Should be at least 32 bytes.
    pub secret: String,

    /// Access token lifetime in minutes.
    pub access_token_ttl_minutes: i64,
}

/// Issues and verifies signed, time-limited bearer tokens (JWT, HS256).
///
/// Verification is stateless: a token is valid iff the signature matches
/// and `exp` has not passed. There is no early revocation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(config.access_token_ttl_minutes),
        }
    }

    /// Issue a token for `subject` with the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - signing failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.access_token_ttl)
    }

    /// Issue a token for `subject` with an explicit lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - signing failed
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::for_subject(subject, ttl);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// Never panics on attacker-controlled input.
    ///
    /// # Errors
    /// * `Expired` - `exp` has passed
    /// * `Invalid` - bad signature, malformed payload, or missing claims
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // No leeway: expiry behavior at the boundary is deterministic.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims.sub)
    }
}
