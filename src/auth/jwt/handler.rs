//! Core JWT handler implementation

use super::types::{Claims, ISSUER, JwtHandler, TokenError};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler over a shared symmetric secret
    pub fn new(secret: &str) -> Self {
        let secret = secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed access token for `subject` valid for `ttl`
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        let now = Self::now();
        // Claims have whole-second precision; round up so a sub-second ttl is not born expired
        let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
        let ttl = i64::try_from(secs)
            .map_err(|_| TokenError::Signing("token lifetime out of range".to_string()))?;

        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        debug!("Issued access token for user: {}", subject);
        Ok(token)
    }

    /// Verify a signed access token and return its subject
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode_claims(token)?;

        // Expired iff now >= exp; no leeway.
        if Self::now() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| TokenError::BadSubject)
    }

    /// Check signature and structure, leaving expiry to the caller
    pub(super) fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}
