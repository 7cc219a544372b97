// Signed, time-bound identity assertions (HS256)

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub email: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// Issues and verifies access tokens. Constructed once from config and
/// shared behind an `Arc`.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            lifetime: config.access_token_lifetime,
        }
    }

    /// Sign a token asserting the given identity.
    pub fn issue(&self, user_id: i32, email: &str) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.lifetime.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("failed to sign token: {e}"))
    }

    /// Decode and validate a token, checking signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&JwtConfig {
            secret: "test-secret-key".to_string(),
            access_token_lifetime: Duration::from_secs(3600),
        })
    }

    #[test]
    fn issued_token_verifies_with_original_claims() {
        let issuer = issuer();
        let token = issuer.issue(42, "ada@example.com").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let token = issuer().issue(1, "a@b.co").unwrap();

        let other = TokenIssuer::new(&JwtConfig {
            secret: "another-secret!".to_string(),
            access_token_lifetime: Duration::from_secs(3600),
        });
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issuer = issuer();
        let mut token = issuer.issue(1, "a@b.co").unwrap();
        token.pop();
        token.push('A');

        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative lifetime is impossible with Duration, so sign claims
        // with an expiry well past the default validation leeway.
        let config = JwtConfig {
            secret: "test-secret-key".to_string(),
            access_token_lifetime: Duration::from_secs(3600),
        };
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "a@b.co".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(TokenIssuer::new(&config).verify(&token).is_err());
    }
}
