//! JWT validation for the listing service.
//!
//! Tokens are issued by the external auth service and validated here with
//! RS256 only; no symmetric fallback, to rule out algorithm confusion
//! attacks. The public key is loaded once at startup and immutable
//! afterwards.
use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// JWT claims consumed by this service. The subject is the acting user id;
/// any further claims the issuer adds are ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Initialize the validation key from a PEM-formatted RSA public key.
///
/// Must be called during startup before any token validation. Can only be
/// called once; subsequent calls return an error.
pub fn initialize_validation_key(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT key not initialized. Call initialize_validation_key() during startup.")
    })
}

/// Validate a token and return its claims.
///
/// Fails on bad signature, wrong algorithm, or expiry.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;
    let validation = Validation::new(JWT_ALGORITHM);

    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    // Throwaway 2048-bit keypair used only by this test module.
    const TEST_PRIVATE_KEY_PEM: &str = include_str!("../../tests/fixtures/jwt_test_key.pem");
    const TEST_PUBLIC_KEY_PEM: &str = include_str!("../../tests/fixtures/jwt_test_key.pub.pem");

    fn init_test_key() {
        // Other tests in the binary may already have installed the key.
        let _ = initialize_validation_key(TEST_PUBLIC_KEY_PEM);
    }

    fn sign(claims: &Claims) -> String {
        let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap();
        encode(&Header::new(JWT_ALGORITHM), claims, &key).unwrap()
    }

    #[test]
    fn test_valid_token_round_trip() {
        init_test_key();

        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let token = sign(&Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        });

        let data = validate_token(&token).unwrap();
        assert_eq!(data.claims.sub, user_id.to_string());
    }

    #[test]
    fn test_expired_token_rejected() {
        init_test_key();

        let now = Utc::now();
        let token = sign(&Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        });

        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        init_test_key();
        assert!(validate_token("not-a-jwt").is_err());
        assert!(validate_token("").is_err());
    }
}
