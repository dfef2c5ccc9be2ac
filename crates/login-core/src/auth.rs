//! Password hashing and JWT token management

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::error::{Error, Result};
use crate::models::Claims;

/// Fixed token lifetime: one hour from issuance.
const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Environment variable overriding the signing secret. Without it a fresh
/// random key is generated, so tokens do not survive a process restart.
pub const JWT_SECRET_ENV: &str = "LOGIN_JWT_SECRET";

const GENERATED_SECRET_LEN: usize = 64;

/// Hash a password with a fresh salt
pub fn hash_password(password: &str) -> std::result::Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Verify a password against a stored hash
pub fn verify_password(
    password: &str,
    hash: &str,
) -> std::result::Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Issues and verifies HS256 tokens under a process-wide signing key.
///
/// The key is created once at startup and held in memory only; there is no
/// persistence or rotation.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    /// Build a service around an explicit secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime: Duration::seconds(TOKEN_LIFETIME_SECS),
        }
    }

    /// Build a service from `LOGIN_JWT_SECRET`, or a random per-process key
    /// when the variable is unset.
    pub fn from_env() -> Self {
        match std::env::var(JWT_SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => {
                if secret.len() < 32 {
                    log::warn!("{JWT_SECRET_ENV} is shorter than 32 characters");
                }
                Self::new(secret.as_bytes())
            }
            _ => {
                log::info!(
                    "{JWT_SECRET_ENV} not set, generating a random key; \
                     tokens will not survive a restart"
                );
                let mut rng = rand::thread_rng();
                let secret: Vec<u8> = (0..GENERATED_SECRET_LEN).map(|_| rng.gen::<u8>()).collect();
                Self::new(&secret)
            }
        }
    }

    /// Issue a signed token for `subject`, expiring one hour after `now`.
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Decode the subject out of a token without checking the signature or
    /// expiry. Fails with [`Error::MalformedToken`] when the token cannot be
    /// parsed at all.
    pub fn extract_subject(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| Error::MalformedToken)?;
        Ok(data.claims.sub)
    }

    /// True iff the token's signature is valid under the current key, its
    /// subject equals `expected_subject`, and it has not expired. Every
    /// failure mode answers `false`; this never errors.
    pub fn verify(&self, token: &str, expected_subject: &str) -> bool {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims.sub == expected_subject,
            Err(_) => false,
        }
    }
}
