pub mod error;
pub mod settings;

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use sha2::Sha256;

use self::{settings::TokenSettings, error::{Result, TokenError}};

const USER_ID_CLAIM: &str = "user_id";
const EXPIRES_CLAIM: &str = "expires";

pub trait TokenService: Send + Sync {
    ///
    /// Generates a signed JWT for the user with the given `user_id`,
    /// expiring after the configured lifetime.
    ///
    fn generate_access_token(&self, user_id: i64) -> Result<String>;

    ///
    /// Verifies a JWT `access_token`, and returns the user ID from its claims.
    /// Returns `Error` if the signature does not match or the token is stale
    ///
    fn verify_access_token(&self, access_token: &str) -> Result<i64>;

    ///
    /// Whether the given bearer `token` is the configured admin secret
    ///
    fn is_admin_token(&self, token: &str) -> bool;
}

#[derive(Clone)]
pub struct CoreTokenService {
    settings: TokenSettings,
    secret: String,
    admin_secret: Option<String>,
}

impl CoreTokenService {
    pub fn new(settings: TokenSettings, secret: String, admin_secret: Option<String>) -> Self {
        Self { settings, secret, admin_secret }
    }

    fn key(&self) -> Result<Hmac<Sha256>> {
        Hmac::new_from_slice(self.secret.as_bytes()).map_err(|_| TokenError::InvalidKey)
    }
}

impl TokenService for CoreTokenService {
    fn generate_access_token(&self, user_id: i64) -> Result<String> {
        let key = self.key()?;

        let mut claims = BTreeMap::new();
        claims.insert(USER_ID_CLAIM, user_id.to_string());

        let expires = (Utc::now() + Duration::seconds(self.settings.jwt_lifetime_s)).to_rfc3339();
        claims.insert(EXPIRES_CLAIM, expires);

        claims.sign_with_key(&key).map_err(TokenError::JwtError)
    }

    fn verify_access_token(&self, access_token: &str) -> Result<i64> {
        let key = self.key()?;

        // Verify the JWT using the hash key
        let mut claims: BTreeMap<String, String> = access_token
            .verify_with_key(&key)
            .map_err(TokenError::JwtError)?;

        // Check the expires claim, and return error if the token is stale
        let expires = claims.get(EXPIRES_CLAIM)
            .and_then(|exp| DateTime::parse_from_rfc3339(exp).ok())
            .ok_or(TokenError::InvalidClaims)?;
        if Utc::now() > expires {
            return Err(TokenError::TokenStale);
        }

        claims.remove(USER_ID_CLAIM)
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or(TokenError::InvalidClaims)
    }

    fn is_admin_token(&self, token: &str) -> bool {
        self.admin_secret.as_deref().map_or(false, |secret| secret == token)
    }
}
