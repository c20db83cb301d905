//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. There
//! is no refresh token and no server-side session: a token is valid until its
//! `exp` passes.

use bookshelf_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{parse_or, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Principal name -- the username at the time of issuance.
    pub name: String,
    /// Issuer, fixed by deployment configuration.
    pub iss: String,
    /// Audience, fixed by deployment configuration.
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Value written to and required in the `iss` claim.
    pub issuer: String,
    /// Value written to and required in the `aud` claim.
    pub audience: String,
    /// Access token lifetime in minutes (default: 180).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry: three hours.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 180;
const DEFAULT_ISSUER: &str = "bookshelf";
const DEFAULT_AUDIENCE: &str = "bookshelf-clients";

impl JwtConfig {
    /// Load JWT configuration through `lookup`.
    ///
    /// | Env Var                  | Required | Default             |
    /// |--------------------------|----------|---------------------|
    /// | `JWT_SECRET`             | **yes**  | --                  |
    /// | `JWT_ISSUER`             | no       | `bookshelf`         |
    /// | `JWT_AUDIENCE`           | no       | `bookshelf-clients` |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `180`               |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.into());
        let audience = lookup("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.into());
        let access_token_expiry_mins =
            parse_or(lookup, "JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?;

        if access_token_expiry_mins <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_ACCESS_EXPIRY_MINS",
                value: access_token_expiry_mins.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            secret,
            issuer,
            audience,
            access_token_expiry_mins,
        })
    }

    /// Access token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        name: username.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: now + config.expires_in_secs(),
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiration, issuer, and audience.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
