//! Credential verification and access-token issuance.

use bookshelf_core::error::CoreError;
use bookshelf_core::types::DbId;
use bookshelf_db::models::user::User;
use bookshelf_db::DbPool;

use crate::auth::credentials::find_active_by_username;
use crate::auth::jwt::{generate_access_token, validate_token, Claims, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds from issuance.
    pub expires_in: i64,
    pub user_id: DbId,
}

/// Plaintext behind the decoy hash. Never a real credential.
const DECOY_PASSWORD: &str = "bookshelf-decoy-credential";

/// Turns verified credentials into signed, time-bounded access tokens.
///
/// Holds the signing configuration for the life of the process; nothing
/// about issued tokens is remembered.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: JwtConfig,
    /// Argon2id hash verified when the username is unknown, so that path
    /// costs the same as a wrong password.
    decoy_hash: Option<String>,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        let decoy_hash = match hash_password(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Could not prepare decoy password hash");
                None
            }
        };
        Self { config, decoy_hash }
    }

    /// Verify `password` for the active user `username` and issue a token.
    ///
    /// An unknown or deleted user and a wrong password both fail with the
    /// same [`CoreError::InvalidCredentials`].
    pub async fn authenticate(
        &self,
        pool: &DbPool,
        username: &str,
        password: &str,
    ) -> AppResult<IssuedToken> {
        let Some(user) = find_active_by_username(pool, username).await? else {
            self.verify_decoy(password);
            tracing::debug!("Login rejected");
            return Err(CoreError::InvalidCredentials.into());
        };

        let password_valid = verify_password(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !password_valid {
            tracing::debug!("Login rejected");
            return Err(CoreError::InvalidCredentials.into());
        }

        let issued = self.issue(&user)?;
        tracing::info!(user_id = user.id, "Access token issued");
        Ok(issued)
    }

    fn verify_decoy(&self, password: &str) {
        if let Some(hash) = &self.decoy_hash {
            // The outcome is irrelevant; only the work matters.
            let _ = verify_password(password, hash);
        }
    }

    /// Sign a token for `user` without checking credentials.
    pub fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        let token = generate_access_token(user.id, &user.username, &self.config)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
        Ok(IssuedToken {
            token,
            expires_in: self.config.expires_in_secs(),
            user_id: user.id,
        })
    }

    /// Check a presented token's signature, issuer, audience and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        validate_token(token, &self.config)
    }
}
