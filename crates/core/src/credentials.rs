//! Registration rules for usernames and passwords.

use crate::error::CoreError;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Upper bound on stored usernames.
pub const MAX_USERNAME_LENGTH: usize = 100;

/// Check a registration request before any hashing happens.
///
/// Usernames are stored exactly as given (case-sensitive); this only rejects
/// blank or oversized values.
pub fn validate_registration(username: &str, password: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("Username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters long"
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
