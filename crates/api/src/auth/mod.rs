//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`credentials`] -- User registration and active-user lookup.
//! - [`issuer`] -- Verifies credentials and issues access tokens.

pub mod credentials;
pub mod issuer;
pub mod jwt;
pub mod password;
