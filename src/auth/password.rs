// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing for stored credentials.
//!
//! Argon2id with the crate's default cost parameters. Each hash carries its
//! own random salt in PHC string format, so two hashes of the same password
//! never match textually.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::warn!(error = %err, "Password hashing subsystem error");
        ApiError::bad_request("Unable to process password")
    }
}

/// Hash `plaintext` with a fresh salt.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Check `plaintext` against a stored hash.
///
/// Returns `Ok(false)` only when the password does not match; a stored hash
/// that cannot be parsed is an error.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::Hashing(e.to_string()))?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hashing(e.to_string())),
    }
}
