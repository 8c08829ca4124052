// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RSA key material for signing and verifying tokens.
//!
//! Keys are PEM encoded. The private key must be a PKCS#1 `RSA PRIVATE KEY`
//! block and the public key an SPKI `PUBLIC KEY` block. Either can come from
//! a file or be embedded directly in an environment variable.

use std::path::PathBuf;

use jsonwebtoken::{DecodingKey, EncodingKey};

use super::AuthError;

/// PEM label expected on the signing key.
pub const PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
/// PEM label expected on the verification key.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Where a PEM document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// PEM text held directly (e.g. from an environment variable)
    Inline(String),
    /// Path to a PEM file
    File(PathBuf),
}

impl KeySource {
    fn read(&self) -> Result<Vec<u8>, AuthError> {
        match self {
            // Single-line env values usually carry escaped newlines.
            KeySource::Inline(pem) => Ok(pem.replace("\\n", "\n").into_bytes()),
            KeySource::File(path) => std::fs::read(path).map_err(|e| {
                AuthError::KeyUnavailable(format!("cannot read {}: {e}", path.display()))
            }),
        }
    }

    fn describe(&self) -> String {
        match self {
            KeySource::Inline(_) => "inline".to_string(),
            KeySource::File(path) => path.display().to_string(),
        }
    }
}

/// Loads the signing and verification keys from their configured sources.
#[derive(Debug, Clone)]
pub struct KeyProvider {
    signing: KeySource,
    verification: KeySource,
}

impl KeyProvider {
    pub fn new(signing: KeySource, verification: KeySource) -> Self {
        Self {
            signing,
            verification,
        }
    }

    /// Load the private key used to sign tokens.
    pub fn load_signing_key(&self) -> Result<EncodingKey, AuthError> {
        let raw = read_labelled(&self.signing, PRIVATE_KEY_LABEL)?;
        let key = EncodingKey::from_rsa_pem(&raw).map_err(|e| {
            AuthError::KeyUnavailable(format!("invalid RSA private key: {e}"))
        })?;
        tracing::debug!(source = %self.signing.describe(), "Loaded token signing key");
        Ok(key)
    }

    /// Load the public key used to verify tokens.
    pub fn load_verification_key(&self) -> Result<DecodingKey, AuthError> {
        let raw = read_labelled(&self.verification, PUBLIC_KEY_LABEL)?;
        let key = DecodingKey::from_rsa_pem(&raw).map_err(|e| {
            AuthError::KeyUnavailable(format!("invalid RSA public key: {e}"))
        })?;
        tracing::debug!(source = %self.verification.describe(), "Loaded token verification key");
        Ok(key)
    }
}

/// Read a PEM document and check its block label before handing it on.
fn read_labelled(source: &KeySource, label: &str) -> Result<Vec<u8>, AuthError> {
    let raw = source.read()?;
    let block = pem::parse(&raw)
        .map_err(|e| AuthError::KeyUnavailable(format!("failed to decode PEM block: {e}")))?;

    if block.tag() != label {
        return Err(AuthError::KeyUnavailable(format!(
            "expected PEM block '{label}', found '{}'",
            block.tag()
        )));
    }

    Ok(raw)
}
