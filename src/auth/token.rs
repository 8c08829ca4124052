// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RS256 token issuance and verification.
//!
//! Tokens are compact JWS strings carrying only `sub` and `exp`. There is no
//! server-side record of an issued token: a token stays valid until its
//! embedded expiry.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AuthError, KeyProvider};

/// Algorithm used for every issued token.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Header algorithms accepted on verification (the RSA PKCS#1 v1.5 family).
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Claims written into issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

#[derive(Deserialize)]
struct RawHeader {
    #[serde(default)]
    alg: Option<String>,
}

/// Signs and verifies bearer tokens with a fixed RSA key pair.
///
/// Built once at startup from a [`KeyProvider`] and shared read-only.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Load both keys from the provider.
    pub fn from_provider(provider: &KeyProvider) -> Result<Self, AuthError> {
        Ok(Self::new(
            provider.load_signing_key()?,
            provider.load_verification_key()?,
        ))
    }

    /// Issue a token for `subject` expiring `lifespan` from now.
    pub fn issue(&self, subject: &str, lifespan: Duration) -> Result<String, AuthError> {
        let expires_at = Utc::now()
            .checked_add_signed(lifespan)
            .ok_or_else(|| AuthError::Signing("token expiry is out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify `token` and return its subject.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        check_algorithm(token)?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // `exp` is checked below as a signed number, with no leeway.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        let token_data = decode::<Map<String, Value>>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    AuthError::WrongAlgorithm
                }
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                ErrorKind::MissingRequiredClaim(_) | ErrorKind::Json(_) => {
                    AuthError::MalformedClaims
                }
                _ => AuthError::InvalidToken,
            })?;

        let claims = token_data.claims;

        let exp = claims
            .get("exp")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .ok_or(AuthError::MalformedClaims)?;
        if exp <= Utc::now().timestamp() {
            return Err(AuthError::ExpiredToken);
        }

        claims
            .get("sub")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(AuthError::MalformedClaims)
    }
}

/// Reject any token whose header does not declare an RSA algorithm.
///
/// Runs before signature verification, so `none` and HMAC tokens never reach
/// the key.
fn check_algorithm(token: &str) -> Result<(), AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::InvalidToken);
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::InvalidToken)?;
    let header: RawHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| AuthError::InvalidToken)?;

    let accepted = header
        .alg
        .as_deref()
        .and_then(|alg| alg.parse::<Algorithm>().ok())
        .is_some_and(|alg| ACCEPTED_ALGORITHMS.contains(&alg));

    if accepted {
        Ok(())
    } else {
        Err(AuthError::WrongAlgorithm)
    }
}
