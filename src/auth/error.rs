// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Body sent with every rejected authentication attempt.
pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// Authentication error type.
///
/// Verification failures keep their distinct kind so they can be logged and
/// tested, but all of them render as the same `401 Unauthorized` response.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Key material could not be read or decoded
    #[error("Key material unavailable: {0}")]
    KeyUnavailable(String),
    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    Signing(String),
    /// No bearer token in the request
    #[error("No bearer token presented")]
    MissingToken,
    /// Token is unparseable or its signature does not verify
    #[error("Token is invalid")]
    InvalidToken,
    /// Signature is valid but the expiry has passed
    #[error("Token has expired")]
    ExpiredToken,
    /// Header declares an algorithm outside the RSA family
    #[error("Token algorithm is not accepted")]
    WrongAlgorithm,
    /// `sub` or `exp` is absent or of the wrong type
    #[error("Token claims are malformed")]
    MalformedClaims,
}

impl AuthError {
    /// Short machine-readable kind, used in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::KeyUnavailable(_) => "key_unavailable",
            AuthError::Signing(_) => "signing_error",
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
            AuthError::WrongAlgorithm => "wrong_algorithm",
            AuthError::MalformedClaims => "malformed_claims",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::KeyUnavailable(_) | AuthError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::WrongAlgorithm
            | AuthError::MalformedClaims => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::UNAUTHORIZED {
            // The kind is never exposed to the client.
            return (
                status,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                UNAUTHORIZED_BODY,
            )
                .into_response();
        }

        ApiError::internal("Internal authentication error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn verification_failures_share_one_plain_text_401() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::WrongAlgorithm,
            AuthError::MalformedClaims,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body_bytes[..], UNAUTHORIZED_BODY.as_bytes());
        }
    }

    #[tokio::test]
    async fn signing_failure_returns_500_json() {
        let response = AuthError::Signing("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Internal authentication error");
    }

    #[test]
    fn error_codes_are_distinct() {
        assert_eq!(AuthError::ExpiredToken.error_code(), "expired_token");
        assert_eq!(AuthError::WrongAlgorithm.error_code(), "wrong_algorithm");
        assert_ne!(
            AuthError::InvalidToken.error_code(),
            AuthError::MalformedClaims.error_code()
        );
    }
}
