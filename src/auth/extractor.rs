// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction and the `CurrentUser` extractor.
//!
//! Protected handlers take the identity the auth gate resolved:
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(identity): CurrentUser) -> impl IntoResponse {
//!     // identity.user_id is the token subject
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, AuthenticatedIdentity};

/// Return the token from an `Authorization: <scheme> <token>` header.
///
/// The header is split on single spaces and the second segment returned only
/// when there are exactly two. Anything else, including a missing header,
/// yields an empty string. The scheme word itself is not checked.
pub fn extract_bearer(headers: &HeaderMap) -> String {
    let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };

    let segments: Vec<&str> = value.split(' ').collect();
    match segments.as_slice() {
        [_, token] => (*token).to_string(),
        _ => String::new(),
    }
}

/// Identity of the caller, as stored by the auth gate.
///
/// Only meaningful on routes behind [`require_auth`](super::require_auth);
/// elsewhere it rejects with `401`.
pub struct CurrentUser(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_identity(parts)
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::MissingToken)
    }
}

/// Read the identity the auth gate stored for this request.
pub fn current_identity(parts: &Parts) -> Option<&AuthenticatedIdentity> {
    parts.extensions.get::<AuthenticatedIdentity>()
}
