// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied as a route layer over every protected route:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/events", post(create_event))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! A request without a verifiable token is answered with `401` here and
//! never reaches the handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{extract_bearer, AuthError, AuthenticatedIdentity};
use crate::state::AppState;

/// Verify the bearer token and attach the caller's identity to the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_bearer(request.headers());
    if token.is_empty() {
        tracing::debug!(path = %request.uri().path(), "Rejected request without bearer token");
        return AuthError::MissingToken.into_response();
    }

    match state.tokens.verify(&token) {
        Ok(user_id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedIdentity::new(user_id));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                path = %request.uri().path(),
                reason = e.error_code(),
                "Rejected bearer token"
            );
            e.into_response()
        }
    }
}
