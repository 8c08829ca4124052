// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixtures shared by unit tests.

use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{hash_password, TokenCodec};
use crate::models::User;
use crate::state::AppState;
use crate::store::{CredentialStore, InMemoryStore};

pub const PRIMARY_PRIVATE_PEM: &str = include_str!("auth/testdata/primary_private.pem");
pub const PRIMARY_PUBLIC_PEM: &str = include_str!("auth/testdata/primary_public.pem");
pub const OTHER_PRIVATE_PEM: &str = include_str!("auth/testdata/other_private.pem");
pub const OTHER_PUBLIC_PEM: &str = include_str!("auth/testdata/other_public.pem");

pub const TEST_PASSWORD: &str = "Test123";

fn codec(private_pem: &str, public_pem: &str) -> TokenCodec {
    TokenCodec::new(
        EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap(),
        DecodingKey::from_rsa_pem(public_pem.as_bytes()).unwrap(),
    )
}

/// Codec backed by the key pair the test server trusts.
pub fn test_codec() -> TokenCodec {
    codec(PRIMARY_PRIVATE_PEM, PRIMARY_PUBLIC_PEM)
}

/// Codec backed by an unrelated key pair.
pub fn other_codec() -> TokenCodec {
    codec(OTHER_PRIVATE_PEM, OTHER_PUBLIC_PEM)
}

pub fn test_state() -> AppState {
    AppState::new(InMemoryStore::new(), test_codec(), Duration::hours(1))
}

/// Register a user with [`TEST_PASSWORD`] and return a bearer header value
/// for them.
pub async fn seed_user(state: &AppState, id: &str, email: &str) -> String {
    let user = User {
        id: id.to_string(),
        name: format!("User {id}"),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        rating: 0,
    };
    state.store.write().await.insert(user).unwrap();
    bearer(state, id)
}

pub fn bearer(state: &AppState, user_id: &str) -> String {
    let token = state.tokens.issue(user_id, Duration::hours(1)).unwrap();
    format!("Bearer {token}")
}

/// Send a request through `app` and return the status with the body parsed
/// as JSON (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header(AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
