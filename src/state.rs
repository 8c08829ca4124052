// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;

use crate::auth::TokenCodec;
use crate::store::InMemoryStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    /// Signs tokens at login and verifies them at the auth gate.
    pub tokens: Arc<TokenCodec>,
    /// Lifetime of tokens issued at login.
    pub token_lifespan: Duration,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: TokenCodec, token_lifespan: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(tokens),
            token_lifespan,
        }
    }
}
