// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The verified identity attached to an authenticated request.

/// Identity resolved by the auth gate from a verified token.
///
/// Stored in the request extensions and read by handlers through
/// [`CurrentUser`](super::CurrentUser). It only proves the token was valid
/// when verified; the user may have been deleted since it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Subject claim of the verified token
    pub user_id: String,
}

impl AuthenticatedIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
