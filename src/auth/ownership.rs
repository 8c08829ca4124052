// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership checks for mutating operations.
//!
//! The auth gate only proves who the caller is. Every handler that changes
//! an event or answers a join request must load the resource and call
//! [`OwnershipEnforcer::verify_ownership`] before touching the store.

use super::AuthenticatedIdentity;
use crate::error::ApiError;

/// `true` when the recorded owner is the authenticated caller.
pub fn assert_owner(resource_owner_id: &str, authenticated_id: &str) -> bool {
    resource_owner_id == authenticated_id
}

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;

    /// Message returned to a caller who is not the owner.
    fn forbidden_message(&self) -> &'static str {
        "You are not the owner of this resource"
    }
}

/// Trait for enforcing ownership before a mutation.
pub trait OwnershipEnforcer {
    /// Verify that the caller owns this resource.
    ///
    /// # Errors
    /// Returns a `403` [`ApiError`] if the caller is not the owner.
    fn verify_ownership(&self, identity: &AuthenticatedIdentity) -> Result<(), ApiError>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, identity: &AuthenticatedIdentity) -> Result<(), ApiError> {
        if assert_owner(self.owner_user_id(), identity.user_id()) {
            Ok(())
        } else {
            tracing::debug!(
                owner = %self.owner_user_id(),
                caller = %identity.user_id(),
                "Ownership check failed"
            );
            Err(ApiError::forbidden(self.forbidden_message()))
        }
    }
}
