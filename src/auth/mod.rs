// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! RS256 bearer-token authentication for the SportujSpolu API.
//!
//! ## Auth Flow
//!
//! 1. A user logs in with email and password (checked against an Argon2 hash)
//! 2. The server issues a token `{sub: user_id, exp}` signed with its RSA
//!    private key
//! 3. The client sends `Authorization: Bearer <token>`
//! 4. The auth gate:
//!    - rejects any non-RSA `alg` header
//!    - verifies the signature with the RSA public key and checks `exp`
//!    - stores the `sub` claim as the request's [`AuthenticatedIdentity`]
//! 5. Mutating handlers compare the resource owner with that identity
//!
//! ## Security
//!
//! - Key material is loaded once at startup; a missing key aborts startup
//! - Tokens are stateless and cannot be revoked before expiry
//! - Every verification failure produces the same `401 Unauthorized`

pub mod error;
pub mod extractor;
pub mod identity;
pub mod keys;
pub mod middleware;
pub mod ownership;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::{current_identity, extract_bearer, CurrentUser};
pub use identity::AuthenticatedIdentity;
pub use keys::{KeyProvider, KeySource};
pub use middleware::require_auth;
pub use ownership::{assert_owner, OwnedResource, OwnershipEnforcer};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::TokenCodec;
