// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! SportujSpolu - Sports Event Sharing API
//!
//! Users publish sports events and ask to join events organised by others.
//! Organisers approve or reject those requests, and contact emails are
//! shared once a request is approved.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - RS256 bearer tokens, password hashing and ownership checks
//! - `config` - Environment configuration
//! - `store` - In-memory data store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
