// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API. Wire names are
//! camelCase to match existing clients.
//!
//! ## Model Categories
//!
//! - **Users**: accounts and their public profile
//! - **Events**: sports events owned by the user who created them
//! - **Email requests**: a user's request to join someone else's event
//! - **Levels**: reference data for event skill levels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::OwnedResource;

// =============================================================================
// Users
// =============================================================================

/// A stored user account.
///
/// Never serialized: the password hash must not leave the server.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub rating: i32,
}

/// Email and password hash as looked up at login.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub user_id: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "email@test.com")]
    pub email: String,
    #[schema(example = "Test123")]
    pub password: String,
    #[schema(example = "John Doe")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "email@test.com")]
    pub email: String,
    #[schema(example = "Test123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// The caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserResponse {
    pub id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "email@test.com")]
    pub email: String,
    #[schema(example = 3)]
    pub rating: i32,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            rating: user.rating,
        }
    }
}

/// Owner details embedded in an event when `includes=owner`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PublicUser {
    pub name: String,
    pub email: String,
    pub rating: i32,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            rating: user.rating,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// A sports event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Public identifier used in URLs.
    #[schema(example = "pwnrxtbi9z0v")]
    pub id: String,
    #[schema(example = "Basketball Match at Park")]
    pub name: String,
    #[schema(example = "Basketball")]
    pub sport: String,
    pub date: DateTime<Utc>,
    #[schema(example = "Central Park")]
    pub location: String,
    pub price: f64,
    pub description: String,
    #[schema(example = "Any")]
    pub level: String,
    pub created_at: DateTime<Utc>,
    /// User who created the event. Never reassigned.
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<PublicUser>,
}

impl OwnedResource for Event {
    fn owner_user_id(&self) -> &str {
        &self.owner_id
    }

    fn forbidden_message(&self) -> &'static str {
        "You are not the owner of this event"
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EventInput {
    #[schema(example = "Basketball Match at Park")]
    pub name: String,
    #[schema(example = "Basketball")]
    pub sport: String,
    pub date: DateTime<Utc>,
    #[schema(example = "Central Park")]
    pub location: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[schema(example = "Any")]
    pub level: String,
}

// =============================================================================
// Email requests
// =============================================================================

/// A request to join an event, answered by the event owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub id: u64,
    #[schema(example = "I would like to join your event.")]
    pub text: String,
    pub event_id: String,
    /// Owner of the event at request time. Never reassigned.
    pub event_owner_id: String,
    pub requester_id: String,
    /// `None` until the owner decides.
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for EmailRequest {
    fn owner_user_id(&self) -> &str {
        &self.event_owner_id
    }

    fn forbidden_message(&self) -> &'static str {
        "You are not the owner of this event"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequestInput {
    #[serde(default)]
    pub text: String,
    #[schema(example = "pwnrxtbi9z0v")]
    pub event_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EmailRequestApproveInput {
    pub approved: bool,
}

/// Answer to an approval, including the requester's email so the owner can
/// get in touch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequestApproveResponse {
    #[serde(flatten)]
    pub request: EmailRequest,
    pub requester_email: Option<String>,
}

/// A join request listed together with event and counterpart details.
///
/// Contact emails are only revealed once the request has been approved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequestResponse {
    #[serde(flatten)]
    pub request: EmailRequest,
    pub requester_name: Option<String>,
    pub requester_email: Option<String>,
    pub event_name: Option<String>,
    pub event_location: Option<String>,
    pub event_level: Option<String>,
    pub event_owner_name: Option<String>,
    pub event_owner_email: Option<String>,
}

/// `approvedFilter` query value for request listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovedFilter {
    Approved,
    Rejected,
    Pending,
}

impl ApprovedFilter {
    /// Parse the query value; unknown values mean "no filter".
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value? {
            "true" => Some(Self::Approved),
            "false" => Some(Self::Rejected),
            "null" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn matches(self, approved: Option<bool>) -> bool {
        match self {
            Self::Approved => approved == Some(true),
            Self::Rejected => approved == Some(false),
            Self::Pending => approved.is_none(),
        }
    }
}

// =============================================================================
// Reference data
// =============================================================================

/// Skill level an event is aimed at.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Level {
    pub id: i32,
    #[schema(example = "beginner")]
    pub value: String,
    #[schema(example = "Beginner")]
    pub label: String,
}
