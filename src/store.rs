// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory data store for users, events and join requests.
//!
//! The store performs no authorization of its own: handlers resolve the
//! caller through the auth gate and run ownership checks before calling any
//! mutating method here.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    ApprovedFilter, Credential, EmailRequest, EmailRequestResponse, Event, EventInput, Level, User,
};

/// Length of public identifiers for users and events.
const PUBLIC_ID_LEN: usize = 12;

/// Generate a short lowercase alphanumeric identifier.
pub fn generate_public_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(PUBLIC_ID_LEN);
    id
}

/// Lookup and creation of login credentials.
pub trait CredentialStore {
    /// Find the user ID and password hash registered for `email`.
    fn find_by_email(&self, email: &str) -> Option<Credential>;

    /// Store a new user.
    ///
    /// # Errors
    /// Returns `409` if the email is already registered.
    fn insert(&mut self, user: User) -> Result<(), ApiError>;
}

pub struct InMemoryStore {
    users: HashMap<String, User>,
    // Vecs keep insertion order for pagination.
    events: Vec<Event>,
    email_requests: Vec<EmailRequest>,
    next_request_id: u64,
    levels: Vec<Level>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            events: Vec::new(),
            email_requests: Vec::new(),
            next_request_id: 1,
            levels: default_levels(),
        }
    }
}

fn default_levels() -> Vec<Level> {
    [
        (1, "any", "Any"),
        (2, "beginner", "Beginner"),
        (3, "intermediate", "Intermediate"),
        (4, "advanced", "Advanced"),
    ]
    .into_iter()
    .map(|(id, value, label)| Level {
        id,
        value: value.to_string(),
        label: label.to_string(),
    })
    .collect()
}

impl CredentialStore for InMemoryStore {
    fn find_by_email(&self, email: &str) -> Option<Credential> {
        self.users
            .values()
            .find(|user| user.email == email)
            .map(|user| Credential {
                user_id: user.id.clone(),
                password_hash: user.password_hash.clone(),
            })
    }

    fn insert(&mut self, user: User) -> Result<(), ApiError> {
        if self.users.values().any(|existing| existing.email == user.email) {
            return Err(ApiError::conflict("User with this email already exists"));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Remove a user together with the events they own and every join
    /// request they sent or received.
    pub fn delete_user(&mut self, user_id: &str) -> Result<(), ApiError> {
        if self.users.remove(user_id).is_none() {
            return Err(ApiError::not_found("User not found"));
        }

        self.events.retain(|event| event.owner_id != user_id);
        self.email_requests.retain(|request| {
            request.requester_id != user_id && request.event_owner_id != user_id
        });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn list_events(&self, offset: usize, limit: usize) -> Vec<Event> {
        self.events.iter().skip(offset).take(limit).cloned().collect()
    }

    pub fn event(&self, event_id: &str) -> Option<Event> {
        self.events.iter().find(|event| event.id == event_id).cloned()
    }

    pub fn create_event(&mut self, owner_id: &str, input: EventInput) -> Event {
        let event = Event {
            id: generate_public_id(),
            name: input.name,
            sport: input.sport,
            date: input.date,
            location: input.location,
            price: input.price,
            description: input.description,
            level: input.level,
            created_at: Utc::now(),
            owner_id: owner_id.to_string(),
            owner: None,
        };
        self.events.push(event.clone());
        event
    }

    /// Replace the editable fields of an event. Owner and creation time are
    /// kept.
    pub fn update_event(&mut self, event_id: &str, input: EventInput) -> Result<Event, ApiError> {
        let Some(event) = self.events.iter_mut().find(|event| event.id == event_id) else {
            return Err(ApiError::not_found("Event not found"));
        };

        event.name = input.name;
        event.sport = input.sport;
        event.date = input.date;
        event.location = input.location;
        event.price = input.price;
        event.description = input.description;
        event.level = input.level;
        Ok(event.clone())
    }

    /// Remove an event and the join requests made for it.
    pub fn delete_event(&mut self, event_id: &str) -> Result<(), ApiError> {
        let before = self.events.len();
        self.events.retain(|event| event.id != event_id);
        if self.events.len() == before {
            return Err(ApiError::not_found("Event not found"));
        }

        self.email_requests
            .retain(|request| request.event_id != event_id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Email requests
    // -------------------------------------------------------------------------

    pub fn email_request(&self, request_id: u64) -> Option<EmailRequest> {
        self.email_requests
            .iter()
            .find(|request| request.id == request_id)
            .cloned()
    }

    pub fn has_email_request(&self, event_id: &str, requester_id: &str) -> bool {
        self.email_requests
            .iter()
            .any(|request| request.event_id == event_id && request.requester_id == requester_id)
    }

    pub fn create_email_request(
        &mut self,
        text: String,
        event: &Event,
        requester_id: &str,
    ) -> Result<EmailRequest, ApiError> {
        if self.has_email_request(&event.id, requester_id) {
            return Err(ApiError::conflict(
                "Request already exists for this event and requester",
            ));
        }

        let now = Utc::now();
        let request = EmailRequest {
            id: self.next_request_id,
            text,
            event_id: event.id.clone(),
            event_owner_id: event.owner_id.clone(),
            requester_id: requester_id.to_string(),
            approved: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.next_request_id += 1;
        self.email_requests.push(request.clone());
        Ok(request)
    }

    /// Record the owner's decision. A request can only be decided once.
    pub fn decide_email_request(
        &mut self,
        request_id: u64,
        approved: bool,
    ) -> Result<EmailRequest, ApiError> {
        let Some(request) = self
            .email_requests
            .iter_mut()
            .find(|request| request.id == request_id)
        else {
            return Err(ApiError::not_found("Email request not found"));
        };

        if request.approved.is_some() {
            return Err(ApiError::conflict("Email request has already been answered"));
        }

        let now = Utc::now();
        request.approved = Some(approved);
        request.approved_at = Some(now);
        request.updated_at = now;
        Ok(request.clone())
    }

    /// Requests sent by `requester_id` whose event still exists.
    pub fn sent_requests(
        &self,
        requester_id: &str,
        filter: Option<ApprovedFilter>,
    ) -> Vec<EmailRequestResponse> {
        self.listed_requests(|request| request.requester_id == requester_id, filter)
            .map(|(request, event)| {
                let owner = self.users.get(&request.event_owner_id);
                let approved = request.approved == Some(true);
                EmailRequestResponse {
                    requester_name: None,
                    requester_email: None,
                    event_name: Some(event.name.clone()),
                    event_location: Some(event.location.clone()),
                    event_level: Some(event.level.clone()),
                    event_owner_name: owner.map(|user| user.name.clone()),
                    event_owner_email: owner
                        .filter(|_| approved)
                        .map(|user| user.email.clone()),
                    request: request.clone(),
                }
            })
            .collect()
    }

    /// Requests received by `owner_id` for events that still exist.
    pub fn received_requests(
        &self,
        owner_id: &str,
        filter: Option<ApprovedFilter>,
    ) -> Vec<EmailRequestResponse> {
        self.listed_requests(|request| request.event_owner_id == owner_id, filter)
            .map(|(request, event)| {
                let requester = self.users.get(&request.requester_id);
                let approved = request.approved == Some(true);
                EmailRequestResponse {
                    requester_name: requester.map(|user| user.name.clone()),
                    requester_email: requester
                        .filter(|_| approved)
                        .map(|user| user.email.clone()),
                    event_name: Some(event.name.clone()),
                    event_location: Some(event.location.clone()),
                    event_level: Some(event.level.clone()),
                    event_owner_name: None,
                    event_owner_email: None,
                    request: request.clone(),
                }
            })
            .collect()
    }

    fn listed_requests<'a, P>(
        &'a self,
        predicate: P,
        filter: Option<ApprovedFilter>,
    ) -> impl Iterator<Item = (&'a EmailRequest, &'a Event)> + 'a
    where
        P: Fn(&EmailRequest) -> bool + 'a,
    {
        self.email_requests
            .iter()
            .filter(move |request| predicate(request))
            .filter(move |request| filter.map_or(true, |f| f.matches(request.approved)))
            .filter_map(move |request| {
                self.events
                    .iter()
                    .find(|event| event.id == request.event_id)
                    .map(|event| (request, event))
            })
    }

    // -------------------------------------------------------------------------
    // Reference data
    // -------------------------------------------------------------------------

    pub fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }
}
