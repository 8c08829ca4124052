// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Join requests ("email requests") between users and event owners.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{CurrentUser, OwnershipEnforcer},
    error::ApiError,
    models::{
        ApprovedFilter, EmailRequest, EmailRequestApproveInput, EmailRequestApproveResponse,
        EmailRequestInput, EmailRequestResponse,
    },
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedFilterQuery {
    /// `true`, `false` or `null` (pending). Anything else lists all requests.
    pub approved_filter: Option<String>,
}

/// Ask the owner of an event to share their email.
#[utoipa::path(
    post,
    path = "/api/v1/messages/email/request",
    request_body = EmailRequestInput,
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, body = EmailRequest),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Request already exists"),
    )
)]
pub async fn create_email_request(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(input): Json<EmailRequestInput>,
) -> Result<Json<EmailRequest>, ApiError> {
    let mut store = state.store.write().await;

    // Owners cannot ask to join their own event.
    let event = store
        .event(&input.event_id)
        .filter(|event| event.owner_id != identity.user_id())
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    let request = store.create_email_request(input.text, &event, identity.user_id())?;
    tracing::info!(
        request_id = request.id,
        event_id = %request.event_id,
        "Email request created"
    );
    Ok(Json(request))
}

/// Approve or reject a join request for one of the caller's events.
#[utoipa::path(
    patch,
    path = "/api/v1/messages/email/{request_id}/approve",
    params(
        ("request_id" = u64, Path, description = "Identifier of the email request")
    ),
    request_body = EmailRequestApproveInput,
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, body = EmailRequestApproveResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Caller is not the owner of the event"),
        (status = 404, description = "Email request not found"),
        (status = 409, description = "Request has already been answered"),
    )
)]
pub async fn approve_email_request(
    Path(request_id): Path<u64>,
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(input): Json<EmailRequestApproveInput>,
) -> Result<Json<EmailRequestApproveResponse>, ApiError> {
    let mut store = state.store.write().await;
    let request = store
        .email_request(request_id)
        .ok_or_else(|| ApiError::not_found("Email request not found"))?;
    request.verify_ownership(&identity)?;

    let request = store.decide_email_request(request_id, input.approved)?;
    let requester_email = store
        .user(&request.requester_id)
        .map(|user| user.email.clone());

    tracing::info!(request_id, approved = input.approved, "Email request answered");
    Ok(Json(EmailRequestApproveResponse {
        request,
        requester_email,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/messages/email/sent-user-requests",
    params(ApprovedFilterQuery),
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [EmailRequestResponse]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn sent_user_requests(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(params): Query<ApprovedFilterQuery>,
) -> Json<Vec<EmailRequestResponse>> {
    let filter = ApprovedFilter::parse(params.approved_filter.as_deref());
    let store = state.store.read().await;
    Json(store.sent_requests(identity.user_id(), filter))
}

#[utoipa::path(
    get,
    path = "/api/v1/messages/email/received-owner-requests",
    params(ApprovedFilterQuery),
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [EmailRequestResponse]),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn received_owner_requests(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Query(params): Query<ApprovedFilterQuery>,
) -> Json<Vec<EmailRequestResponse>> {
    let filter = ApprovedFilter::parse(params.approved_filter.as_deref());
    let store = state.store.read().await;
    Json(store.received_requests(identity.user_id(), filter))
}
