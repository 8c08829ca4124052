// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    config::Config,
    models::{
        EmailRequest, EmailRequestApproveInput, EmailRequestApproveResponse, EmailRequestInput,
        EmailRequestResponse, Event, EventInput, Level, LoginRequest, LoginResponse,
        MessageResponse, PublicUser, RegisterRequest, UserResponse,
    },
    state::AppState,
};

pub mod events;
pub mod health;
pub mod messages;
pub mod references;
pub mod users;

pub fn router(state: AppState, config: &Config) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/user/register", post(users::register))
        .route("/user/login", post(users::login))
        .route("/references/levels", get(references::list_levels))
        .route("/events", get(events::list_events))
        .route("/events/{event_id}", get(events::get_event));

    // Everything below requires a valid bearer token.
    let protected_routes = Router::new()
        .route(
            "/user/me",
            get(users::get_current_user).delete(users::delete_current_user),
        )
        .route("/events", post(events::create_event))
        .route(
            "/events/{event_id}",
            put(events::update_event).delete(events::delete_event),
        )
        .route(
            "/messages/email/request",
            post(messages::create_email_request),
        )
        .route(
            "/messages/email/{request_id}/approve",
            patch(messages::approve_email_request),
        )
        .route(
            "/messages/email/sent-user-requests",
            get(messages::sent_user_requests),
        )
        .route(
            "/messages/email/received-owner-requests",
            get(messages::received_owner_requests),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let v1_routes = public_routes.merge(protected_routes).with_state(state);

    Router::new()
        .nest("/api/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origins)),
        )
}

/// CORS for the configured origins, or any origin when none are configured.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("cache"),
        ])
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::register,
        users::login,
        users::get_current_user,
        users::delete_current_user,
        references::list_levels,
        events::list_events,
        events::get_event,
        events::create_event,
        events::update_event,
        events::delete_event,
        messages::create_email_request,
        messages::approve_email_request,
        messages::sent_user_requests,
        messages::received_owner_requests
    ),
    components(
        schemas(
            health::HealthResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            UserResponse,
            PublicUser,
            Event,
            EventInput,
            EmailRequest,
            EmailRequestInput,
            EmailRequestApproveInput,
            EmailRequestApproveResponse,
            EmailRequestResponse,
            Level
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Registration, login and the current user"),
        (name = "Events", description = "Sports events"),
        (name = "Messages", description = "Requests to join events"),
        (name = "References", description = "Reference data")
    )
)]
struct ApiDoc;
