// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{CurrentUser, OwnershipEnforcer},
    error::ApiError,
    models::{Event, EventInput, PublicUser},
    state::AppState,
    store::InMemoryStore,
};

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 12;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListEventsQuery {
    /// Page number, starting at 1.
    pub page: Option<String>,
    /// Number of events per page.
    pub limit: Option<String>,
    /// Set to `owner` to embed the owner's public profile.
    pub includes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct IncludesQuery {
    /// Set to `owner` to embed the owner's public profile.
    pub includes: Option<String>,
}

fn parse_positive(value: Option<&str>, default: usize, name: &str) -> Result<usize, ApiError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(ApiError::bad_request(format!("Invalid {name} parameter"))),
        },
    }
}

fn wants_owner(includes: Option<&str>) -> bool {
    includes.is_some_and(|value| value.split(',').any(|part| part.trim() == "owner"))
}

fn with_owner(store: &InMemoryStore, mut event: Event) -> Event {
    event.owner = store.user(&event.owner_id).map(PublicUser::from);
    event
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(ListEventsQuery),
    tag = "Events",
    responses(
        (status = 200, body = [Event]),
        (status = 400, description = "Invalid page or limit parameter"),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let page = parse_positive(params.page.as_deref(), DEFAULT_PAGE, "page")?;
    let limit = parse_positive(params.limit.as_deref(), DEFAULT_LIMIT, "limit")?;
    let offset = (page - 1).saturating_mul(limit);

    let store = state.store.read().await;
    let mut events = store.list_events(offset, limit);
    if wants_owner(params.includes.as_deref()) {
        events = events
            .into_iter()
            .map(|event| with_owner(&store, event))
            .collect();
    }
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Public identifier of the event"),
        IncludesQuery
    ),
    tag = "Events",
    responses(
        (status = 200, body = Event),
        (status = 404, description = "Event not found"),
    )
)]
pub async fn get_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
    Query(params): Query<IncludesQuery>,
) -> Result<Json<Event>, ApiError> {
    let store = state.store.read().await;
    let event = store
        .event(&event_id)
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    if wants_owner(params.includes.as_deref()) {
        return Ok(Json(with_owner(&store, event)));
    }
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = EventInput,
    tag = "Events",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Event),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, ApiError> {
    let event = state
        .store
        .write()
        .await
        .create_event(identity.user_id(), input);
    tracing::info!(event_id = %event.id, owner = %event.owner_id, "Event created");
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/v1/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Public identifier of the event")
    ),
    request_body = EventInput,
    tag = "Events",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Event),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Caller is not the owner of the event"),
        (status = 404, description = "Event not found"),
    )
)]
pub async fn update_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, ApiError> {
    let mut store = state.store.write().await;
    let event = store
        .event(&event_id)
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    event.verify_ownership(&identity)?;

    Ok(Json(store.update_event(&event_id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Public identifier of the event")
    ),
    tag = "Events",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 403, description = "Caller is not the owner of the event"),
        (status = 404, description = "Event not found"),
    )
)]
pub async fn delete_event(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    let event = store
        .event(&event_id)
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    event.verify_ownership(&identity)?;

    store.delete_event(&event_id)?;
    tracing::info!(event_id = %event_id, "Event deleted");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router;
    use crate::config::Config;
    use crate::test_support::{seed_user, send, test_state};
    use axum::http::Method;
    use serde_json::{json, Value};

    fn config() -> Config {
        Config::from_lookup(|name| (name == "TOKEN_HOUR_LIFESPAN").then(|| "1".to_string()))
            .unwrap()
    }

    fn event_body(name: &str) -> Value {
        json!({
            "name": name,
            "sport": "Basketball",
            "date": "2026-11-01T18:00:00Z",
            "location": "Central Park",
            "price": 50.0,
            "description": "Friendly game",
            "level": "Any"
        })
    }

    #[test]
    fn page_and_limit_must_be_positive_numbers() {
        assert_eq!(parse_positive(None, 12, "limit").unwrap(), 12);
        assert_eq!(parse_positive(Some("3"), 12, "limit").unwrap(), 3);

        let err = parse_positive(Some("0"), 1, "page").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid page parameter");
        assert!(parse_positive(Some("-1"), 1, "page").is_err());
        assert!(parse_positive(Some("two"), 1, "page").is_err());
    }

    #[test]
    fn includes_owner_is_detected() {
        assert!(wants_owner(Some("owner")));
        assert!(wants_owner(Some("tags, owner")));
        assert!(!wants_owner(Some("owners")));
        assert!(!wants_owner(None));
    }

    #[tokio::test]
    async fn create_list_and_get_with_owner() {
        let state = test_state();
        let auth = seed_user(&state, "owner1", "owner@test.com").await;
        let app = router(state, &config());

        let (status, created) = send(
            app.clone(),
            Method::POST,
            "/api/v1/events",
            Some(&auth),
            Some(event_body("Match")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["ownerId"], "owner1");
        assert_eq!(created["id"].as_str().unwrap().len(), 12);

        let (status, list) = send(app.clone(), Method::GET, "/api/v1/events", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert!(list[0].get("owner").is_none());

        let uri = format!("/api/v1/events/{}?includes=owner", created["id"].as_str().unwrap());
        let (status, event) = send(app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(event["owner"]["email"], "owner@test.com");
    }

    #[tokio::test]
    async fn invalid_page_is_rejected() {
        let (status, body) = send(
            router(test_state(), &config()),
            Method::GET,
            "/api/v1/events?page=0",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid page parameter");
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let (status, body) = send(
            router(test_state(), &config()),
            Method::GET,
            "/api/v1/events/missing",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event not found");
    }

    #[tokio::test]
    async fn create_requires_token() {
        let (status, _) = send(
            router(test_state(), &config()),
            Method::POST,
            "/api/v1/events",
            None,
            Some(event_body("Match")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_owner_cannot_update_or_delete() {
        let state = test_state();
        seed_user(&state, "u1", "u1@test.com").await;
        let intruder = seed_user(&state, "u2", "u2@test.com").await;
        let event = state.store.write().await.create_event(
            "u1",
            serde_json::from_value(event_body("Original")).unwrap(),
        );
        let app = router(state.clone(), &config());
        let uri = format!("/api/v1/events/{}", event.id);

        let (status, body) = send(
            app.clone(),
            Method::PUT,
            &uri,
            Some(&intruder),
            Some(event_body("Hijacked")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "You are not the owner of this event");

        let (status, _) = send(app, Method::DELETE, &uri, Some(&intruder), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        assert_eq!(state.store.read().await.event(&event.id), Some(event));
    }

    #[tokio::test]
    async fn owner_updates_and_deletes() {
        let state = test_state();
        let auth = seed_user(&state, "u1", "u1@test.com").await;
        let event = state.store.write().await.create_event(
            "u1",
            serde_json::from_value(event_body("Original")).unwrap(),
        );
        let app = router(state.clone(), &config());
        let uri = format!("/api/v1/events/{}", event.id);

        let (status, updated) = send(
            app.clone(),
            Method::PUT,
            &uri,
            Some(&auth),
            Some(event_body("Renamed")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Renamed");
        assert_eq!(updated["ownerId"], "u1");

        let (status, _) = send(app.clone(), Method::DELETE, &uri, Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.store.read().await.event(&event.id).is_none());

        let (status, _) = send(app, Method::DELETE, &uri, Some(&auth), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
