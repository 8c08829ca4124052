// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{models::Level, state::AppState};

/// Skill levels an event can target.
#[utoipa::path(
    get,
    path = "/api/v1/references/levels",
    tag = "References",
    responses((status = 200, body = [Level]))
)]
pub async fn list_levels(State(state): State<AppState>) -> Json<Vec<Level>> {
    Json(state.store.read().await.levels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn levels_are_listed_in_order() {
        let Json(levels) = list_levels(State(test_state())).await;
        let values: Vec<&str> = levels.iter().map(|level| level.value.as_str()).collect();
        assert_eq!(values, vec!["any", "beginner", "intermediate", "advanced"]);
    }
}
