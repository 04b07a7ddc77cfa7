// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ErrorBody},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentTimeResponse {
    /// Database clock, ISO-8601.
    pub now: DateTime<Utc>,
}

/// Current time as reported by the database.
#[utoipa::path(
    get,
    path = "/api/current-time",
    tag = "Time",
    responses(
        (status = 200, description = "Database time", body = CurrentTimeResponse),
        (status = 500, description = "Database query failed", body = ErrorBody)
    )
)]
pub async fn current_time(
    State(state): State<AppState>,
) -> Result<Json<CurrentTimeResponse>, ApiError> {
    match state.time.now().await {
        Ok(now) => Ok(Json(CurrentTimeResponse { now })),
        Err(e) => {
            tracing::error!(error = %e, "Database error");
            Err(ApiError::internal())
        }
    }
}
