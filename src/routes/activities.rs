// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity listing and signup routes.

use crate::error::{AppError, Result};
use crate::models::{Activity, MessageResponse};
use crate::services::directory::Catalog;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Activity routes (public).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/{name}", get(get_activity))
        .route("/activities/{name}/signup", post(signup))
        .route("/activities/{name}/unregister", post(unregister))
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    /// Student email. Used as-is, no format validation.
    email: String,
}

fn email_param(query: std::result::Result<Query<EmailQuery>, QueryRejection>) -> Result<String> {
    query
        .map(|Query(q)| q.email)
        .map_err(|rejection| AppError::InvalidParams(rejection.body_text()))
}

// ─── Listing ─────────────────────────────────────────────────

/// All activities keyed by name, in catalog order.
async fn list_activities(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(state.directory.list_activities().await)
}

/// A single activity.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Activity>> {
    let activity = state.directory.get_activity(&name).await?;
    Ok(Json(activity))
}

// ─── Membership ──────────────────────────────────────────────

/// Sign a student up for an activity.
async fn signup(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    query: std::result::Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>> {
    let email = email_param(query)?;
    let message = state.directory.signup(&name, &email).await?;
    Ok(Json(MessageResponse { message }))
}

/// Remove a student from an activity.
async fn unregister(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    query: std::result::Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>> {
    let email = email_param(query)?;
    let message = state.directory.unregister(&name, &email).await?;
    Ok(Json(MessageResponse { message }))
}
