//! Participation request endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::{DomainResult, EventId, RequestId, UserId};
use crate::domains::requests::actions;
use crate::domains::requests::models::Request;
use crate::server::app::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    pub event_id: EventId,
}

pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(params): Query<CreateParams>,
) -> DomainResult<(StatusCode, Json<Request>)> {
    let request = actions::create_request(user_id, params.event_id, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_own(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> DomainResult<Json<Vec<Request>>> {
    let requests = actions::list_for_user(user_id, &state.deps).await?;
    Ok(Json(requests))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path((user_id, request_id)): Path<(UserId, RequestId)>,
) -> DomainResult<Json<Request>> {
    let request = actions::cancel_request(user_id, request_id, &state.deps).await?;
    Ok(Json(request))
}

pub async fn list_for_event(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(UserId, EventId)>,
) -> DomainResult<Json<Vec<Request>>> {
    let requests = actions::list_for_event(event_id, user_id, &state.deps).await?;
    Ok(Json(requests))
}

pub async fn confirm(
    State(state): State<AppState>,
    Path((user_id, event_id, request_id)): Path<(UserId, EventId, RequestId)>,
) -> DomainResult<Json<Request>> {
    let request = actions::confirm_request(event_id, user_id, request_id, &state.deps).await?;
    Ok(Json(request))
}

pub async fn decline(
    State(state): State<AppState>,
    Path((user_id, event_id, request_id)): Path<(UserId, EventId, RequestId)>,
) -> DomainResult<Json<Request>> {
    let request = actions::decline_request(event_id, user_id, request_id, &state.deps).await?;
    Ok(Json(request))
}
