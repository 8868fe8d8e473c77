//! Administrative endpoints: reference data and event moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::common::{CategoryId, DomainError, DomainResult, EventId, UserId};
use crate::domains::categories::actions as categories;
use crate::domains::categories::models::{Category, NewCategory};
use crate::domains::events::actions as events;
use crate::domains::events::data::EventDetails;
use crate::domains::events::models::{Event, EventFilters, EventPatch, EventState, Window};
use crate::domains::users::actions as users;
use crate::domains::users::models::{NewUser, User};
use crate::server::app::AppState;
use crate::server::routes::events::parse_id_list;

pub async fn create_user(
    State(state): State<AppState>,
    Json(draft): Json<NewUser>,
) -> DomainResult<(StatusCode, Json<User>)> {
    let user = users::create_user(draft, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(draft): Json<NewCategory>,
) -> DomainResult<(StatusCode, Json<Category>)> {
    let category = categories::create_category(draft, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// List params arrive comma-separated (`?users=id1,id2&states=PENDING,PUBLISHED`).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSearchParams {
    pub users: Option<String>,
    pub states: Option<String>,
    pub categories: Option<String>,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
    pub from: Option<usize>,
    pub size: Option<usize>,
}

pub async fn search_events(
    State(state): State<AppState>,
    Query(params): Query<AdminSearchParams>,
) -> DomainResult<Json<Vec<EventDetails>>> {
    let states = params
        .states
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .filter(|s| !s.is_empty())
                .map(|s| {
                    EventState::parse(s.trim())
                        .map_err(|_| DomainError::not_found(format!("unknown event state: {s}")))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;
    let filters = EventFilters {
        owners: params.users.as_deref().map(parse_id_list::<UserId>).transpose()?,
        states,
        categories: params
            .categories
            .as_deref()
            .map(parse_id_list::<CategoryId>)
            .transpose()?,
        range_start: params.range_start,
        range_end: params.range_end,
    };
    let window = Window {
        from: params.from.unwrap_or(0),
        size: params.size.unwrap_or(10),
    };
    let found = events::search_events(filters, window, &state.deps).await?;
    Ok(Json(found))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(patch): Json<EventPatch>,
) -> DomainResult<Json<Event>> {
    let event = events::admin_update_event(event_id, patch, &state.deps).await?;
    Ok(Json(event))
}

pub async fn publish_event(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> DomainResult<Json<Event>> {
    let event = events::publish_event(event_id, &state.deps).await?;
    Ok(Json(event))
}

pub async fn decline_event(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> DomainResult<Json<Event>> {
    let event = events::decline_event(event_id, &state.deps).await?;
    Ok(Json(event))
}
