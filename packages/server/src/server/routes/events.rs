//! Organizer and public event endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::common::{CategoryId, DomainError, DomainResult, EventId, UserId};
use crate::domains::events::actions;
use crate::domains::events::data::{EventDetails, EventSummary};
use crate::domains::events::models::{Event, EventFilters, EventPatch, EventState, NewEvent, Window};
use crate::server::app::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowParams {
    pub from: Option<usize>,
    pub size: Option<usize>,
}

impl WindowParams {
    pub fn window(&self) -> Window {
        let defaults = Window::default();
        Window {
            from: self.from.unwrap_or(defaults.from),
            size: self.size.unwrap_or(defaults.size),
        }
    }
}

/// List params arrive comma-separated (`?categories=id1,id2`).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchParams {
    pub categories: Option<String>,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
    pub from: Option<usize>,
    pub size: Option<usize>,
}

/// Parses a comma-separated list; parse failures are reported as NotFound so
/// a garbled id reads the same as an unknown one.
pub(crate) fn parse_id_list<T: std::str::FromStr>(raw: &str) -> Result<Vec<T>, DomainError> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.trim()
                .parse::<T>()
                .map_err(|_| DomainError::not_found(format!("unknown id: {s}")))
        })
        .collect()
}

pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(draft): Json<NewEvent>,
) -> DomainResult<(StatusCode, Json<Event>)> {
    let event = actions::create_event(user_id, draft, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_own(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(params): Query<WindowParams>,
) -> DomainResult<Json<Vec<EventSummary>>> {
    let events = actions::find_user_events(user_id, params.window(), &state.deps).await?;
    Ok(Json(events))
}

pub async fn get_own(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(UserId, EventId)>,
) -> DomainResult<Json<EventDetails>> {
    let event = actions::find_user_event(event_id, user_id, &state.deps).await?;
    Ok(Json(event))
}

pub async fn update_own(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(UserId, EventId)>,
    Json(patch): Json<EventPatch>,
) -> DomainResult<Json<Event>> {
    let event = actions::update_event(event_id, user_id, patch, &state.deps).await?;
    Ok(Json(event))
}

pub async fn cancel_own(
    State(state): State<AppState>,
    Path((user_id, event_id)): Path<(UserId, EventId)>,
) -> DomainResult<Json<Event>> {
    let event = actions::cancel_event(event_id, user_id, &state.deps).await?;
    Ok(Json(event))
}

/// Public search: only published events are visible.
pub async fn search_published(
    State(state): State<AppState>,
    Query(params): Query<PublicSearchParams>,
) -> DomainResult<Json<Vec<EventDetails>>> {
    let categories = params
        .categories
        .as_deref()
        .map(parse_id_list::<CategoryId>)
        .transpose()?;
    let filters = EventFilters {
        owners: None,
        states: Some(vec![EventState::Published]),
        categories,
        range_start: params.range_start,
        range_end: params.range_end,
    };
    let window = Window {
        from: params.from.unwrap_or(0),
        size: params.size.unwrap_or(10),
    };
    let events = actions::search_events(filters, window, &state.deps).await?;
    Ok(Json(events))
}

/// Public single-event view; unpublished events are invisible here.
pub async fn get_published(
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> DomainResult<Json<EventDetails>> {
    let event = actions::find_event(event_id, &state.deps).await?;
    if event.state != EventState::Published {
        return Err(DomainError::not_found(format!("event {event_id} does not exist")));
    }
    Ok(Json(event))
}
