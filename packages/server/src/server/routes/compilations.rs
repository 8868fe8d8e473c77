//! Compilation endpoints: public reads and administrative curation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::common::{CompilationId, DomainResult, EventId};
use crate::domains::compilations::actions;
use crate::domains::compilations::models::{Compilation, CompilationDetails, NewCompilation};
use crate::domains::events::models::Window;
use crate::server::app::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub pinned: Option<bool>,
    pub from: Option<usize>,
    pub size: Option<usize>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> DomainResult<Json<Vec<CompilationDetails>>> {
    let window = Window {
        from: params.from.unwrap_or(0),
        size: params.size.unwrap_or(10),
    };
    let compilations = actions::list_compilations(params.pinned, window, &state.deps).await?;
    Ok(Json(compilations))
}

pub async fn get(
    State(state): State<AppState>,
    Path(compilation_id): Path<CompilationId>,
) -> DomainResult<Json<CompilationDetails>> {
    let compilation = actions::compilation_details(compilation_id, &state.deps).await?;
    Ok(Json(compilation))
}

pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<NewCompilation>,
) -> DomainResult<(StatusCode, Json<Compilation>)> {
    let compilation = actions::create_compilation(draft, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(compilation)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(compilation_id): Path<CompilationId>,
) -> DomainResult<StatusCode> {
    actions::delete_compilation(compilation_id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_event(
    State(state): State<AppState>,
    Path((compilation_id, event_id)): Path<(CompilationId, EventId)>,
) -> DomainResult<Json<Compilation>> {
    let compilation = actions::add_event(compilation_id, event_id, &state.deps).await?;
    Ok(Json(compilation))
}

pub async fn remove_event(
    State(state): State<AppState>,
    Path((compilation_id, event_id)): Path<(CompilationId, EventId)>,
) -> DomainResult<Json<Compilation>> {
    let compilation = actions::remove_event(compilation_id, event_id, &state.deps).await?;
    Ok(Json(compilation))
}

pub async fn pin(
    State(state): State<AppState>,
    Path(compilation_id): Path<CompilationId>,
) -> DomainResult<Json<Compilation>> {
    let compilation = actions::set_pinned(compilation_id, true, &state.deps).await?;
    Ok(Json(compilation))
}

pub async fn unpin(
    State(state): State<AppState>,
    Path(compilation_id): Path<CompilationId>,
) -> DomainResult<Json<Compilation>> {
    let compilation = actions::set_pinned(compilation_id, false, &state.deps).await?;
    Ok(Json(compilation))
}
