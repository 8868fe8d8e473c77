//! Compilation actions - administrative curation and public reads.

use tracing::info;

use crate::common::{CompilationId, DomainError, DomainResult, EventId};
use crate::domains::compilations::models::{Compilation, CompilationDetails, NewCompilation};
use crate::domains::events::data::{enrich_read_models, EventSummary};
use crate::domains::events::models::Window;
use crate::kernel::ServerDeps;

pub async fn create_compilation(draft: NewCompilation, deps: &ServerDeps) -> DomainResult<Compilation> {
    for event_id in &draft.event_ids {
        deps.events
            .find_by_id(*event_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;
    }

    let compilation = Compilation::new(draft);
    let compilation = deps.compilations.insert(compilation).await?;
    info!("Created compilation {} ({})", compilation.id, compilation.title);
    Ok(compilation)
}

pub async fn delete_compilation(compilation_id: CompilationId, deps: &ServerDeps) -> DomainResult<()> {
    find_compilation(compilation_id, deps).await?;
    deps.compilations.delete(compilation_id).await?;
    info!("Deleted compilation {}", compilation_id);
    Ok(())
}

pub async fn add_event(
    compilation_id: CompilationId,
    event_id: EventId,
    deps: &ServerDeps,
) -> DomainResult<Compilation> {
    let mut compilation = find_compilation(compilation_id, deps).await?;
    deps.events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("event {event_id} does not exist")))?;

    if compilation.contains(event_id) {
        return Err(DomainError::conflict("the event is already in the compilation"));
    }

    compilation.event_ids.push(event_id);
    let compilation = deps.compilations.update(compilation).await?;
    info!("Added event {} to compilation {}", event_id, compilation_id);
    Ok(compilation)
}

pub async fn remove_event(
    compilation_id: CompilationId,
    event_id: EventId,
    deps: &ServerDeps,
) -> DomainResult<Compilation> {
    let mut compilation = find_compilation(compilation_id, deps).await?;

    if !compilation.contains(event_id) {
        return Err(DomainError::not_found(format!(
            "event {event_id} is not in compilation {compilation_id}"
        )));
    }

    compilation.event_ids.retain(|id| *id != event_id);
    let compilation = deps.compilations.update(compilation).await?;
    info!("Removed event {} from compilation {}", event_id, compilation_id);
    Ok(compilation)
}

pub async fn set_pinned(
    compilation_id: CompilationId,
    pinned: bool,
    deps: &ServerDeps,
) -> DomainResult<Compilation> {
    let mut compilation = find_compilation(compilation_id, deps).await?;
    compilation.pinned = pinned;
    let compilation = deps.compilations.update(compilation).await?;
    info!("Compilation {} pinned = {}", compilation_id, pinned);
    Ok(compilation)
}

pub async fn find_compilation(
    compilation_id: CompilationId,
    deps: &ServerDeps,
) -> DomainResult<Compilation> {
    deps.compilations
        .find_by_id(compilation_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("compilation {compilation_id} does not exist")))
}

/// A compilation with its member events expanded and enriched.
pub async fn compilation_details(
    compilation_id: CompilationId,
    deps: &ServerDeps,
) -> DomainResult<CompilationDetails> {
    let compilation = find_compilation(compilation_id, deps).await?;
    details_of(compilation, deps).await
}

/// Public listing, optionally restricted to pinned compilations.
pub async fn list_compilations(
    pinned: Option<bool>,
    window: Window,
    deps: &ServerDeps,
) -> DomainResult<Vec<CompilationDetails>> {
    let compilations = deps.compilations.find(pinned, window).await?;
    let mut details = Vec::with_capacity(compilations.len());
    for compilation in compilations {
        details.push(details_of(compilation, deps).await?);
    }
    Ok(details)
}

async fn details_of(compilation: Compilation, deps: &ServerDeps) -> DomainResult<CompilationDetails> {
    let mut events: Vec<EventSummary> = Vec::with_capacity(compilation.event_ids.len());
    for event_id in &compilation.event_ids {
        // A missing member event is skipped rather than failing the read
        if let Some(event) = deps.events.find_by_id(*event_id).await? {
            events.push(EventSummary::from(event));
        }
    }
    enrich_read_models(&mut events, deps).await?;

    Ok(CompilationDetails {
        id: compilation.id,
        title: compilation.title,
        pinned: compilation.pinned,
        events,
    })
}
