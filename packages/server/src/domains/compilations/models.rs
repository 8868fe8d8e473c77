use serde::{Deserialize, Serialize};

use crate::common::{CompilationId, EventId};
use crate::domains::events::data::EventSummary;

#[derive(Debug, Clone, Serialize)]
pub struct Compilation {
    pub id: CompilationId,
    pub title: String,
    pub pinned: bool,
    pub event_ids: Vec<EventId>,
}

impl Compilation {
    pub fn new(draft: NewCompilation) -> Self {
        Self {
            id: CompilationId::new(),
            title: draft.title,
            pinned: draft.pinned,
            event_ids: draft.event_ids,
        }
    }

    pub fn contains(&self, event_id: EventId) -> bool {
        self.event_ids.contains(&event_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCompilation {
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub event_ids: Vec<EventId>,
}

/// Read shape: the compilation with its member events expanded and enriched.
#[derive(Debug, Clone, Serialize)]
pub struct CompilationDetails {
    pub id: CompilationId,
    pub title: String,
    pub pinned: bool,
    pub events: Vec<EventSummary>,
}
