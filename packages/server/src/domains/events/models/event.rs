//! Event aggregate.
//!
//! An event is owned exclusively by the organizer who created it and is only
//! mutated through the lifecycle actions. `participant_limit == 0` means
//! unlimited capacity.

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{CategoryId, EventId, UserId};

/// Lifecycle state of an event.
///
/// Created `Pending`; published at most once (`published_at` is set exactly
/// when the transition happens); `Canceled` is unreachable from nowhere else
/// than `Pending` for owners, and from anything but `Published` for admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    Pending,
    Published,
    Canceled,
}

impl EventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Published => "PUBLISHED",
            Self::Canceled => "CANCELED",
        }
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PUBLISHED" => Ok(Self::Published),
            "CANCELED" => Ok(Self::Canceled),
            other => bail!("unknown event state: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub category_id: CategoryId,
    pub title: String,
    pub annotation: String,
    pub description: String,
    pub paid: bool,
    pub event_date: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    /// Maximum number of confirmed requests; 0 means unlimited.
    pub participant_limit: u32,
    /// When false, requests are confirmed at creation without owner review.
    pub request_moderation: bool,
    pub state: EventState,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Builds a new `Pending` event from an owner's draft.
    pub fn from_draft(owner_id: UserId, category_id: CategoryId, draft: NewEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(),
            owner_id,
            category_id,
            title: draft.title,
            annotation: draft.annotation,
            description: draft.description,
            paid: draft.paid,
            event_date: draft.event_date,
            published_at: None,
            participant_limit: draft.participant_limit,
            request_moderation: draft.request_moderation,
            state: EventState::Pending,
            created_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Applies a patch; every field is optional and absent fields are left
    /// untouched. Validation of the new values happens in the actions layer.
    pub fn apply_patch(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(annotation) = patch.annotation {
            self.annotation = annotation;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(event_date) = patch.event_date {
            self.event_date = event_date;
        }
        if let Some(paid) = patch.paid {
            self.paid = paid;
        }
        if let Some(participant_limit) = patch.participant_limit {
            self.participant_limit = participant_limit;
        }
        if let Some(request_moderation) = patch.request_moderation {
            self.request_moderation = request_moderation;
        }
    }
}

/// Owner's draft for a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub category_id: CategoryId,
    pub title: String,
    pub annotation: String,
    pub description: String,
    #[serde(default)]
    pub paid: bool,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub participant_limit: u32,
    #[serde(default = "default_moderation")]
    pub request_moderation: bool,
}

fn default_moderation() -> bool {
    true
}

/// Partial update; used both by owners (state-restricted) and admins
/// (unrestricted).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub annotation: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub event_date: Option<DateTime<Utc>>,
    pub paid: Option<bool>,
    pub participant_limit: Option<u32>,
    pub request_moderation: Option<bool>,
}

/// Search filters combined with AND; `None` disables a criterion.
#[derive(Debug, Clone, Default)]
pub struct EventFilters {
    pub owners: Option<Vec<UserId>>,
    pub states: Option<Vec<EventState>>,
    pub categories: Option<Vec<CategoryId>>,
    pub range_start: Option<DateTime<Utc>>,
    pub range_end: Option<DateTime<Utc>>,
}

impl EventFilters {
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(owners) = &self.owners {
            if !owners.contains(&event.owner_id) {
                return false;
            }
        }
        if let Some(states) = &self.states {
            if !states.contains(&event.state) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&event.category_id) {
                return false;
            }
        }
        if let Some(start) = self.range_start {
            if event.event_date < start {
                return false;
            }
        }
        if let Some(end) = self.range_end {
            if event.event_date > end {
                return false;
            }
        }
        true
    }
}

/// Simple from/size listing window.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub from: usize,
    pub size: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self { from: 0, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(date: DateTime<Utc>) -> NewEvent {
        NewEvent {
            category_id: CategoryId::new(),
            title: "Rust meetup".to_string(),
            annotation: "monthly meetup".to_string(),
            description: "talks and pizza".to_string(),
            paid: false,
            event_date: date,
            participant_limit: 10,
            request_moderation: true,
        }
    }

    #[test]
    fn from_draft_starts_pending_and_unpublished() {
        let now = Utc::now();
        let event = Event::from_draft(UserId::new(), CategoryId::new(), draft(now + Duration::days(7)), now);

        assert_eq!(event.state, EventState::Pending);
        assert!(event.published_at.is_none());
        assert_eq!(event.created_at, now);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let now = Utc::now();
        let mut event = Event::from_draft(UserId::new(), CategoryId::new(), draft(now + Duration::days(7)), now);
        let original_title = event.title.clone();

        event.apply_patch(EventPatch {
            participant_limit: Some(3),
            paid: Some(true),
            ..Default::default()
        });

        assert_eq!(event.title, original_title);
        assert_eq!(event.participant_limit, 3);
        assert!(event.paid);
    }

    #[test]
    fn filters_combine_with_and() {
        let now = Utc::now();
        let owner = UserId::new();
        let event = Event::from_draft(owner, CategoryId::new(), draft(now + Duration::days(7)), now);

        let matching = EventFilters {
            owners: Some(vec![owner]),
            states: Some(vec![EventState::Pending]),
            ..Default::default()
        };
        assert!(matching.matches(&event));

        let wrong_state = EventFilters {
            owners: Some(vec![owner]),
            states: Some(vec![EventState::Published]),
            ..Default::default()
        };
        assert!(!wrong_state.matches(&event));
    }

    #[test]
    fn state_round_trips_through_str() {
        for state in [EventState::Pending, EventState::Published, EventState::Canceled] {
            assert_eq!(EventState::parse(state.as_str()).unwrap(), state);
        }
        assert!(EventState::parse("DRAFT").is_err());
    }
}
