use chrono::{Duration, Utc};
use tracing::info;

use crate::common::{DomainError, DomainResult, UserId};
use crate::domains::categories::actions::find_category;
use crate::domains::events::models::{Event, NewEvent};
use crate::domains::users::actions::find_user;
use crate::kernel::ServerDeps;

/// Creates a new event draft for an organizer. The event starts Pending and
/// must be at least two hours in the future.
pub async fn create_event(owner_id: UserId, draft: NewEvent, deps: &ServerDeps) -> DomainResult<Event> {
    find_user(owner_id, deps).await?;
    find_category(draft.category_id, deps).await?;

    let now = Utc::now();
    if draft.event_date < now + Duration::hours(2) {
        return Err(DomainError::conflict(
            "the event date must be at least two hours in the future",
        ));
    }

    let event = Event::from_draft(owner_id, draft.category_id, draft, now);
    let event = deps.events.insert(event).await?;
    info!("User {} created event {} ({})", owner_id, event.id, event.title);
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::categories::actions::create_category;
    use crate::domains::categories::models::NewCategory;
    use crate::domains::events::models::EventState;
    use crate::domains::users::actions::create_user;
    use crate::domains::users::models::NewUser;
    use crate::kernel::test_dependencies::test_deps;
    use crate::common::CategoryId;

    fn draft(category_id: CategoryId, hours_ahead: i64) -> NewEvent {
        NewEvent {
            category_id,
            title: "Rust meetup".to_string(),
            annotation: "monthly meetup".to_string(),
            description: "talks and pizza".to_string(),
            paid: false,
            event_date: Utc::now() + Duration::hours(hours_ahead),
            participant_limit: 0,
            request_moderation: true,
        }
    }

    #[tokio::test]
    async fn creates_pending_event() {
        let (deps, _) = test_deps();
        let user = create_user(
            NewUser {
                name: "alice".to_string(),
                email: "alice@example.org".to_string(),
            },
            &deps,
        )
        .await
        .unwrap();
        let category = create_category(NewCategory { name: "meetups".to_string() }, &deps)
            .await
            .unwrap();

        let event = create_event(user.id, draft(category.id, 72), &deps).await.unwrap();
        assert_eq!(event.state, EventState::Pending);
        assert_eq!(event.owner_id, user.id);
    }

    #[tokio::test]
    async fn rejects_event_sooner_than_two_hours() {
        let (deps, _) = test_deps();
        let user = create_user(
            NewUser {
                name: "alice".to_string(),
                email: "alice@example.org".to_string(),
            },
            &deps,
        )
        .await
        .unwrap();
        let category = create_category(NewCategory { name: "meetups".to_string() }, &deps)
            .await
            .unwrap();

        let result = create_event(user.id, draft(category.id, 1), &deps).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let (deps, _) = test_deps();
        let user = create_user(
            NewUser {
                name: "alice".to_string(),
                email: "alice@example.org".to_string(),
            },
            &deps,
        )
        .await
        .unwrap();

        let result = create_event(user.id, draft(CategoryId::new(), 72), &deps).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }
}
