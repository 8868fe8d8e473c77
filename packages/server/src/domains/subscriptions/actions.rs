//! Subscription actions - subscribe, unsubscribe and the friends feed.

use chrono::Utc;
use tracing::info;

use crate::common::{DomainError, DomainResult, SubscriptionId, UserId};
use crate::domains::events::data::{enrich_read_models, EventSummary};
use crate::domains::subscriptions::models::Subscription;
use crate::domains::users::actions::find_user;
use crate::kernel::ServerDeps;

pub async fn subscribe(user_id: UserId, friend_id: UserId, deps: &ServerDeps) -> DomainResult<Subscription> {
    find_user(user_id, deps).await?;
    find_user(friend_id, deps).await?;

    // One subscription per user/friend pair, matching the storage unique constraint
    let existing = deps.subscriptions.find_by_user(user_id).await?;
    if existing.iter().any(|s| s.friend_id == friend_id) {
        return Err(DomainError::conflict(format!("already subscribed to user {friend_id}")));
    }

    let subscription = Subscription::new(user_id, friend_id, Utc::now());
    let subscription = deps.subscriptions.insert(subscription).await?;
    info!("User {} subscribed to {}", user_id, friend_id);
    Ok(subscription)
}

pub async fn unsubscribe(subscription_id: SubscriptionId, deps: &ServerDeps) -> DomainResult<()> {
    deps.subscriptions
        .find_by_id(subscription_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("subscription {subscription_id} does not exist")))?;

    deps.subscriptions.delete(subscription_id).await?;
    info!("Deleted subscription {}", subscription_id);
    Ok(())
}

pub async fn list_subscriptions(user_id: UserId, deps: &ServerDeps) -> DomainResult<Vec<Subscription>> {
    Ok(deps.subscriptions.find_by_user(user_id).await?)
}

/// Events organized by the users `user_id` is subscribed to, enriched like
/// any other event read model.
pub async fn friend_events(user_id: UserId, deps: &ServerDeps) -> DomainResult<Vec<EventSummary>> {
    let subscriptions = deps.subscriptions.find_by_user(user_id).await?;

    let mut summaries: Vec<EventSummary> = Vec::new();
    for subscription in &subscriptions {
        let events = deps.events.find_by_owner(subscription.friend_id).await?;
        summaries.extend(events.into_iter().map(EventSummary::from));
    }

    enrich_read_models(&mut summaries, deps).await?;
    Ok(summaries)
}
