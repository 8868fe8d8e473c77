//! Subscription endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{DomainResult, SubscriptionId, UserId};
use crate::domains::events::data::EventSummary;
use crate::domains::subscriptions::actions;
use crate::domains::subscriptions::models::Subscription;
use crate::server::app::AppState;

pub async fn subscribe(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(UserId, UserId)>,
) -> DomainResult<(StatusCode, Json<Subscription>)> {
    let subscription = actions::subscribe(user_id, friend_id, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    Path((_user_id, subscription_id)): Path<(UserId, SubscriptionId)>,
) -> DomainResult<StatusCode> {
    actions::unsubscribe(subscription_id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> DomainResult<Json<Vec<Subscription>>> {
    let subscriptions = actions::list_subscriptions(user_id, &state.deps).await?;
    Ok(Json(subscriptions))
}

pub async fn friend_feed(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> DomainResult<Json<Vec<EventSummary>>> {
    let events = actions::friend_events(user_id, &state.deps).await?;
    Ok(Json(events))
}
