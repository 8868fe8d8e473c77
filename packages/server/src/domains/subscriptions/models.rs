use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::{SubscriptionId, UserId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub friend_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(user_id: UserId, friend_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            friend_id,
            created_at: now,
        }
    }
}
