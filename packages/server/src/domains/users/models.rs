use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::UserId;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(draft: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            name: draft.name,
            email: draft.email,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}
