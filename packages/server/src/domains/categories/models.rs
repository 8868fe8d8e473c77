use serde::{Deserialize, Serialize};

use crate::common::CategoryId;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(draft: NewCategory) -> Self {
        Self {
            id: CategoryId::new(),
            name: draft.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
}
