//! User actions - administrative creation and lookup.

use chrono::Utc;
use tracing::info;

use crate::common::{DomainError, DomainResult, UserId};
use crate::domains::users::models::{NewUser, User};
use crate::kernel::ServerDeps;

pub async fn create_user(draft: NewUser, deps: &ServerDeps) -> DomainResult<User> {
    let user = User::new(draft, Utc::now());
    let user = deps.users.insert(user).await?;
    info!("Created user {} ({})", user.id, user.name);
    Ok(user)
}

pub async fn find_user(user_id: UserId, deps: &ServerDeps) -> DomainResult<User> {
    deps.users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("user {user_id} does not exist")))
}
