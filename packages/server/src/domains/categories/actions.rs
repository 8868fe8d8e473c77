//! Category actions - administrative creation and lookup.

use tracing::info;

use crate::common::{CategoryId, DomainError, DomainResult};
use crate::domains::categories::models::{Category, NewCategory};
use crate::kernel::ServerDeps;

pub async fn create_category(draft: NewCategory, deps: &ServerDeps) -> DomainResult<Category> {
    let category = Category::new(draft);
    let category = deps.categories.insert(category).await?;
    info!("Created category {} ({})", category.id, category.name);
    Ok(category)
}

pub async fn find_category(category_id: CategoryId, deps: &ServerDeps) -> DomainResult<Category> {
    deps.categories
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("category {category_id} does not exist")))
}
