//! Postgres store implementations.
//!
//! Runtime queries via `sqlx::query_as` with row structs; states and
//! statuses are stored as uppercase TEXT and parsed back on read.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{CategoryId, CompilationId, EventId, RequestId, SubscriptionId, UserId};
use crate::domains::categories::models::Category;
use crate::domains::compilations::models::Compilation;
use crate::domains::events::models::{Event, EventFilters, EventState, Window};
use crate::domains::requests::models::{Request, RequestStatus};
use crate::domains::subscriptions::models::Subscription;
use crate::domains::users::models::User;
use crate::kernel::{
    BaseCategoryStore, BaseCompilationStore, BaseEventStore, BaseRequestStore,
    BaseSubscriptionStore, BaseUserStore,
};

// =============================================================================
// Events
// =============================================================================

#[derive(sqlx::FromRow)]
struct EventRow {
    id: EventId,
    owner_id: UserId,
    category_id: CategoryId,
    title: String,
    annotation: String,
    description: String,
    paid: bool,
    event_date: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    participant_limit: i32,
    request_moderation: bool,
    state: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = anyhow::Error;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Event {
            id: row.id,
            owner_id: row.owner_id,
            category_id: row.category_id,
            title: row.title,
            annotation: row.annotation,
            description: row.description,
            paid: row.paid,
            event_date: row.event_date,
            published_at: row.published_at,
            participant_limit: u32::try_from(row.participant_limit)?,
            request_moderation: row.request_moderation,
            state: EventState::parse(&row.state)?,
            created_at: row.created_at,
        })
    }
}

pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseEventStore for PgEventStore {
    async fn insert(&self, event: Event) -> Result<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (
                id, owner_id, category_id, title, annotation, description,
                paid, event_date, published_at, participant_limit,
                request_moderation, state, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(event.id)
        .bind(event.owner_id)
        .bind(event.category_id)
        .bind(&event.title)
        .bind(&event.annotation)
        .bind(&event.description)
        .bind(event.paid)
        .bind(event.event_date)
        .bind(event.published_at)
        .bind(i32::try_from(event.participant_limit)?)
        .bind(event.request_moderation)
        .bind(event.state.as_str())
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Event::try_from).transpose()
    }

    async fn update(&self, event: Event) -> Result<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET category_id = $2, title = $3, annotation = $4, description = $5,
                paid = $6, event_date = $7, published_at = $8,
                participant_limit = $9, request_moderation = $10, state = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(event.id)
        .bind(event.category_id)
        .bind(&event.title)
        .bind(&event.annotation)
        .bind(&event.description)
        .bind(event.paid)
        .bind(event.event_date)
        .bind(event.published_at)
        .bind(i32::try_from(event.participant_limit)?)
        .bind(event.request_moderation)
        .bind(event.state.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT * FROM events WHERE owner_id = $1 ORDER BY event_date ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Event::try_from).collect()
    }

    async fn search(&self, filters: &EventFilters, window: Window) -> Result<Vec<Event>> {
        let owners = filters.owners.clone();
        let states: Option<Vec<String>> = filters
            .states
            .as_ref()
            .map(|s| s.iter().map(|st| st.as_str().to_string()).collect());
        let categories = filters.categories.clone();

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT * FROM events
            WHERE ($1::uuid[] IS NULL OR owner_id = ANY($1))
              AND ($2::text[] IS NULL OR state = ANY($2))
              AND ($3::uuid[] IS NULL OR category_id = ANY($3))
              AND ($4::timestamptz IS NULL OR event_date >= $4)
              AND ($5::timestamptz IS NULL OR event_date <= $5)
            ORDER BY event_date ASC
            OFFSET $6 LIMIT $7
            "#,
        )
        .bind(owners)
        .bind(states)
        .bind(categories)
        .bind(filters.range_start)
        .bind(filters.range_end)
        .bind(i64::try_from(window.from)?)
        .bind(i64::try_from(window.size)?)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Event::try_from).collect()
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(sqlx::FromRow)]
struct RequestRow {
    id: RequestId,
    user_id: UserId,
    event_id: EventId,
    created: DateTime<Utc>,
    status: String,
}

impl TryFrom<RequestRow> for Request {
    type Error = anyhow::Error;

    fn try_from(row: RequestRow) -> Result<Self> {
        Ok(Request {
            id: row.id,
            user_id: row.user_id,
            event_id: row.event_id,
            created: row.created,
            status: RequestStatus::parse(&row.status)?,
        })
    }
}

pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRequestStore for PgRequestStore {
    async fn insert(&self, request: Request) -> Result<Request> {
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            INSERT INTO requests (id, user_id, event_id, created, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(request.user_id)
        .bind(request.event_id)
        .bind(request.created)
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<Request>> {
        let row = sqlx::query_as::<_, RequestRow>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Request::try_from).transpose()
    }

    async fn update(&self, request: Request) -> Result<Request> {
        let row = sqlx::query_as::<_, RequestRow>(
            "UPDATE requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(request.id)
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Request>> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM requests WHERE user_id = $1 ORDER BY created ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Request::try_from).collect()
    }

    async fn find_by_event(&self, event_id: EventId) -> Result<Vec<Request>> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM requests WHERE event_id = $1 ORDER BY created ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Request::try_from).collect()
    }

    async fn confirmed_count(&self, event_id: EventId) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM requests WHERE event_id = $1 AND status = 'CONFIRMED'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(u64::try_from(count)?)
    }

    async fn reject_pending(&self, event_id: EventId) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE requests SET status = 'REJECTED' WHERE event_id = $1 AND status = 'PENDING'",
        )
        .bind(event_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Users
// =============================================================================

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseUserStore for PgUserStore {
    async fn insert(&self, user: User) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

// =============================================================================
// Categories
// =============================================================================

pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCategoryStore for PgCategoryStore {
    async fn insert(&self, category: Category) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(category.id)
        .bind(&category.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }
}

// =============================================================================
// Compilations
// =============================================================================

#[derive(sqlx::FromRow)]
struct CompilationRow {
    id: CompilationId,
    title: String,
    pinned: bool,
    /// Aggregated from the join table; NULL when the compilation is empty.
    event_ids: Option<Vec<EventId>>,
}

impl From<CompilationRow> for Compilation {
    fn from(row: CompilationRow) -> Self {
        Compilation {
            id: row.id,
            title: row.title,
            pinned: row.pinned,
            event_ids: row.event_ids.unwrap_or_default(),
        }
    }
}

const COMPILATION_SELECT: &str = r#"
    SELECT c.id, c.title, c.pinned,
           array_remove(array_agg(ce.event_id), NULL) AS event_ids
    FROM compilations c
    LEFT JOIN compilation_events ce ON ce.compilation_id = c.id
"#;

pub struct PgCompilationStore {
    pool: PgPool,
}

impl PgCompilationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn replace_events(&self, id: CompilationId, event_ids: &[EventId]) -> Result<()> {
        sqlx::query("DELETE FROM compilation_events WHERE compilation_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        for event_id in event_ids {
            sqlx::query(
                "INSERT INTO compilation_events (compilation_id, event_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BaseCompilationStore for PgCompilationStore {
    async fn insert(&self, compilation: Compilation) -> Result<Compilation> {
        sqlx::query("INSERT INTO compilations (id, title, pinned) VALUES ($1, $2, $3)")
            .bind(compilation.id)
            .bind(&compilation.title)
            .bind(compilation.pinned)
            .execute(&self.pool)
            .await?;
        self.replace_events(compilation.id, &compilation.event_ids).await?;
        Ok(compilation)
    }

    async fn find_by_id(&self, id: CompilationId) -> Result<Option<Compilation>> {
        let sql = format!("{COMPILATION_SELECT} WHERE c.id = $1 GROUP BY c.id");
        let row = sqlx::query_as::<_, CompilationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Compilation::from))
    }

    async fn update(&self, compilation: Compilation) -> Result<Compilation> {
        sqlx::query("UPDATE compilations SET title = $2, pinned = $3 WHERE id = $1")
            .bind(compilation.id)
            .bind(&compilation.title)
            .bind(compilation.pinned)
            .execute(&self.pool)
            .await?;
        self.replace_events(compilation.id, &compilation.event_ids).await?;
        Ok(compilation)
    }

    async fn delete(&self, id: CompilationId) -> Result<()> {
        sqlx::query("DELETE FROM compilation_events WHERE compilation_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM compilations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, pinned: Option<bool>, window: Window) -> Result<Vec<Compilation>> {
        let sql = format!(
            "{COMPILATION_SELECT}
             WHERE ($1::boolean IS NULL OR c.pinned = $1)
             GROUP BY c.id
             ORDER BY c.id
             OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, CompilationRow>(&sql)
            .bind(pinned)
            .bind(i64::try_from(window.from)?)
            .bind(i64::try_from(window.size)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Compilation::from).collect())
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

pub struct PgSubscriptionStore {
    pool: PgPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseSubscriptionStore for PgSubscriptionStore {
    async fn insert(&self, subscription: Subscription) -> Result<Subscription> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (id, user_id, friend_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(subscription.id)
        .bind(subscription.user_id)
        .bind(subscription.friend_id)
        .bind(subscription.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(subscription)
    }

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>> {
        let subscription =
            sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(subscription)
    }

    async fn delete(&self, id: SubscriptionId) -> Result<()> {
        sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions)
    }
}
