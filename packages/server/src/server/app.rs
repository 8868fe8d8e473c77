//! Application setup and server configuration.

use std::sync::Arc;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Present only when running against Postgres; used by the health check.
    pub pool: Option<PgPool>,
}

pub fn build_app(deps: Arc<ServerDeps>, pool: Option<PgPool>) -> Router {
    let state = AppState { deps, pool };

    Router::new()
        .route("/health", get(routes::health::health_handler))
        // Public event views
        .route("/events", get(routes::events::search_published))
        .route("/events/:event_id", get(routes::events::get_published))
        // Organizer surface
        .route(
            "/users/:user_id/events",
            get(routes::events::list_own).post(routes::events::create),
        )
        .route(
            "/users/:user_id/events/:event_id",
            get(routes::events::get_own).patch(routes::events::update_own),
        )
        .route(
            "/users/:user_id/events/:event_id/cancel",
            patch(routes::events::cancel_own),
        )
        .route(
            "/users/:user_id/events/:event_id/requests",
            get(routes::requests::list_for_event),
        )
        .route(
            "/users/:user_id/events/:event_id/requests/:request_id/confirm",
            patch(routes::requests::confirm),
        )
        .route(
            "/users/:user_id/events/:event_id/requests/:request_id/reject",
            patch(routes::requests::decline),
        )
        // Requester surface
        .route(
            "/users/:user_id/requests",
            get(routes::requests::list_own).post(routes::requests::create),
        )
        .route(
            "/users/:user_id/requests/:request_id/cancel",
            patch(routes::requests::cancel),
        )
        // Subscriptions
        .route(
            "/users/:user_id/subscriptions",
            get(routes::subscriptions::list),
        )
        .route(
            "/users/:user_id/subscriptions/events",
            get(routes::subscriptions::friend_feed),
        )
        // POST takes a friend id, DELETE a subscription id
        .route(
            "/users/:user_id/subscriptions/:target_id",
            post(routes::subscriptions::subscribe).delete(routes::subscriptions::unsubscribe),
        )
        // Compilations
        .route("/compilations", get(routes::compilations::list))
        .route(
            "/compilations/:compilation_id",
            get(routes::compilations::get),
        )
        // Administration
        .route(
            "/admin/compilations",
            post(routes::compilations::create),
        )
        .route(
            "/admin/compilations/:compilation_id",
            delete(routes::compilations::delete),
        )
        .route(
            "/admin/compilations/:compilation_id/events/:event_id",
            patch(routes::compilations::add_event).delete(routes::compilations::remove_event),
        )
        .route(
            "/admin/compilations/:compilation_id/pin",
            patch(routes::compilations::pin).delete(routes::compilations::unpin),
        )
        .route("/admin/users", post(routes::admin::create_user))
        .route("/admin/categories", post(routes::admin::create_category))
        .route("/admin/events", get(routes::admin::search_events))
        .route("/admin/events/:event_id", put(routes::admin::update_event))
        .route(
            "/admin/events/:event_id/publish",
            patch(routes::admin::publish_event),
        )
        .route(
            "/admin/events/:event_id/reject",
            patch(routes::admin::decline_event),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
