//! Route definitions for the Hungr HTTP API.
//!
//! Resource routes are mounted under `/api`; `/health` stays at the root
//! for load balancers.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(recipe_routes())
        .merge(file_routes())
        .merge(tag_routes())
        .merge(connection_routes())
        .merge(extract_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::liveness))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(handlers::auth::login))
}

/// User lookup and management
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(handlers::user::get_user)
            .post(handlers::user::create_user)
            .put(handlers::user::update_user)
            .delete(handlers::user::delete_user),
    )
}

/// Recipes, their steps and public view
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(handlers::recipe::list_recipes)
                .post(handlers::recipe::create_recipe)
                .delete(handlers::recipe::delete_recipe),
        )
        .route("/recipes/{uuid}", patch(handlers::recipe::patch_recipe))
        .route(
            "/recipes/{uuid}/public",
            get(handlers::recipe::get_public_recipe),
        )
        .route(
            "/recipes/{uuid}/steps",
            get(handlers::step::get_steps).put(handlers::step::put_steps),
        )
        .route("/recipes/{uuid}/files", post(handlers::file::add_files))
}

/// File bytes
fn file_routes() -> Router<AppState> {
    Router::new().route("/files/{uuid}", get(handlers::file::get_file))
}

/// Tag catalog
fn tag_routes() -> Router<AppState> {
    Router::new().route("/tags", get(handlers::tag::list_tags))
}

/// Directed user connections
fn connection_routes() -> Router<AppState> {
    Router::new().route(
        "/connections",
        get(handlers::connection::list_connections)
            .post(handlers::connection::create_connection)
            .delete(handlers::connection::delete_connection),
    )
}

/// AI extraction
fn extract_routes() -> Router<AppState> {
    Router::new()
        .route("/extract-recipe", post(handlers::extract::from_url))
        .route("/extract-recipe-image", post(handlers::extract::from_images))
        .route("/extract-recipe-text", post(handlers::extract::from_text))
}
