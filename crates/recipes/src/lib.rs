pub mod bootstrap;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    database::Database,
    handlers::{
        get_recipe, get_stats, health_check, list_categories, list_recipes,
        list_units_of_measure,
    },
};

pub fn create_router(pool: PgPool) -> Router {
    let db = Database::new(pool);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        // Recipe routes
        .route("/recipes", get(list_recipes))
        .route("/recipes/{id}", get(get_recipe))
        // Reference data routes
        .route("/categories", get(list_categories))
        .route("/units", get(list_units_of_measure))
        .layer(Extension(db))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

pub async fn run_server(pool: PgPool, port: u16) -> anyhow::Result<()> {
    let app = create_router(pool);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    println!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
