//! # Server Configuration
//!
//! Router assembly, shared state and the OpenAPI document for the Brands service.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, brands};
use crate::telemetry::trace_context_middleware;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route(
            "/api/brands",
            get(brands::list_brands).post(brands::create_brand),
        )
        .route("/api/brands/search", get(brands::search_brands))
        .route(
            "/api/brands/with-website",
            get(brands::list_brands_with_website),
        )
        .route("/api/brands/name/{name}", get(brands::get_brand_by_name))
        .route(
            "/api/brands/mobile/{mobileNumber}",
            get(brands::list_brands_by_mobile),
        )
        .route(
            "/api/brands/{id}",
            get(brands::get_brand)
                .put(brands::update_brand)
                .delete(brands::delete_brand),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(cors)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> Result<()> {
    let addr = config
        .bind_addr()
        .with_context(|| format!("Invalid server address: {}", config.api_bind_addr))?;

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let profile = state.config.profile.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, %profile, "Brands API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::readyz,
        crate::handlers::brands::list_brands,
        crate::handlers::brands::search_brands,
        crate::handlers::brands::list_brands_with_website,
        crate::handlers::brands::get_brand_by_name,
        crate::handlers::brands::list_brands_by_mobile,
        crate::handlers::brands::get_brand,
        crate::handlers::brands::create_brand,
        crate::handlers::brands::update_brand,
        crate::handlers::brands::delete_brand,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::HealthStatus,
            crate::handlers::brands::BrandRequestDto,
            crate::handlers::brands::BrandResponseDto,
            crate::validation::FieldViolation,
            crate::error::ApiError,
        )
    ),
    tags(
        (name = "root", description = "Service information"),
        (name = "health", description = "Liveness and readiness checks"),
        (name = "brands", description = "Brand profile management"),
    ),
    info(
        title = "Brands API",
        description = "CRUD and search API for advertiser brand profiles",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
