// Flowgate API server
// Decision: store and engine backends are selected at startup and injected
// through state; routes never reach for globals

mod workflows;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::{extract::State, routing::get, Json, Router};
use flowgate_contracts::{
    ExecutionEvent, FunctionNode, LifecycleEvent, ListResponse, NextEdge, RunOutcome,
    RunWorkflowRequest, SaveWorkflowRequest, WorkflowDefinition, WorkflowType,
};
use flowgate_engine::InProcessEngine;
use flowgate_storage::{create_store, StoreConfig};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store_backend: String,
}

/// State for the health endpoint
#[derive(Clone)]
struct HealthState {
    store_backend: String,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store_backend: state.store_backend.clone(),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        workflows::create_workflow,
        workflows::list_workflows,
        workflows::get_workflow,
        workflows::update_workflow,
        workflows::delete_workflow,
        workflows::run_workflow,
    ),
    components(
        schemas(
            WorkflowDefinition, WorkflowType, FunctionNode, NextEdge,
            LifecycleEvent, ExecutionEvent, RunOutcome,
            SaveWorkflowRequest, RunWorkflowRequest,
            ListResponse<WorkflowDefinition>,
        )
    ),
    tags(
        (name = "workflows", description = "Workflow definition and run endpoints")
    ),
    info(
        title = "Flowgate API",
        description = "API for storing workflow definitions and running them through an execution engine",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowgate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("flowgate-api starting...");

    // Construct the definition store from environment configuration
    let store_config = StoreConfig::from_env();
    let store = create_store(&store_config);

    // The in-process engine is the default backend; real engines plug in
    // behind the WorkflowEngine trait
    let engine = Arc::new(InProcessEngine::new());

    let state = workflows::AppState::new(store, engine);
    let health_state = HealthState {
        store_backend: format!("{:?}", store_config.backend),
    };

    // Load CORS allowed origins from environment (optional)
    // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
    }

    let app = build_app(state, health_state, cors_origins);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the application router (extracted for testing)
fn build_app(
    state: workflows::AppState,
    health_state: HealthState,
    cors_origins: Vec<HeaderValue>,
) -> Router {
    let app = Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(workflows::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if cors_origins.is_empty() {
        app
    } else {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
        )
    };

    app.layer(TraceLayer::new_for_http())
}
