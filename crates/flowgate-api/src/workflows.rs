// Workflow definition CRUD and run HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use flowgate_contracts::{
    ListResponse, RunOutcome, RunWorkflowRequest, SaveWorkflowRequest, WorkflowDefinition,
};
use flowgate_engine::{ExecutionGateway, RunError, WorkflowEngine};
use flowgate_storage::{DefinitionStore, StorageError};
use serde_json::Value;
use std::sync::Arc;

/// App state for workflow routes
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DefinitionStore>,
    pub gateway: Arc<ExecutionGateway>,
}

impl AppState {
    pub fn new(store: Arc<dyn DefinitionStore>, engine: Arc<dyn WorkflowEngine>) -> Self {
        let gateway = Arc::new(ExecutionGateway::new(Arc::clone(&store), engine));
        Self { store, gateway }
    }
}

/// Create workflow routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/workflows", post(create_workflow).get(list_workflows))
        .route(
            "/v1/workflows/{id}",
            get(get_workflow)
                .put(update_workflow)
                .delete(delete_workflow),
        )
        .route("/v1/workflows/{id}/run", post(run_workflow))
        .with_state(state)
}

// Request bodies are decoded from Value by hand so a malformed shape maps to
// 400, not the typed extractor's 422.

/// POST /v1/workflows - Create a workflow definition
#[utoipa::path(
    post,
    path = "/v1/workflows",
    request_body = SaveWorkflowRequest,
    responses(
        (status = 201, description = "Workflow definition created", body = WorkflowDefinition),
        (status = 400, description = "Invalid body shape or definition id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "workflows"
)]
pub async fn create_workflow(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<WorkflowDefinition>), StatusCode> {
    let req: SaveWorkflowRequest =
        serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.store.save(&req.definition).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(req.definition))),
        Err(StorageError::InvalidId { reason }) => {
            tracing::debug!(reason = %reason, "Rejected workflow creation");
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            tracing::error!("Failed to save workflow: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/workflows - List all workflow definitions
#[utoipa::path(
    get,
    path = "/v1/workflows",
    responses(
        (status = 200, description = "List of workflow definitions", body = ListResponse<WorkflowDefinition>),
        (status = 500, description = "Internal server error")
    ),
    tag = "workflows"
)]
pub async fn list_workflows(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<WorkflowDefinition>>, StatusCode> {
    let definitions = state.store.list().await.map_err(|e| {
        tracing::error!("Failed to list workflows: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ListResponse::new(definitions)))
}

/// GET /v1/workflows/{id} - Get a workflow definition by id
#[utoipa::path(
    get,
    path = "/v1/workflows/{id}",
    params(
        ("id" = String, Path, description = "Workflow definition id")
    ),
    responses(
        (status = 200, description = "Workflow definition found", body = WorkflowDefinition),
        (status = 404, description = "Workflow definition not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "workflows"
)]
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkflowDefinition>, StatusCode> {
    let definition = state
        .store
        .get(&id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get workflow: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(definition))
}

/// PUT /v1/workflows/{id} - Replace a workflow definition
#[utoipa::path(
    put,
    path = "/v1/workflows/{id}",
    params(
        ("id" = String, Path, description = "Workflow definition id")
    ),
    request_body = SaveWorkflowRequest,
    responses(
        (status = 200, description = "Workflow definition replaced", body = WorkflowDefinition),
        (status = 400, description = "Invalid body shape or id mismatch"),
        (status = 404, description = "Workflow definition not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "workflows"
)]
pub async fn update_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<WorkflowDefinition>, StatusCode> {
    let req: SaveWorkflowRequest =
        serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;
    if req.definition.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }

    let existing = state.store.get(&id).await.map_err(|e| {
        tracing::error!("Failed to get workflow: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if existing.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }

    match state.store.save(&req.definition).await {
        Ok(()) => Ok(Json(req.definition)),
        Err(StorageError::InvalidId { .. }) => Err(StatusCode::BAD_REQUEST),
        Err(e) => {
            tracing::error!("Failed to replace workflow: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /v1/workflows/{id} - Delete a workflow definition
#[utoipa::path(
    delete,
    path = "/v1/workflows/{id}",
    params(
        ("id" = String, Path, description = "Workflow definition id")
    ),
    responses(
        (status = 204, description = "Workflow definition deleted"),
        (status = 404, description = "Workflow definition not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "workflows"
)]
pub async fn delete_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let existing = state.store.get(&id).await.map_err(|e| {
        tracing::error!("Failed to get workflow: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if existing.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }

    state.store.delete(&id).await.map_err(|e| {
        tracing::error!("Failed to delete workflow: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/workflows/{id}/run - Run a workflow definition
#[utoipa::path(
    post,
    path = "/v1/workflows/{id}/run",
    params(
        ("id" = String, Path, description = "Workflow definition id")
    ),
    request_body = RunWorkflowRequest,
    responses(
        (status = 200, description = "Run completed", body = RunOutcome),
        (status = 400, description = "Invalid run input shape"),
        (status = 404, description = "Workflow definition not found"),
        (status = 500, description = "Storage or engine failure")
    ),
    tag = "workflows"
)]
pub async fn run_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<RunOutcome>, StatusCode> {
    let req: RunWorkflowRequest =
        serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.gateway.run(&id, req.input).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(RunError::WorkflowNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Workflow run failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
