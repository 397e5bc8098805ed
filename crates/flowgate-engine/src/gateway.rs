// Execution gateway
//
// Drives one run end-to-end: resolve the definition, register a per-call
// event sink, invoke the engine, and return the result together with the
// ordered trace. The gateway never reorders, filters, or deduplicates
// events; the trace is exactly what the engine emitted, in arrival order.

use std::sync::Arc;

use flowgate_contracts::{ExecutionEvent, RunOutcome};
use flowgate_storage::{DefinitionStore, StorageError};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::engine::{ProgressSubscription, WorkflowEngine};

/// Errors surfaced by a run invocation
#[derive(Debug, Error)]
pub enum RunError {
    /// No definition is stored under the requested id
    #[error("workflow not found: {0}")]
    WorkflowNotFound(String),

    /// Definition lookup failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The external run failed; any partially collected trace is discarded
    #[error("engine failure: {0}")]
    Engine(anyhow::Error),
}

/// Gateway from stored definitions to engine runs
pub struct ExecutionGateway {
    store: Arc<dyn DefinitionStore>,
    engine: Arc<dyn WorkflowEngine>,
}

impl ExecutionGateway {
    pub fn new(store: Arc<dyn DefinitionStore>, engine: Arc<dyn WorkflowEngine>) -> Self {
        Self { store, engine }
    }

    /// Run the definition stored under `id` against `input`.
    ///
    /// The engine is only invoked once the definition resolves; an unknown id
    /// fails closed with `WorkflowNotFound`.
    pub async fn run(&self, id: &str, input: Value) -> Result<RunOutcome, RunError> {
        let definition = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| RunError::WorkflowNotFound(id.to_string()))?;

        tracing::info!(workflow_id = %id, "Starting workflow run");

        // Fresh sink per call; concurrent runs never share a channel.
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut run = self.engine.start_run();
        run.progress(ProgressSubscription::all(Box::new(move |event, data| {
            // the receiver is drained only after run_workflow returns, so a
            // failed send means the trace was already taken
            let _ = events_tx.send(ExecutionEvent { event, data });
        })));

        let result = run
            .run_workflow(definition, input)
            .await
            .map_err(RunError::Engine)?;

        // Dropping the run drops the last sender, so the drain terminates.
        drop(run);
        let mut events = Vec::new();
        while let Some(event) = events_rx.recv().await {
            events.push(event);
        }

        tracing::info!(workflow_id = %id, events = events.len(), "Workflow run completed");

        Ok(RunOutcome { result, events })
    }
}
