// Engine contract
// Decision: one single-use EngineRun per invocation, so a progress
// subscription can never outlive its run or leak into a concurrent one

use async_trait::async_trait;
use flowgate_contracts::{LifecycleEvent, WorkflowDefinition};
use serde_json::Value;

/// Callback invoked once per lifecycle event
pub type ProgressHandler = Box<dyn Fn(LifecycleEvent, Value) + Send + Sync>;

/// Subscription to a subset of the lifecycle markers for one run
pub struct ProgressSubscription {
    pub events: Vec<LifecycleEvent>,
    pub handler: ProgressHandler,
}

impl ProgressSubscription {
    /// Subscribe `handler` to all four lifecycle markers
    pub fn all(handler: ProgressHandler) -> Self {
        Self {
            events: LifecycleEvent::ALL.to_vec(),
            handler,
        }
    }

    /// Whether `event` is part of the requested subset
    pub fn wants(&self, event: LifecycleEvent) -> bool {
        self.events.contains(&event)
    }
}

/// A workflow-execution engine.
///
/// Implementations interpret a definition and an input into a result,
/// emitting lifecycle events along the way. How the engine walks the graph,
/// resolves `next` edges, or computes step results is entirely its own
/// business; callers only rely on this contract.
pub trait WorkflowEngine: Send + Sync {
    /// Open a fresh, single-use run handle.
    fn start_run(&self) -> Box<dyn EngineRun>;
}

/// One engine run: register progress, then execute to completion
#[async_trait]
pub trait EngineRun: Send {
    /// Register the progress subscription for this run.
    ///
    /// The engine invokes the handler once per emitted event, in emission
    /// order, for the requested subset of markers.
    fn progress(&mut self, subscription: ProgressSubscription);

    /// Execute `definition` against `input`, suspending until the run
    /// concludes. A handle is never reused after this returns.
    async fn run_workflow(
        &mut self,
        definition: WorkflowDefinition,
        input: Value,
    ) -> anyhow::Result<Value>;
}
