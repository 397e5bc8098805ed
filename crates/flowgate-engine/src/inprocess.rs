// In-process reference engine
//
// Interprets a definition by walking the function graph linearly: the first
// node runs first, and each node advances through its first `next` edge. A
// dangling edge or a revisited node ends the walk without error. Real
// engines are expected to replace this behind `WorkflowEngine`; the routes
// and the gateway only rely on the lifecycle-event contract.

use std::collections::HashSet;

use async_trait::async_trait;
use flowgate_contracts::{LifecycleEvent, WorkflowDefinition};
use serde_json::{json, Value};

use crate::engine::{EngineRun, ProgressSubscription, WorkflowEngine};

/// Engine that executes runs inside the server process
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessEngine;

impl InProcessEngine {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowEngine for InProcessEngine {
    fn start_run(&self) -> Box<dyn EngineRun> {
        Box::new(InProcessRun { subscription: None })
    }
}

struct InProcessRun {
    subscription: Option<ProgressSubscription>,
}

impl InProcessRun {
    fn emit(&self, event: LifecycleEvent, data: Value) {
        if let Some(subscription) = &self.subscription {
            if subscription.wants(event) {
                (subscription.handler)(event, data);
            }
        }
    }
}

#[async_trait]
impl EngineRun for InProcessRun {
    fn progress(&mut self, subscription: ProgressSubscription) {
        self.subscription = Some(subscription);
    }

    async fn run_workflow(
        &mut self,
        definition: WorkflowDefinition,
        input: Value,
    ) -> anyhow::Result<Value> {
        tracing::debug!(workflow_id = %definition.id, "In-process engine run starting");
        self.emit(
            LifecycleEvent::WorkflowStart,
            json!({ "workflowId": definition.id, "input": input }),
        );

        let mut completed: Vec<String> = Vec::new();
        let mut visited = HashSet::new();
        let mut current = definition.functions.first();
        while let Some(node) = current {
            // revisiting a node means the graph loops; stop the walk
            if !visited.insert(node.id.clone()) {
                break;
            }

            self.emit(
                LifecycleEvent::StepStart,
                json!({ "functionId": node.id, "name": node.name }),
            );
            self.emit(LifecycleEvent::StepEnd, json!({ "functionId": node.id }));
            completed.push(node.id.clone());

            current = node.next.first().and_then(|edge| {
                definition
                    .functions
                    .iter()
                    .find(|candidate| candidate.id == edge.function_id)
            });
        }

        self.emit(
            LifecycleEvent::WorkflowEnd,
            json!({ "workflowId": definition.id }),
        );

        Ok(json!({ "status": "completed", "steps": completed }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgate_contracts::{ExecutionEvent, FunctionNode, NextEdge, WorkflowType};
    use std::sync::{Arc, Mutex};

    fn linear_definition(edges: &[(&str, &str)]) -> WorkflowDefinition {
        let functions: Vec<FunctionNode> = edges
            .iter()
            .map(|(id, next)| FunctionNode {
                id: id.to_string(),
                name: format!("step {id}"),
                executor: Value::Null,
                next: if next.is_empty() {
                    vec![]
                } else {
                    vec![NextEdge {
                        function_id: next.to_string(),
                        values: Value::Null,
                    }]
                },
            })
            .collect();
        WorkflowDefinition {
            id: "wf-test".to_string(),
            name: "test".to_string(),
            workflow_type: WorkflowType::ShortRunning,
            functions,
        }
    }

    async fn collect_run(
        definition: WorkflowDefinition,
        events: Vec<LifecycleEvent>,
    ) -> (Value, Vec<ExecutionEvent>) {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&trace);

        let mut run = InProcessEngine::new().start_run();
        run.progress(ProgressSubscription {
            events,
            handler: Box::new(move |event, data| {
                sink.lock().unwrap().push(ExecutionEvent { event, data });
            }),
        });
        let result = run.run_workflow(definition, json!({})).await.unwrap();
        let events = trace.lock().unwrap().clone();
        (result, events)
    }

    #[tokio::test]
    async fn test_two_step_event_order() {
        let definition = linear_definition(&[("fn1", "fn2"), ("fn2", "")]);
        let (result, events) = collect_run(definition, LifecycleEvent::ALL.to_vec()).await;

        let markers: Vec<LifecycleEvent> = events.iter().map(|e| e.event).collect();
        assert_eq!(
            markers,
            vec![
                LifecycleEvent::WorkflowStart,
                LifecycleEvent::StepStart,
                LifecycleEvent::StepEnd,
                LifecycleEvent::StepStart,
                LifecycleEvent::StepEnd,
                LifecycleEvent::WorkflowEnd,
            ]
        );
        assert_eq!(result["steps"], json!(["fn1", "fn2"]));
    }

    #[tokio::test]
    async fn test_dangling_edge_stops_the_walk() {
        let definition = linear_definition(&[("fn1", "nowhere")]);
        let (result, events) = collect_run(definition, LifecycleEvent::ALL.to_vec()).await;

        let markers: Vec<LifecycleEvent> = events.iter().map(|e| e.event).collect();
        assert_eq!(
            markers,
            vec![
                LifecycleEvent::WorkflowStart,
                LifecycleEvent::StepStart,
                LifecycleEvent::StepEnd,
                LifecycleEvent::WorkflowEnd,
            ]
        );
        assert_eq!(result["steps"], json!(["fn1"]));
    }

    #[tokio::test]
    async fn test_cyclic_graph_terminates() {
        let definition = linear_definition(&[("fn1", "fn2"), ("fn2", "fn1")]);
        let (result, _events) = collect_run(definition, LifecycleEvent::ALL.to_vec()).await;
        assert_eq!(result["steps"], json!(["fn1", "fn2"]));
    }

    #[tokio::test]
    async fn test_subscription_subset_is_respected() {
        let definition = linear_definition(&[("fn1", "fn2"), ("fn2", "")]);
        let (_result, events) = collect_run(
            definition,
            vec![LifecycleEvent::StepStart, LifecycleEvent::StepEnd],
        )
        .await;

        assert_eq!(events.len(), 4);
        assert!(events
            .iter()
            .all(|e| matches!(e.event, LifecycleEvent::StepStart | LifecycleEvent::StepEnd)));
    }

    #[tokio::test]
    async fn test_empty_definition_still_brackets_the_run() {
        let definition = linear_definition(&[]);
        let (result, events) = collect_run(definition, LifecycleEvent::ALL.to_vec()).await;

        let markers: Vec<LifecycleEvent> = events.iter().map(|e| e.event).collect();
        assert_eq!(
            markers,
            vec![LifecycleEvent::WorkflowStart, LifecycleEvent::WorkflowEnd]
        );
        assert_eq!(result["steps"], json!([]));
    }
}
