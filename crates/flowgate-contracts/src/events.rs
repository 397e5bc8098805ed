// Run lifecycle event DTOs
//
// The engine is the sole source of event ordering and content; the gateway
// relays events into the trace exactly as received.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle marker emitted by the engine during a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleEvent {
    WorkflowStart,
    WorkflowEnd,
    StepStart,
    StepEnd,
}

impl LifecycleEvent {
    /// The full set of markers a run can emit
    pub const ALL: [LifecycleEvent; 4] = [
        LifecycleEvent::WorkflowStart,
        LifecycleEvent::WorkflowEnd,
        LifecycleEvent::StepStart,
        LifecycleEvent::StepEnd,
    ];
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::WorkflowStart => write!(f, "workflow-start"),
            LifecycleEvent::WorkflowEnd => write!(f, "workflow-end"),
            LifecycleEvent::StepStart => write!(f, "step-start"),
            LifecycleEvent::StepEnd => write!(f, "step-end"),
        }
    }
}

/// One entry of a run's execution trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ExecutionEvent {
    pub event: LifecycleEvent,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Result of a run plus the ordered trace collected while it executed
///
/// Exists only for the duration of one run invocation; never persisted and
/// never shared across concurrent runs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunOutcome {
    pub result: serde_json::Value,
    pub events: Vec<ExecutionEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_wire_names() {
        for (event, name) in [
            (LifecycleEvent::WorkflowStart, "workflow-start"),
            (LifecycleEvent::WorkflowEnd, "workflow-end"),
            (LifecycleEvent::StepStart, "step-start"),
            (LifecycleEvent::StepEnd, "step-end"),
        ] {
            assert_eq!(
                serde_json::to_value(event).unwrap(),
                json!(name),
                "wire name for {event:?}"
            );
            assert_eq!(event.to_string(), name);
        }
    }

    #[test]
    fn test_outcome_serializes_result_and_events() {
        let outcome = RunOutcome {
            result: json!({"answer": 42}),
            events: vec![ExecutionEvent {
                event: LifecycleEvent::WorkflowStart,
                data: json!({"workflowId": "wf-1"}),
            }],
        };

        let encoded = serde_json::to_value(&outcome).unwrap();
        assert_eq!(encoded["result"]["answer"], 42);
        assert_eq!(encoded["events"][0]["event"], "workflow-start");
    }
}
