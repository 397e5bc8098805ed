// Workflow definition DTOs (the persisted unit of the definition registry)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Execution mode understood by the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowType {
    ShortRunning,
    LongRunning,
}

impl std::fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowType::ShortRunning => write!(f, "short-running"),
            WorkflowType::LongRunning => write!(f, "long-running"),
        }
    }
}

/// Successor edge from one function node to another
///
/// `values` is an opaque payload the engine forwards between steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextEdge {
    pub function_id: String,
    #[serde(default)]
    pub values: serde_json::Value,
}

/// One step in a workflow definition
///
/// `executor` is an engine-interpreted unit of work. This service stores and
/// round-trips it verbatim; it never inspects or executes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct FunctionNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub executor: serde_json::Value,
    #[serde(default)]
    pub next: Vec<NextEdge>,
}

/// A named, identified graph of function nodes and their successor edges
///
/// The id is assigned by the caller at creation time and is the only key a
/// definition is addressable by. Edges are not validated here; a dangling
/// `next.functionId` passes through untouched and the engine decides what to
/// do with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub functions: Vec<FunctionNode>,
}

/// Request body for creating or replacing a workflow definition
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveWorkflowRequest {
    pub definition: WorkflowDefinition,
}

/// Request body for triggering a run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunWorkflowRequest {
    #[serde(default)]
    pub input: serde_json::Value,
}
