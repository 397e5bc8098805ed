// Execution engine boundary and gateway
//
// The engine that interprets definitions is an external collaborator; this
// crate defines its contract, the gateway that drives one run end-to-end,
// and the in-process engine used by default in development and tests.

pub mod engine;
pub mod gateway;
pub mod inprocess;

pub use engine::{EngineRun, ProgressHandler, ProgressSubscription, WorkflowEngine};
pub use gateway::{ExecutionGateway, RunError};
pub use inprocess::InProcessEngine;
