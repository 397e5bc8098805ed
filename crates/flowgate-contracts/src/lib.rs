// Public contracts for the Flowgate API
// This crate defines the DTOs shared by the storage, engine, and route layers

pub mod common;
pub mod events;
pub mod workflow;

pub use common::*;
pub use events::*;
pub use workflow::*;
