//! axon-runtime: Fire-and-forget execution for cognitive operations
//!
//! This crate provides:
//! - The closed set of cognitive operation kinds and their terminal events
//! - The `OperationExecutor` seam where model backends plug in
//! - A bounded worker pool scheduler guaranteeing exactly one terminal
//!   event per submission
//! - The `Runtime` facade generated code calls into

pub mod config;
pub mod error;
pub mod executor;
pub mod fake;
pub mod operation;
pub mod runtime;
pub mod scheduler;

// Re-exports
pub use config::RuntimeConfig;
pub use error::{OperationError, SubmitError};
pub use executor::OperationExecutor;
pub use fake::{ExecutorCall, FakeExecutor};
pub use operation::{OpKind, OpState, PendingOperation};
pub use runtime::Runtime;
pub use scheduler::ExecutionScheduler;
