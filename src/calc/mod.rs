//! Deterministic calculator engine
//!
//! All input sequencing logic lives here. This module must stay pure:
//! - Synchronous command handlers only
//! - No rendering or platform dependencies
//! - Errors are sticky state, never panics

pub mod engine;
pub mod state;

pub use engine::Calculator;
pub use state::{CalcError, Operator, Pending, Snapshot};
