//! Creator/reviewer convergence loop
//!
//! One upload runs the creator, then the reviewer, and repeats with the
//! review as feedback until [`AcceptancePolicy`] calls it done.

pub mod convergence;
pub mod policy;
mod session;

pub use convergence::{orchestrate_agents, ConvergenceError};
pub use policy::{AcceptancePolicy, Verdict, DEFAULT_MAX_ITERATIONS, REWORK_MARKER};
pub use session::ConvergenceOutcome;
