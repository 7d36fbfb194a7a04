//! Scheduling and execution of the computation graph.
//!
//! [`build_schedule`] linearizes the nodes reachable from a set of leaves
//! into a topological order once; [`forward`] and [`backward`] then walk that
//! order (and its reverse) on every training step.

pub mod backward;
pub mod forward;
pub mod grad_check;
pub mod schedule;

pub use backward::backward;
pub use forward::forward;
pub use grad_check::{check_gradients, GradCheckError};
pub use schedule::{build_schedule, Schedule};
