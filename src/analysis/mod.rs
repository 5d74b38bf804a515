//! Read-only analysis over snapshots.
//!
//! Every pass here is a pure function of a [`Snapshot`](crate::model::Snapshot):
//! no shared mutable state, so evaluations may run concurrently on the same or
//! different snapshots. Only the reduction pass is sequential internally,
//! because each removal decision depends on the ones before it.
//!
//! ## Module Organization
//!
//! - `connectivity`: Communication graph and reachability from the sink
//! - `coverage`: Which targets lie within capture radius of some node
//! - `evaluator`: Joint feasibility verdict
//! - `planner`: Remove/relocate checks, proposals, greedy reduction
//! - `cancel`: Cooperative cancellation for the reduction pass
//! - `export`: Serialisable record for renderers

pub mod cancel;
pub mod connectivity;
pub mod coverage;
pub mod evaluator;
pub mod export;
pub mod planner;

pub use cancel::CancelToken;
pub use connectivity::CommGraph;
pub use coverage::{TargetCoverage, coverage, uncovered};
pub use evaluator::{FeasibilityResult, evaluate};
pub use export::TopologyExport;
pub use planner::{
    Proposal, Reduction, RelocationCheck, RemovalCheck, RemovalReason, can_relocate, can_remove, plan_reduction, plan_reduction_with_cancel, propose,
    redundant_sensors,
};
