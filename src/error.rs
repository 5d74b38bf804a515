//! Error type shared by the model mutation API and the reduction planner.
//!
//! Feasibility violations (a broken communication graph, an uncovered
//! target) are never reported through this type. They are ordinary
//! analysis results.

use thiserror::Error;

use crate::analysis::planner::Reduction;
use crate::model::NodeId;

/// Errors returned by model mutations and planner entry points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    /// `add_sensor` with an id already used by a sensor or by the sink.
    #[error("node id `{0}` is already present")]
    DuplicateId(NodeId),
    /// Remove/relocate referencing an id that is not in the network.
    #[error("node `{0}` not found")]
    NodeNotFound(NodeId),
    #[error("node `{0}` is the sink and cannot be removed")]
    CannotRemoveSink(NodeId),
    #[error("node `{0}` is the sink and cannot be relocated")]
    CannotRelocateSink(NodeId),
    /// Capture and communication radii must both be finite and strictly positive.
    #[error("invalid radius: capture {capture}, communication {comm} (both must be > 0)")]
    InvalidRadius { capture: f64, comm: f64 },
    #[error("invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition { x: f64, y: f64 },
    /// A proposal validated against an older model revision.
    #[error("proposal was validated at revision {expected} but the model is at revision {actual}")]
    StaleProposal { expected: u64, actual: u64 },
    /// `plan_reduction` stopped early; `partial` holds the decisions made so far.
    #[error("reduction cancelled after {} removal(s)", .partial.removed.len())]
    CancelledOperation { partial: Box<Reduction> },
}
