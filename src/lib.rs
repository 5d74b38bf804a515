//! Topology feasibility engine for small wireless sensor deployments.
//!
//! A fixed sink, relocatable sensors and fixed targets. A network is
//! *feasible* when every sensor can reach the sink over the communication
//! graph (edges within the communication radius) and every target lies within
//! the capture radius of some node. On top of that verdict the planner decides
//! whether a sensor can be moved or dropped without breaking feasibility, and
//! runs a deterministic greedy reduction.
//!
//! ```
//! use sensor_topology::{NetworkConfig, NetworkModel, NodeId, Position, evaluate, plan_reduction};
//!
//! let mut model = NetworkModel::new("P", Position::new(0.0, 0.0), NetworkConfig::new(1.2, 2.0)?)?;
//! model.add_sensor("S1", Position::new(1.0, 0.0))?;
//! model.add_sensor("S2", Position::new(2.0, 0.0))?;
//! model.add_sensor("S3", Position::new(3.0, 0.0))?;
//! for (x, y) in [(1.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 0.0)] {
//!     model.add_target(Position::new(x, y))?;
//! }
//!
//! let snapshot = model.snapshot();
//! assert!(evaluate(&snapshot).feasible);
//! let reduction = plan_reduction(&snapshot);
//! assert_eq!(reduction.removed, vec![NodeId::from("S2")]);
//! # Ok::<(), sensor_topology::TopologyError>(())
//! ```

pub mod analysis;
pub mod common;
pub mod error;
pub mod geometry;
pub mod model;

pub use analysis::{
    CancelToken, CommGraph, FeasibilityResult, Proposal, Reduction, RelocationCheck, RemovalCheck, RemovalReason, TopologyExport, can_relocate,
    can_remove, evaluate, plan_reduction, plan_reduction_with_cancel, propose,
};
pub use common::NetworkConfig;
pub use error::TopologyError;
pub use geometry::{Position, RadiusPolicy, distance, within_radius};
pub use model::{Mutation, NetworkModel, Node, NodeId, Role, SharedNetwork, Snapshot, Target};
