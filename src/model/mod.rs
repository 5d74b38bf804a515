//! Network model: the only mutable state in the crate.
//!
//! ## Module Organization
//!
//! - `types`: Node ids, nodes, targets and mutations
//! - `network`: The model itself and its guarded operations
//! - `snapshot`: Immutable copies consumed by the analysis passes
//! - `shared`: Thread-safe wrapper serialising mutations

pub mod network;
pub mod shared;
pub mod snapshot;
pub mod types;

pub use network::NetworkModel;
pub use shared::SharedNetwork;
pub use snapshot::Snapshot;
pub use types::{Mutation, Node, NodeId, Role, Target};
