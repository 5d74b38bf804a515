//! Type definitions for the network model.
//!
//! Contains the value types shared by the model, its snapshots and the
//! analysis passes:
//! - Node identifiers and roles
//! - Nodes and targets
//! - Mutations that a caller may apply to the model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Position;

/// Stable, unique node identifier (e.g. `"S1"`).
///
/// Ordering is byte-wise string order; the reduction planner walks sensors in
/// this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// The fixed root every sensor must stay connected to.
    Sink,
    /// Relocatable, removable node.
    Sensor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub role: Role,
}

impl Node {
    pub fn sink(id: impl Into<NodeId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            role: Role::Sink,
        }
    }

    pub fn sensor(id: impl Into<NodeId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            role: Role::Sensor,
        }
    }

    pub fn is_sink(&self) -> bool {
        self.role == Role::Sink
    }
}

/// A point that must stay within capture radius of at least one node.
///
/// `index` is the target's position in the model's target sequence and is
/// stable for the lifetime of the model, since targets are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub index: usize,
    pub position: Position,
}

/// A structural change a caller may validate and then commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Mutation {
    Remove { id: NodeId },
    Relocate { id: NodeId, position: Position },
}

impl Mutation {
    pub fn id(&self) -> &NodeId {
        match self {
            Mutation::Remove { id } | Mutation::Relocate { id, .. } => id,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Remove { id } => write!(f, "remove {}", id),
            Mutation::Relocate { id, position } => write!(f, "relocate {} to ({}, {})", id, position.x, position.y),
        }
    }
}
