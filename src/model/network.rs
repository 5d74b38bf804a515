//! The mutable network model: sink, sensors, targets and radii.
//!
//! Every operation is atomic: it validates first and only then touches state,
//! so an error always leaves the model exactly as it was. The model guards
//! structural invariants only (unique ids, sink protection, positive radii);
//! feasibility is the caller's business via the evaluator.

use std::collections::BTreeMap;

use super::snapshot::Snapshot;
use super::types::{Mutation, Node, NodeId, Target};
use crate::common::config::NetworkConfig;
use crate::error::TopologyError;
use crate::geometry::{Position, RadiusPolicy};

#[derive(Debug, Clone)]
pub struct NetworkModel {
    sink: Node,
    sensors: BTreeMap<NodeId, Node>,
    targets: Vec<Target>,
    config: NetworkConfig,
    /// Number of successful mutations since construction.
    revision: u64,
}

impl NetworkModel {
    /// Create a model holding only the sink.
    pub fn new(sink_id: impl Into<NodeId>, sink_position: Position, config: NetworkConfig) -> Result<Self, TopologyError> {
        config.validate()?;
        check_position(&sink_position)?;
        Ok(Self {
            sink: Node::sink(sink_id, sink_position),
            sensors: BTreeMap::new(),
            targets: Vec::new(),
            config,
            revision: 0,
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sink(&self) -> &Node {
        &self.sink
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn sensor(&self, id: &NodeId) -> Option<&Node> {
        self.sensors.get(id)
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Add a sensor. Fails with `DuplicateId` if the id is taken by a sensor or by the sink.
    pub fn add_sensor(&mut self, id: impl Into<NodeId>, position: Position) -> Result<(), TopologyError> {
        let id = id.into();
        if id == self.sink.id || self.sensors.contains_key(&id) {
            return Err(TopologyError::DuplicateId(id));
        }
        check_position(&position)?;

        log::debug!("Adding sensor {} at ({}, {})", id, position.x, position.y);
        self.sensors.insert(id.clone(), Node::sensor(id, position));
        self.bump();
        Ok(())
    }

    /// Remove a sensor and return it.
    pub fn remove_sensor(&mut self, id: &NodeId) -> Result<Node, TopologyError> {
        if *id == self.sink.id {
            return Err(TopologyError::CannotRemoveSink(id.clone()));
        }
        let node = self.sensors.remove(id).ok_or_else(|| TopologyError::NodeNotFound(id.clone()))?;

        log::debug!("Removed sensor {}", id);
        self.bump();
        Ok(node)
    }

    /// Move a sensor and return its previous position.
    pub fn relocate_sensor(&mut self, id: &NodeId, position: Position) -> Result<Position, TopologyError> {
        if *id == self.sink.id {
            return Err(TopologyError::CannotRelocateSink(id.clone()));
        }
        let Some(node) = self.sensors.get_mut(id) else {
            return Err(TopologyError::NodeNotFound(id.clone()));
        };
        check_position(&position)?;

        let previous = std::mem::replace(&mut node.position, position);
        log::debug!(
            "Relocated sensor {} from ({}, {}) to ({}, {})",
            id,
            previous.x,
            previous.y,
            position.x,
            position.y
        );
        self.bump();
        Ok(previous)
    }

    /// Append a target and return its index.
    pub fn add_target(&mut self, position: Position) -> Result<usize, TopologyError> {
        check_position(&position)?;
        let index = self.targets.len();
        self.targets.push(Target { index, position });
        self.bump();
        Ok(index)
    }

    /// Replace both radii. The boundary policy is kept.
    pub fn set_config(&mut self, capture_radius: f64, comm_radius: f64) -> Result<(), TopologyError> {
        let config = NetworkConfig {
            capture_radius,
            comm_radius,
            policy: self.config.policy,
        };
        config.validate()?;
        self.config = config;
        self.bump();
        Ok(())
    }

    pub fn set_policy(&mut self, policy: RadiusPolicy) {
        self.config.policy = policy;
        self.bump();
    }

    /// Apply a caller-validated mutation through the regular operations.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), TopologyError> {
        match mutation {
            Mutation::Remove { id } => self.remove_sensor(id).map(|_| ()),
            Mutation::Relocate { id, position } => self.relocate_sensor(id, *position).map(|_| ()),
        }
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.revision, self.sink.clone(), self.sensors.clone(), self.targets.clone(), self.config)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

fn check_position(position: &Position) -> Result<(), TopologyError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(TopologyError::InvalidPosition {
            x: position.x,
            y: position.y,
        })
    }
}
