//! Immutable point-in-time copies of the network model.
//!
//! Every analysis pass reads a [`Snapshot`], never the live model, so no
//! analysis can observe a half-applied mutation. The planner derives
//! hypothetical candidates from a snapshot with [`Snapshot::without_sensor`]
//! and [`Snapshot::with_sensor_at`]; those never touch the model either.

use std::collections::BTreeMap;

use super::types::{Node, NodeId, Target};
use crate::common::config::NetworkConfig;
use crate::error::TopologyError;
use crate::geometry::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    revision: u64,
    sink: Node,
    sensors: BTreeMap<NodeId, Node>,
    targets: Vec<Target>,
    config: NetworkConfig,
}

impl Snapshot {
    pub(crate) fn new(revision: u64, sink: Node, sensors: BTreeMap<NodeId, Node>, targets: Vec<Target>, config: NetworkConfig) -> Self {
        Self {
            revision,
            sink,
            sensors,
            targets,
            config,
        }
    }

    /// Model revision this snapshot (or the snapshot it was derived from) was taken at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sink(&self) -> &Node {
        &self.sink
    }

    /// Sensors in ascending id order.
    pub fn sensors(&self) -> impl Iterator<Item = &Node> {
        self.sensors.values()
    }

    pub fn sensor(&self, id: &NodeId) -> Option<&Node> {
        self.sensors.get(id)
    }

    pub fn sensor_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.sensors.keys()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Sink first, then sensors in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.sink).chain(self.sensors.values())
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Candidate snapshot with `id` excluded.
    pub fn without_sensor(&self, id: &NodeId) -> Result<Snapshot, TopologyError> {
        self.check_sensor(id, TopologyError::CannotRemoveSink)?;
        let mut candidate = self.clone();
        candidate.sensors.remove(id);
        Ok(candidate)
    }

    /// Candidate snapshot with the sensor `id` moved to `position`.
    pub fn with_sensor_at(&self, id: &NodeId, position: Position) -> Result<Snapshot, TopologyError> {
        self.check_sensor(id, TopologyError::CannotRelocateSink)?;
        if !position.is_finite() {
            return Err(TopologyError::InvalidPosition {
                x: position.x,
                y: position.y,
            });
        }
        let mut candidate = self.clone();
        if let Some(node) = candidate.sensors.get_mut(id) {
            node.position = position;
        }
        Ok(candidate)
    }

    fn check_sensor(&self, id: &NodeId, sink_error: fn(NodeId) -> TopologyError) -> Result<(), TopologyError> {
        if *id == self.sink.id {
            return Err(sink_error(id.clone()));
        }
        if !self.sensors.contains_key(id) {
            return Err(TopologyError::NodeNotFound(id.clone()));
        }
        Ok(())
    }
}
