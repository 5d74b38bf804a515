//! Single-writer, many-reader wrapper around [`NetworkModel`].
//!
//! Mutations are serialised by a mutex and run against a scratch copy of
//! the model that replaces the live one only when the whole closure
//! succeeds. After each successful mutation a fresh [`Snapshot`] is
//! published behind an `Arc`; readers only ever clone that `Arc`, so they
//! never wait for a mutation in progress.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use super::network::NetworkModel;
use super::snapshot::Snapshot;
use super::types::NodeId;
use crate::error::TopologyError;
use crate::geometry::Position;

pub struct SharedNetwork {
    model: Mutex<NetworkModel>,
    published: RwLock<Arc<Snapshot>>,
}

impl SharedNetwork {
    pub fn new(model: NetworkModel) -> Self {
        let published = RwLock::new(Arc::new(model.snapshot()));
        Self {
            model: Mutex::new(model),
            published,
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.published.read().clone()
    }

    /// Run `f` with exclusive access to the model.
    ///
    /// Either every change `f` makes is kept, or (if it returns an error)
    /// none is.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut NetworkModel) -> Result<T, TopologyError>) -> Result<T, TopologyError> {
        let mut model = self.model.lock();
        let mut working = model.clone();
        let out = f(&mut working)?;

        if working.revision() != model.revision() {
            *self.published.write() = Arc::new(working.snapshot());
        }
        *model = working;
        Ok(out)
    }

    pub fn add_sensor(&self, id: impl Into<NodeId>, position: Position) -> Result<(), TopologyError> {
        let id = id.into();
        self.mutate(|model| model.add_sensor(id, position))
    }

    pub fn remove_sensor(&self, id: &NodeId) -> Result<(), TopologyError> {
        self.mutate(|model| model.remove_sensor(id).map(|_| ()))
    }

    pub fn relocate_sensor(&self, id: &NodeId, position: Position) -> Result<Position, TopologyError> {
        self.mutate(|model| model.relocate_sensor(id, position))
    }

    pub fn add_target(&self, position: Position) -> Result<usize, TopologyError> {
        self.mutate(|model| model.add_target(position))
    }

    pub fn set_config(&self, capture_radius: f64, comm_radius: f64) -> Result<(), TopologyError> {
        self.mutate(|model| model.set_config(capture_radius, comm_radius))
    }

    pub fn into_inner(self) -> NetworkModel {
        self.model.into_inner()
    }
}
