//! Scenario loading, parsing, and validation logic.
//!
//! A scene file is JSON: the sink, the initial sensors and targets, an
//! optional radius configuration and a list of steps for the driver to
//! replay. When the scene carries no configuration, `config.toml` next to the
//! scene file is used instead.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

use super::config::NetworkConfig;
use crate::error::TopologyError;
use crate::geometry::Position;
use crate::model::{NetworkModel, NodeId};

/// Error type for scene loading failures.
#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("Failed to read file: {0}")]
    FileReadError(String),
    #[error("Failed to parse JSON: {0}")]
    ParseError(String),
    #[error("Missing configuration: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// A node as written in the scene file.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub position: Position,
}

/// One driver step. Steps are replayed in file order.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Move a sensor, committed only if the result stays feasible.
    Relocate { id: NodeId, position: Position },
    /// Drop a sensor, committed only if the result stays feasible.
    Remove { id: NodeId },
    /// Run the greedy reduction pass and commit it.
    Reduce,
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default)]
    config: Option<NetworkConfig>,
    sink: SceneNode,
    #[serde(default)]
    sensors: Vec<SceneNode>,
    #[serde(default)]
    targets: Vec<Position>,
    #[serde(default)]
    steps: Vec<Step>,
}

/// Root structure representing a loaded scenario.
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: NetworkConfig,
    pub sink: SceneNode,
    pub sensors: Vec<SceneNode>,
    pub targets: Vec<Position>,
    pub steps: Vec<Step>,
}

impl Scene {
    /// Build the initial network model described by the scene.
    pub fn build_model(&self) -> Result<NetworkModel, TopologyError> {
        let mut model = NetworkModel::new(self.sink.id.clone(), self.sink.position, self.config)?;
        for sensor in &self.sensors {
            model.add_sensor(sensor.id.clone(), sensor.position)?;
        }
        for target in &self.targets {
            model.add_target(*target)?;
        }
        Ok(model)
    }
}

/// Load and parse a scene from a file.
///
/// # Parameters
///
/// * `path` - Path to the scene JSON file
///
/// # Returns
///
/// Parsed and validated Scene or an error.
pub fn load_scene(path: &str) -> Result<Scene, SceneLoadError> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))
        .map_err(|e| SceneLoadError::FileReadError(e.to_string()))?;

    let file: SceneFile = serde_json::from_str(&data)
        .context("Invalid JSON format")
        .map_err(|e| SceneLoadError::ParseError(format!("{:#}", e)))?;

    let config = match file.config {
        Some(config) => config,
        None => {
            let config_path = NetworkConfig::config_path_from_scene(path);
            log::debug!("Scene has no config, loading {}", config_path.display());
            NetworkConfig::load(&config_path).map_err(SceneLoadError::ConfigError)?
        }
    };

    let scene = Scene {
        config,
        sink: file.sink,
        sensors: file.sensors,
        targets: file.targets,
        steps: file.steps,
    };
    validate_scene(&scene).map_err(SceneLoadError::ValidationError)?;

    Ok(scene)
}

/// Validate scene contents before any model is built.
///
/// # Returns
///
/// `Ok(())` if validation passes, `Err(String)` with error description otherwise.
pub fn validate_scene(scene: &Scene) -> Result<(), String> {
    const MAX_NODES: usize = 10000;
    const MAX_TARGETS: usize = 10000;

    scene.config.validate().map_err(|e| e.to_string())?;

    if scene.sensors.len() + 1 > MAX_NODES {
        return Err(format!("Node count {} exceeds maximum of {}", scene.sensors.len() + 1, MAX_NODES));
    }
    if scene.targets.len() > MAX_TARGETS {
        return Err(format!("Target count {} exceeds maximum of {}", scene.targets.len(), MAX_TARGETS));
    }

    // Check for duplicate node IDs, the sink included
    let mut node_ids = HashSet::new();
    for node in std::iter::once(&scene.sink).chain(&scene.sensors) {
        if !node_ids.insert(&node.id) {
            return Err(format!("Duplicate node id found: {}", node.id));
        }
        if !node.position.is_finite() {
            return Err(format!(
                "Node {} position ({}, {}) is not finite",
                node.id, node.position.x, node.position.y
            ));
        }
    }

    for (idx, target) in scene.targets.iter().enumerate() {
        if !target.is_finite() {
            return Err(format!("Target {} position ({}, {}) is not finite", idx, target.x, target.y));
        }
    }

    Ok(())
}
