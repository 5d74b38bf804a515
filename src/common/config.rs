//! Radius configuration and its TOML loader.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::TopologyError;
use crate::geometry::RadiusPolicy;

/// The two radii governing feasibility, plus the boundary policy applied to both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// A node covers a target within this distance.
    pub capture_radius: f64,
    /// Two nodes share a communication edge within this distance.
    pub comm_radius: f64,
    #[serde(default)]
    pub policy: RadiusPolicy,
}

impl NetworkConfig {
    /// Build a validated, boundary-inclusive configuration.
    pub fn new(capture_radius: f64, comm_radius: f64) -> Result<Self, TopologyError> {
        let config = Self {
            capture_radius,
            comm_radius,
            policy: RadiusPolicy::Inclusive,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_policy(mut self, policy: RadiusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Both radii must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if radius_is_valid(self.capture_radius) && radius_is_valid(self.comm_radius) {
            Ok(())
        } else {
            Err(TopologyError::InvalidRadius {
                capture: self.capture_radius,
                comm: self.comm_radius,
            })
        }
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config.toml file
    ///
    /// # Returns
    /// * `Ok(NetworkConfig)` if the file was read, parsed and validated
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Self = toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate().map_err(|e| format!("Invalid config file: {}", e))?;
        Ok(config)
    }

    /// Derive the config path from a scene file path.
    ///
    /// Replaces the scene filename with "config.toml" in the same directory.
    pub fn config_path_from_scene(scene_path: &str) -> PathBuf {
        let scene = Path::new(scene_path);
        scene.parent().unwrap_or(Path::new(".")).join("config.toml")
    }
}

fn radius_is_valid(r: f64) -> bool {
    r.is_finite() && r > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_non_positive_radii() {
        assert!(NetworkConfig::new(1.2, 2.0).is_ok());
        assert_eq!(
            NetworkConfig::new(0.0, 2.0),
            Err(TopologyError::InvalidRadius { capture: 0.0, comm: 2.0 })
        );
        assert!(NetworkConfig::new(1.2, -1.0).is_err());
        assert!(NetworkConfig::new(f64::NAN, 2.0).is_err());
        assert!(NetworkConfig::new(1.2, f64::INFINITY).is_err());
    }

    #[test]
    fn loads_toml_with_default_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capture-radius = 1.2\ncomm-radius = 2.0").unwrap();

        let config = NetworkConfig::load(file.path()).unwrap();
        assert_eq!(config.capture_radius, 1.2);
        assert_eq!(config.comm_radius, 2.0);
        assert_eq!(config.policy, RadiusPolicy::Inclusive);
    }

    #[test]
    fn loads_strict_policy_and_rejects_bad_radius() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "capture-radius = 1.0\ncomm-radius = 2.0\npolicy = \"strict\"").unwrap();
        assert_eq!(NetworkConfig::load(file.path()).unwrap().policy, RadiusPolicy::Strict);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "capture-radius = 0.0\ncomm-radius = 2.0").unwrap();
        let err = NetworkConfig::load(bad.path()).unwrap_err();
        assert!(err.starts_with("Invalid config file"), "{err}");
    }

    #[test]
    fn config_path_sits_next_to_scene() {
        let path = NetworkConfig::config_path_from_scene("scenes/three_step.json");
        assert_eq!(path, Path::new("scenes").join("config.toml"));
    }
}
