//! Configuration and scenario loading shared by the library and the driver.

pub mod config;
pub mod scene;

pub use config::NetworkConfig;
pub use scene::{Scene, SceneLoadError, Step, load_scene};
