//! Configuration system for fbow.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod bootstrap_config;
pub mod evaluation_config;
pub mod fbow_config;
pub mod similarity_config;

pub use bootstrap_config::BootstrapConfig;
pub use evaluation_config::EvaluationConfig;
pub use fbow_config::{CliOverrides, FbowConfig};
pub use similarity_config::SimilarityConfig;
