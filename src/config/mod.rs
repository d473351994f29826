//! Validator configuration
//!
//! - `types`: serde types for the configuration file
//! - `loader`: reads the file and builds validators

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use types::{EmitEachSelectorConfig, ValidatorDefinition, ValidatorsConfig};
