//! Error types for validator loading and model checking

use attr_template::SyntaxError;
use shape_model::{ModelError, ShapeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LintError {
    #[error(
        "Unknown validator '{0}', expected one of: {}",
        crate::validation::VALIDATOR_NAMES.join(", ")
    )]
    UnknownValidator(String),

    #[error("Invalid configuration for validator '{validator}': {source}")]
    InvalidConfig {
        validator: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate validator id '{0}'")]
    DuplicateValidatorId(String),

    #[error("Shape not found: {0}")]
    UnknownShape(ShapeId),

    #[error("Template error: {0}")]
    Template(#[from] SyntaxError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
