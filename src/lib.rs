//! shape-lint: selector-driven validation of shape models
//!
//! Validators are configured from a YAML/JSON file and run over a model
//! loaded with `shape_model`. The `EmitEachSelector` validator emits one event
//! per selector match, with messages rendered from `attr_template` templates.
//!
//! - `config`: validator configuration types and loader
//! - `validation`: the `Validator` trait, events, and built-in validators
//! - `error`: `LintError`

pub mod config;
pub mod error;
pub mod validation;

pub use config::{ConfigLoader, EmitEachSelectorConfig, ValidatorDefinition, ValidatorsConfig};
pub use error::LintError;
pub use validation::{
    create_validator, validate_model, EmitEachSelectorValidator, Severity, ValidationEvent,
    Validator,
};

pub use attr_template::{parse_path, SyntaxError, Template, Value};
pub use shape_model::{Model, ShapeId};

/// Render `template` against a single shape of `model`
pub fn render_for_shape(model: &Model, shape_id: &ShapeId, template: &str) -> Result<String, LintError> {
    let template = Template::parse(template)?;
    if !model.contains(shape_id) {
        return Err(LintError::UnknownShape(shape_id.clone()));
    }
    Ok(template.expand_shape(model, shape_id))
}

/// Evaluate a standalone path against a single shape of `model` and return
/// its message string
pub fn evaluate_for_shape(model: &Model, shape_id: &ShapeId, path: &str) -> Result<String, LintError> {
    let path = parse_path(path)?;
    if !model.contains(shape_id) {
        return Err(LintError::UnknownShape(shape_id.clone()));
    }
    Ok(path
        .evaluate(&Value::shape(model, shape_id))
        .to_message_string())
}
