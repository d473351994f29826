//! Validators and the events they emit

mod emit_each_selector;
mod event;

pub use emit_each_selector::{EmitEachSelectorValidator, EMIT_EACH_SELECTOR};
pub use event::{Severity, ValidationEvent};

use shape_model::Model;

use crate::config::{EmitEachSelectorConfig, ValidatorDefinition};
use crate::LintError;

/// A check run over a whole model
pub trait Validator: Send + Sync {
    /// Id stamped on every event this validator emits
    fn id(&self) -> &str;

    fn validate(&self, model: &Model) -> Vec<ValidationEvent>;
}

/// Names of the validators `create_validator` knows how to build
pub const VALIDATOR_NAMES: &[&str] = &[EMIT_EACH_SELECTOR];

/// Build a validator from its configuration entry
pub fn create_validator(definition: &ValidatorDefinition) -> Result<Box<dyn Validator>, LintError> {
    match definition.name.as_str() {
        EMIT_EACH_SELECTOR => {
            let config: EmitEachSelectorConfig =
                serde_json::from_value(definition.configuration.clone()).map_err(|source| {
                    LintError::InvalidConfig {
                        validator: definition.name.clone(),
                        source,
                    }
                })?;

            let mut validator =
                EmitEachSelectorValidator::from_config(config).with_id(definition.event_id());
            if let Some(severity) = definition.severity {
                validator = validator.with_severity(severity);
            }
            Ok(Box::new(validator))
        }
        other => Err(LintError::UnknownValidator(other.to_string())),
    }
}

/// Run every validator over the model, collecting events in validator order
pub fn validate_model(model: &Model, validators: &[Box<dyn Validator>]) -> Vec<ValidationEvent> {
    validators
        .iter()
        .flat_map(|validator| {
            let events = validator.validate(model);
            tracing::debug!(validator = validator.id(), events = events.len(), "validator finished");
            events
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(name: &str, configuration: serde_json::Value) -> ValidatorDefinition {
        ValidatorDefinition {
            name: name.to_string(),
            id: None,
            severity: None,
            configuration,
        }
    }

    #[test]
    fn test_create_emit_each_selector() {
        let mut def = definition("EmitEachSelector", json!({"selector": "structure"}));
        def.id = Some("Custom".to_string());
        let validator = create_validator(&def).unwrap();
        assert_eq!(validator.id(), "Custom");
    }

    #[test]
    fn test_unknown_validator() {
        let err = create_validator(&definition("Nope", json!({}))).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Unknown validator 'Nope', expected one of: EmitEachSelector"
        );
        assert!(matches!(err, LintError::UnknownValidator(name) if name == "Nope"));
    }

    #[test]
    fn test_invalid_config() {
        let err = create_validator(&definition("EmitEachSelector", json!({"selector": "widget"})))
            .err()
            .unwrap();
        match err {
            LintError::InvalidConfig { validator, source } => {
                assert_eq!(validator, "EmitEachSelector");
                assert!(source.to_string().contains("widget"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
