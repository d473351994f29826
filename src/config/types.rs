//! Configuration types for validator files
//!
//! These types mirror the structure of `shape-lint.yaml`:
//!
//! ```yaml
//! version: "1.0"
//! validators:
//!   - name: EmitEachSelector
//!     id: DeprecatedWidget
//!     severity: WARNING
//!     configuration:
//!       selector: structure
//!       bindToTrait: smithy.api#deprecated
//!       messageTemplate: "Shape @id is deprecated"
//! ```

use attr_template::Template;
use serde::{Deserialize, Serialize};
use shape_model::{ShapeId, TypeSelector};

use crate::validation::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorsConfig {
    pub version: String,
    #[serde(default)]
    pub validators: Vec<ValidatorDefinition>,
}

/// One configured validator: which implementation to run and its settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorDefinition {
    /// Validator implementation name, e.g. "EmitEachSelector"
    pub name: String,
    /// Event id; defaults to `name`
    #[serde(default)]
    pub id: Option<String>,
    /// Event severity; defaults to the validator's own
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Implementation-specific settings, decoded by the validator
    #[serde(default)]
    pub configuration: serde_json::Value,
}

impl ValidatorDefinition {
    pub fn event_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// Settings for the `EmitEachSelector` validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmitEachSelectorConfig {
    pub selector: TypeSelector,
    #[serde(default)]
    pub bind_to_trait: Option<ShapeId>,
    #[serde(default)]
    pub message_template: Option<Template>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validators_yaml() {
        let yaml = r#"
version: "1.0"
validators:
  - name: EmitEachSelector
    id: DeprecatedWidget
    severity: WARNING
    configuration:
      selector: structure
      bindToTrait: smithy.api#deprecated
      messageTemplate: "Shape @id is deprecated"
  - name: EmitEachSelector
    configuration:
      selector: "*"
"#;
        let config: ValidatorsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.validators.len(), 2);

        let first = &config.validators[0];
        assert_eq!(first.event_id(), "DeprecatedWidget");
        assert_eq!(first.severity, Some(Severity::Warning));
        assert_eq!(first.configuration["bindToTrait"], "smithy.api#deprecated");

        let second = &config.validators[1];
        assert_eq!(second.event_id(), "EmitEachSelector");
        assert_eq!(second.severity, None);
    }

    #[test]
    fn test_emit_each_selector_config() {
        let config: EmitEachSelectorConfig = serde_json::from_value(serde_json::json!({
            "selector": "structure",
            "bindToTrait": "smithy.api#deprecated",
            "messageTemplate": "Shape @id"
        }))
        .unwrap();
        assert_eq!(config.selector.to_string(), "structure");
        assert_eq!(
            config.bind_to_trait.map(|id| id.to_string()).as_deref(),
            Some("smithy.api#deprecated")
        );
        assert_eq!(
            config.message_template.map(|t| t.to_string()).as_deref(),
            Some("Shape @id")
        );
    }

    #[test]
    fn test_emit_each_selector_config_errors() {
        let missing = serde_json::from_value::<EmitEachSelectorConfig>(serde_json::json!({}));
        assert!(missing.unwrap_err().to_string().contains("selector"));

        let unknown = serde_json::from_value::<EmitEachSelectorConfig>(serde_json::json!({
            "selector": "*",
            "messageTemplates": "typo"
        }));
        assert!(unknown.is_err());

        let bad_template = serde_json::from_value::<EmitEachSelectorConfig>(serde_json::json!({
            "selector": "*",
            "messageTemplate": "oops @{id"
        }));
        let message = bad_template.unwrap_err().to_string();
        assert!(message.contains("line 1 column 7"), "{}", message);
    }
}
