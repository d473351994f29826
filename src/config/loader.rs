//! Configuration loader
//!
//! Loads validator definitions from a YAML or JSON file and builds the
//! validators they describe.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::ValidatorsConfig;
use crate::validation::{create_validator, Validator};
use crate::LintError;

/// Environment variable naming the validator configuration file
pub const CONFIG_ENV_VAR: &str = "SHAPE_LINT_CONFIG";

/// File used when nothing else is configured
pub const DEFAULT_CONFIG_FILE: &str = "shape-lint.yaml";

pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Create loader from SHAPE_LINT_CONFIG or default to "shape-lint.yaml"
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_CONFIG_FILE),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read and parse the configuration file. `.json` files are parsed as
    /// JSON, anything else as YAML.
    pub fn load_config(&self) -> Result<ValidatorsConfig> {
        let path = &self.config_path;
        info!("Loading validator configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: ValidatorsConfig = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        };

        if config.version.trim().is_empty() {
            bail!("{}: missing configuration version", path.display());
        }

        info!(
            "Loaded {} validator definition(s), version {}",
            config.validators.len(),
            config.version
        );

        Ok(config)
    }

    /// Load the configuration and build every validator it defines
    pub fn load_validators(&self) -> Result<Vec<Box<dyn Validator>>> {
        let config = self.load_config()?;
        let mut seen = HashSet::new();
        let mut validators = Vec::with_capacity(config.validators.len());

        for (index, definition) in config.validators.iter().enumerate() {
            let id = definition.event_id();
            if !seen.insert(id.to_string()) {
                return Err(LintError::DuplicateValidatorId(id.to_string())).with_context(|| {
                    format!("{}: validators[{}]", self.config_path.display(), index)
                });
            }

            let validator = create_validator(definition).with_context(|| {
                format!(
                    "{}: validators[{}] ({})",
                    self.config_path.display(),
                    index,
                    definition.name
                )
            })?;
            validators.push(validator);
        }

        Ok(validators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_config(
            ".yaml",
            r#"
version: "1.0"
validators:
  - name: EmitEachSelector
    configuration:
      selector: structure
"#,
        );
        let loader = ConfigLoader::new(file.path());
        let validators = loader.load_validators().unwrap();
        assert_eq!(validators.len(), 1);
        assert_eq!(validators[0].id(), "EmitEachSelector");
    }

    #[test]
    fn test_load_json() {
        let file = write_config(
            ".json",
            r#"{"version": "1.0", "validators": [
                {"name": "EmitEachSelector", "id": "A", "configuration": {"selector": "*"}},
                {"name": "EmitEachSelector", "id": "B", "configuration": {"selector": "string"}}
            ]}"#,
        );
        let validators = ConfigLoader::new(file.path()).load_validators().unwrap();
        let ids: Vec<&str> = validators.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new("/definitely/not/here.yaml")
            .load_config()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_unknown_validator() {
        let file = write_config(
            ".yaml",
            "version: \"1.0\"\nvalidators:\n  - name: Nope\n",
        );
        let err = ConfigLoader::new(file.path()).load_validators().err().unwrap();
        let chain = format!("{:#}", err);
        assert!(chain.contains("validators[0] (Nope)"), "{}", chain);
        assert!(chain.contains("Unknown validator 'Nope'"), "{}", chain);
    }

    #[test]
    fn test_duplicate_ids() {
        let file = write_config(
            ".yaml",
            r#"
version: "1.0"
validators:
  - name: EmitEachSelector
    configuration: { selector: "*" }
  - name: EmitEachSelector
    configuration: { selector: structure }
"#,
        );
        let err = ConfigLoader::new(file.path()).load_validators().err().unwrap();
        assert!(format!("{:#}", err).contains("Duplicate validator id 'EmitEachSelector'"));
    }

    #[test]
    fn test_bad_template_reports_location() {
        let file = write_config(
            ".yaml",
            r#"
version: "1.0"
validators:
  - name: EmitEachSelector
    configuration:
      selector: "*"
      messageTemplate: "@bad[unterminated"
"#,
        );
        let err = ConfigLoader::new(file.path()).load_validators().err().unwrap();
        let chain = format!("{:#}", err);
        assert!(chain.contains("line 1 column 5"), "{}", chain);
    }

    #[test]
    fn test_missing_version() {
        let file = write_config(".yaml", "version: \"\"\nvalidators: []\n");
        let err = ConfigLoader::new(file.path()).load_config().unwrap_err();
        assert!(err.to_string().contains("missing configuration version"));
    }
}
