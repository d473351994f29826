//! Validation events
//!
//! Events are what validators report about a model: an id naming the
//! validator that produced them, a severity, the shape they concern, where the
//! problem was declared, and a rendered message.

use serde::{Deserialize, Serialize};
use shape_model::{ShapeId, SourceLocation};

/// Severity level for validation events, least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational, never fails a run
    Note,
    /// Should be looked at
    Warning,
    /// Likely a problem; fails a run unless suppressed
    Danger,
    /// Always fails a run
    Error,
}

impl Severity {
    /// Whether an event at this severity fails a validation run
    pub fn is_failure(&self) -> bool {
        *self >= Severity::Danger
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Note => write!(f, "NOTE"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Danger => write!(f, "DANGER"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationEvent {
    /// Validator id, e.g. "EmitEachSelector"
    pub id: String,
    pub severity: Severity,
    /// Shape the event is about, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_id: Option<ShapeId>,
    pub source_location: SourceLocation,
    pub message: String,
}

impl ValidationEvent {
    pub fn new(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity,
            shape_id: None,
            source_location: SourceLocation::none(),
            message: message.into(),
        }
    }

    pub fn danger(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Danger, message)
    }

    pub fn with_shape(mut self, shape_id: ShapeId) -> Self {
        self.shape_id = Some(shape_id);
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.source_location = location;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.severity.is_failure()
    }
}

impl std::fmt::Display for ValidationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.severity)?;
        match &self.shape_id {
            Some(shape_id) => write!(f, "{}: ", shape_id)?,
            None => write!(f, "-: ")?,
        }
        write!(
            f,
            "{} | {} {}",
            self.message, self.id, self.source_location
        )
    }
}
