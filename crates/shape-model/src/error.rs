//! Error types for building and loading shape models

use thiserror::Error;

use crate::shape_id::ShapeId;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid shape id '{0}'")]
    InvalidShapeId(String),

    #[error("Unknown shape type '{0}'")]
    UnknownShapeType(String),

    #[error("Duplicate shape '{0}'")]
    DuplicateShape(ShapeId),

    #[error("Invalid selector '{0}': expected '*' or a shape type")]
    InvalidSelector(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
