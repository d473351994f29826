//! shape-model: the read-only shape graph consumed by shape-lint
//!
//! - `ShapeId`, `Shape`, `Trait`, `SourceLocation`: shapes and their metadata
//! - `Model`: ordered, id-indexed graph of shapes
//! - `Selector` / `ShapeMatch`: the contract selectors fulfil
//! - JSON loader for a small subset of the JSON model format

pub mod error;
mod loader;
pub mod model;
pub mod selector;
pub mod shape;
pub mod shape_id;

pub use error::ModelError;
pub use model::{Model, ModelBuilder};
pub use selector::{Selector, ShapeMatch, TypeSelector, Variables};
pub use shape::{Shape, ShapeBuilder, ShapeKind, SourceLocation, Trait};
pub use shape_id::{ShapeId, PRELUDE_NAMESPACE};
