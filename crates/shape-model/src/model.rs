//! The read-only shape graph
//!
//! Top-level shapes are stored by id in insertion order; member shapes live
//! inside their container and are reached through `get_shape` with a member id.

use indexmap::{IndexMap, IndexSet};

use crate::error::ModelError;
use crate::shape::Shape;
use crate::shape_id::ShapeId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    shapes: IndexMap<ShapeId, Shape>,
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    /// Look up a shape (or member shape) by id
    pub fn get_shape(&self, id: &ShapeId) -> Option<&Shape> {
        match id.member() {
            None => self.shapes.get(id),
            Some(member) => self.shapes.get(&id.without_member())?.member(member),
        }
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.get_shape(id).is_some()
    }

    /// Top-level shapes in declaration order
    pub fn top_level_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Every shape, each container followed by its members
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .values()
            .flat_map(|shape| std::iter::once(shape).chain(shape.members().values()))
    }

    /// Ids of every trait applied anywhere in the model
    pub fn applied_traits(&self) -> IndexSet<&ShapeId> {
        self.shapes()
            .flat_map(|shape| shape.traits().keys())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ModelBuilder {
    shapes: Vec<Shape>,
}

impl ModelBuilder {
    pub fn add_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn add_shapes(mut self, shapes: impl IntoIterator<Item = Shape>) -> Self {
        self.shapes.extend(shapes);
        self
    }

    pub fn build(self) -> Result<Model, ModelError> {
        let mut shapes = IndexMap::with_capacity(self.shapes.len());
        for shape in self.shapes {
            let id = shape.id().clone();
            if shapes.insert(id.clone(), shape).is_some() {
                return Err(ModelError::DuplicateShape(id));
            }
        }
        Ok(Model { shapes })
    }
}
