//! Selector contract
//!
//! A selector walks a model and produces `ShapeMatch`es: a matched shape plus
//! any variables the selector bound along the way. Callers either collect
//! every match up front (`select`) or consume them one at a time as they are
//! found (`consume_matches`).
//!
//! `TypeSelector` is the only selector provided here: `*` or a single shape
//! type name. It never binds variables.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::Model;
use crate::shape::ShapeKind;
use crate::shape_id::ShapeId;

/// Variables bound by a selector: name -> matched shapes, in match order
pub type Variables = IndexMap<String, Vec<ShapeId>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatch {
    shape: ShapeId,
    variables: Variables,
}

impl ShapeMatch {
    pub fn new(shape: ShapeId) -> Self {
        Self {
            shape,
            variables: Variables::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, shapes: Vec<ShapeId>) -> Self {
        self.variables.insert(name.into(), shapes);
        self
    }

    pub fn shape(&self) -> &ShapeId {
        &self.shape
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&[ShapeId]> {
        self.variables.get(name).map(Vec::as_slice)
    }
}

pub trait Selector: fmt::Display + Send + Sync {
    /// Stream each match to `consumer` as it is found
    fn consume_matches(&self, model: &Model, consumer: &mut dyn FnMut(ShapeMatch));

    /// Collect every match
    fn select(&self, model: &Model) -> Vec<ShapeMatch> {
        let mut matches = Vec::new();
        self.consume_matches(model, &mut |m| matches.push(m));
        matches
    }
}

/// Matches every shape (`*`) or every shape of one type (`structure`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeSelector {
    kind: Option<ShapeKind>,
}

impl TypeSelector {
    pub fn any() -> Self {
        Self { kind: None }
    }

    pub fn of_kind(kind: ShapeKind) -> Self {
        Self { kind: Some(kind) }
    }

    pub fn kind(&self) -> Option<ShapeKind> {
        self.kind
    }
}

impl Selector for TypeSelector {
    fn consume_matches(&self, model: &Model, consumer: &mut dyn FnMut(ShapeMatch)) {
        model
            .shapes()
            .filter(|shape| self.kind.map_or(true, |kind| shape.kind() == kind))
            .for_each(|shape| consumer(ShapeMatch::new(shape.id().clone())));
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            None => f.write_str("*"),
            Some(kind) => f.write_str(kind.as_str()),
        }
    }
}

impl FromStr for TypeSelector {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(Self::any()),
            text => text
                .parse::<ShapeKind>()
                .map(Self::of_kind)
                .map_err(|_| ModelError::InvalidSelector(s.to_string())),
        }
    }
}

impl TryFrom<String> for TypeSelector {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeSelector> for String {
    fn from(selector: TypeSelector) -> Self {
        selector.to_string()
    }
}
