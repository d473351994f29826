//! Shapes, traits, and source locations
//!
//! A `Shape` owns its member shapes (in declaration order) and its applied
//! traits. Members refer to their targets by id only; targets are resolved
//! through the `Model`.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::shape_id::ShapeId;

/// The type of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Blob,
    Boolean,
    String,
    Byte,
    Short,
    Integer,
    IntEnum,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Timestamp,
    Document,
    Enum,
    List,
    Set,
    Map,
    Structure,
    Union,
    Member,
    Service,
    Operation,
    Resource,
}

impl ShapeKind {
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Blob,
            ShapeKind::Boolean,
            ShapeKind::String,
            ShapeKind::Byte,
            ShapeKind::Short,
            ShapeKind::Integer,
            ShapeKind::IntEnum,
            ShapeKind::Long,
            ShapeKind::Float,
            ShapeKind::Double,
            ShapeKind::BigInteger,
            ShapeKind::BigDecimal,
            ShapeKind::Timestamp,
            ShapeKind::Document,
            ShapeKind::Enum,
            ShapeKind::List,
            ShapeKind::Set,
            ShapeKind::Map,
            ShapeKind::Structure,
            ShapeKind::Union,
            ShapeKind::Member,
            ShapeKind::Service,
            ShapeKind::Operation,
            ShapeKind::Resource,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Blob => "blob",
            ShapeKind::Boolean => "boolean",
            ShapeKind::String => "string",
            ShapeKind::Byte => "byte",
            ShapeKind::Short => "short",
            ShapeKind::Integer => "integer",
            ShapeKind::IntEnum => "intEnum",
            ShapeKind::Long => "long",
            ShapeKind::Float => "float",
            ShapeKind::Double => "double",
            ShapeKind::BigInteger => "bigInteger",
            ShapeKind::BigDecimal => "bigDecimal",
            ShapeKind::Timestamp => "timestamp",
            ShapeKind::Document => "document",
            ShapeKind::Enum => "enum",
            ShapeKind::List => "list",
            ShapeKind::Set => "set",
            ShapeKind::Map => "map",
            ShapeKind::Structure => "structure",
            ShapeKind::Union => "union",
            ShapeKind::Member => "member",
            ShapeKind::Service => "service",
            ShapeKind::Operation => "operation",
            ShapeKind::Resource => "resource",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownShapeType(s.to_string()))
    }
}

/// Where a shape or trait was declared
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(filename: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }

    /// Location of things that were not read from a file
    pub fn none() -> Self {
        Self::new("N/A", 0, 0)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.filename, self.line, self.column)
    }
}

/// A trait applied to a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Trait {
    id: ShapeId,
    node: serde_json::Value,
    source_location: SourceLocation,
}

impl Trait {
    pub fn new(id: ShapeId, node: serde_json::Value, source_location: SourceLocation) -> Self {
        Self {
            id,
            node,
            source_location,
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The trait value in its serialized (JSON-like) form
    pub fn node(&self) -> &serde_json::Value {
        &self.node
    }

    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    traits: IndexMap<ShapeId, Trait>,
    members: IndexMap<String, Shape>,
    target: Option<ShapeId>,
    source_location: SourceLocation,
}

impl Shape {
    pub fn builder(id: ShapeId, kind: ShapeKind) -> ShapeBuilder {
        ShapeBuilder::new(id, kind)
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn traits(&self) -> &IndexMap<ShapeId, Trait> {
        &self.traits
    }

    pub fn find_trait(&self, id: &ShapeId) -> Option<&Trait> {
        self.traits.get(id)
    }

    pub fn has_trait(&self, id: &ShapeId) -> bool {
        self.traits.contains_key(id)
    }

    /// Members in the order they were declared
    pub fn members(&self) -> &IndexMap<String, Shape> {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Shape> {
        self.members.get(name)
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Target of a member shape
    pub fn target(&self) -> Option<&ShapeId> {
        self.target.as_ref()
    }

    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }
}

pub struct ShapeBuilder {
    id: ShapeId,
    kind: ShapeKind,
    traits: IndexMap<ShapeId, Trait>,
    members: IndexMap<String, Shape>,
    target: Option<ShapeId>,
    source_location: SourceLocation,
}

impl ShapeBuilder {
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            traits: IndexMap::new(),
            members: IndexMap::new(),
            target: None,
            source_location: SourceLocation::none(),
        }
    }

    pub fn source_location(mut self, location: SourceLocation) -> Self {
        self.source_location = location;
        self
    }

    /// Apply a trait declared at the shape's own location
    pub fn add_trait(self, id: ShapeId, node: serde_json::Value) -> Self {
        let location = self.source_location.clone();
        self.add_trait_at(id, node, location)
    }

    pub fn add_trait_at(
        mut self,
        id: ShapeId,
        node: serde_json::Value,
        location: SourceLocation,
    ) -> Self {
        self.traits
            .insert(id.clone(), Trait::new(id, node, location));
        self
    }

    /// Add a member that targets `target`, declared at the shape's location
    pub fn add_member(self, name: &str, target: ShapeId) -> Result<Self, ModelError> {
        let member = Shape::builder(self.id.with_member(name)?, ShapeKind::Member)
            .target(target)
            .source_location(self.source_location.clone())
            .build();
        Ok(self.add_member_shape(member))
    }

    /// Add a fully built member shape (its id must carry the member name)
    pub fn add_member_shape(mut self, member: Shape) -> Self {
        let name = member
            .id
            .member()
            .unwrap_or_else(|| member.id.name())
            .to_string();
        self.members.insert(name, member);
        self
    }

    pub fn target(mut self, target: ShapeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn build(self) -> Shape {
        Shape {
            id: self.id,
            kind: self.kind,
            traits: self.traits,
            members: self.members,
            target: self.target,
            source_location: self.source_location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(text: &str) -> ShapeId {
        ShapeId::parse(text).unwrap()
    }

    #[test]
    fn test_shape_kind_round_trips_through_str() {
        for kind in ShapeKind::all() {
            assert_eq!(kind.as_str().parse::<ShapeKind>().unwrap(), *kind);
        }
        assert!("widget".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_builder_keeps_member_order() {
        let shape = Shape::builder(id("com.example#Widget"), ShapeKind::Structure)
            .add_member("zeta", id("smithy.api#String"))
            .unwrap()
            .add_member("alpha", id("smithy.api#Integer"))
            .unwrap()
            .build();

        assert_eq!(shape.member_names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        let alpha = shape.member("alpha").unwrap();
        assert_eq!(alpha.kind(), ShapeKind::Member);
        assert_eq!(alpha.id().to_string(), "com.example#Widget$alpha");
        assert_eq!(alpha.target(), Some(&id("smithy.api#Integer")));
    }

    #[test]
    fn test_traits_default_to_shape_location() {
        let location = SourceLocation::new("main.smithy", 4, 1);
        let shape = Shape::builder(id("com.example#Widget"), ShapeKind::Structure)
            .source_location(location.clone())
            .add_trait(id("smithy.api#since"), json!("1.0"))
            .add_trait_at(
                id("smithy.api#deprecated"),
                json!({}),
                SourceLocation::new("main.smithy", 3, 1),
            )
            .build();

        let since = shape.find_trait(&id("smithy.api#since")).unwrap();
        assert_eq!(since.source_location(), &location);
        assert_eq!(since.node(), &json!("1.0"));
        assert_eq!(
            shape
                .find_trait(&id("smithy.api#deprecated"))
                .unwrap()
                .source_location()
                .line,
            3
        );
        assert!(!shape.has_trait(&id("smithy.api#required")));
    }

    #[test]
    fn test_source_location_display() {
        assert_eq!(
            SourceLocation::new("model.json", 2, 7).to_string(),
            "model.json [2, 7]"
        );
    }
}
