//! Values a path is evaluated over
//!
//! Every variant borrows from the model; evaluating a path never copies a
//! shape or a trait node.

use std::borrow::Cow;
use std::fmt;

use shape_model::{Model, Shape, ShapeId, ShapeMatch, Trait, Variables};

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Shape(ShapeValue<'a>),
    Node(NodeValue<'a>),
    String(Cow<'a, str>),
    Bool(bool),
    /// Flattened results of projecting a segment; never nested, never holds `Absent`
    Projection(Vec<Value<'a>>),
    Absent,
}

/// A shape referenced by id, plus the variables bound when it is a match root
#[derive(Clone, Copy)]
pub struct ShapeValue<'a> {
    model: &'a Model,
    id: &'a ShapeId,
    variables: Option<&'a Variables>,
}

impl<'a> ShapeValue<'a> {
    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn id(&self) -> &'a ShapeId {
        self.id
    }

    pub fn variables(&self) -> Option<&'a Variables> {
        self.variables
    }

    /// The shape in the model; `None` for ids the model does not define
    /// (e.g. prelude targets)
    pub fn shape(&self) -> Option<&'a Shape> {
        self.model.get_shape(self.id)
    }
}

impl fmt::Debug for ShapeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeValue")
            .field("id", self.id)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

/// Shapes are compared by identity; the model borrow is not part of equality.
impl PartialEq for ShapeValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.variables == other.variables
    }
}

/// A trait node or a node nested inside one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeValue<'a> {
    node: &'a serde_json::Value,
    trait_id: Option<&'a ShapeId>,
}

impl<'a> NodeValue<'a> {
    pub fn node(&self) -> &'a serde_json::Value {
        self.node
    }

    /// Id of the trait, set only when this node is the root of a trait
    pub fn trait_id(&self) -> Option<&'a ShapeId> {
        self.trait_id
    }
}

impl<'a> Value<'a> {
    pub fn shape(model: &'a Model, id: &'a ShapeId) -> Self {
        Value::Shape(ShapeValue {
            model,
            id,
            variables: None,
        })
    }

    /// Root value for a selector match: the matched shape and its bound variables
    pub fn shape_match(model: &'a Model, shape_match: &'a ShapeMatch) -> Self {
        Value::Shape(ShapeValue {
            model,
            id: shape_match.shape(),
            variables: Some(shape_match.variables()),
        })
    }

    pub fn node(node: &'a serde_json::Value) -> Self {
        Value::Node(NodeValue {
            node,
            trait_id: None,
        })
    }

    pub fn trait_node(applied: &'a Trait) -> Self {
        Value::Node(NodeValue {
            node: applied.node(),
            trait_id: Some(applied.id()),
        })
    }

    pub fn string(text: impl Into<Cow<'a, str>>) -> Self {
        Value::String(text.into())
    }

    /// Collect values into a projection, flattening nested projections and
    /// dropping `Absent`
    pub fn projection(values: impl IntoIterator<Item = Value<'a>>) -> Self {
        let mut out = Vec::new();
        for value in values {
            flatten_into(value, &mut out);
        }
        Value::Projection(out)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Text used when the value is interpolated into a message
    pub fn to_message_string(&self) -> String {
        match self {
            Value::Absent => String::new(),
            Value::String(text) => text.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Shape(shape) => shape.id.to_string(),
            Value::Node(node) => node_text(node.node),
            Value::Projection(values) => values
                .iter()
                .map(Value::to_message_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn flatten_into<'a>(value: Value<'a>, out: &mut Vec<Value<'a>>) {
    match value {
        Value::Absent => {}
        Value::Projection(values) => {
            for value in values {
                flatten_into(value, out);
            }
        }
        value => out.push(value),
    }
}

fn node_text(node: &serde_json::Value) -> String {
    match node {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => node.to_string(),
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_message_strings() {
        assert_eq!(Value::Absent.to_message_string(), "");
        assert_eq!(Value::string("hi").to_message_string(), "hi");
        assert_eq!(Value::Bool(false).to_message_string(), "false");

        let node = json!("text");
        assert_eq!(Value::node(&node).to_message_string(), "text");
        let node = json!(1.5);
        assert_eq!(Value::node(&node).to_message_string(), "1.5");
        let node = json!(null);
        assert_eq!(Value::node(&node).to_message_string(), "null");
        let node = json!({"b": 1, "a": [true]});
        assert_eq!(Value::node(&node).to_message_string(), r#"{"b":1,"a":[true]}"#);
    }

    #[test]
    fn test_projection_join() {
        let value = Value::projection(["a", "b", "c"].map(Value::string));
        assert_eq!(value.to_message_string(), "a, b, c");
        assert_eq!(value.to_string(), "a, b, c");
    }

    #[test]
    fn test_projection_flattens_and_drops_absent() {
        let inner = Value::projection([Value::string("b"), Value::Absent, Value::string("c")]);
        let value = Value::projection([Value::string("a"), Value::Absent, inner, Value::string("a")]);
        assert_eq!(
            value,
            Value::Projection(vec![
                Value::string("a"),
                Value::string("b"),
                Value::string("c"),
                Value::string("a"),
            ])
        );
    }

    #[test]
    fn test_empty_projection_renders_empty() {
        assert_eq!(Value::projection(Vec::new()).to_message_string(), "");
    }

    #[test]
    fn test_shape_renders_id() {
        let model = Model::builder().build().unwrap();
        let id = ShapeId::parse("com.example#Missing").unwrap();
        let value = Value::shape(&model, &id);
        assert_eq!(value.to_message_string(), "com.example#Missing");
        if let Value::Shape(shape) = value {
            assert!(shape.shape().is_none());
            assert!(shape.variables().is_none());
        }
    }
}
