//! Path evaluation
//!
//! Segments fold left to right over the current value. A projection applies
//! each following segment to every element and flattens the results, so a
//! value is never a projection of projections. Evaluation is total: anything
//! that does not resolve yields `Value::Absent`.

use shape_model::{Shape, ShapeId, Trait, PRELUDE_NAMESPACE};

use crate::path::{Function, Path, PathSegment};
use crate::value::{NodeValue, ShapeValue, Value};

impl Path {
    /// Evaluate the path starting at `start`
    pub fn evaluate<'a>(&self, start: &Value<'a>) -> Value<'a> {
        evaluate(self, start)
    }
}

pub fn evaluate<'a>(path: &Path, start: &Value<'a>) -> Value<'a> {
    path.segments()
        .iter()
        .fold(start.clone(), |current, segment| apply(segment, &current))
}

fn apply<'a>(segment: &PathSegment, value: &Value<'a>) -> Value<'a> {
    if let Value::Projection(values) = value {
        return Value::projection(values.iter().map(|element| apply(segment, element)));
    }

    match segment {
        PathSegment::Key(name) | PathSegment::Literal(name) => key(value, name),
        PathSegment::Wildcard => wildcard(value),
        PathSegment::FunctionCall { function, args } => call(*function, args, value),
    }
}

fn key<'a>(value: &Value<'a>, name: &str) -> Value<'a> {
    match value {
        Value::Shape(shape) => shape_key(shape, name),
        Value::Node(node) => node_key(node, name),
        _ => Value::Absent,
    }
}

fn shape_key<'a>(value: &ShapeValue<'a>, name: &str) -> Value<'a> {
    let id = value.id();
    match name {
        "id" => return Value::string(id.to_string()),
        "name" => return Value::string(id.name()),
        "namespace" => return Value::string(id.namespace()),
        "member" => return id.member().map_or(Value::Absent, Value::string),
        _ => {}
    }

    let Some(shape) = value.shape() else {
        return Value::Absent;
    };

    match name {
        "type" => Value::string(shape.kind().as_str()),
        "target" => shape
            .target()
            .map_or(Value::Absent, |target| Value::shape(value.model(), target)),
        "members" => member_shapes(value, shape),
        "traits" => Value::projection(shape.traits().values().map(Value::trait_node)),
        _ => match shape.member(name) {
            Some(member) => Value::shape(value.model(), member.id()),
            None => find_trait(shape, name).map_or(Value::Absent, Value::trait_node),
        },
    }
}

fn node_key<'a>(value: &NodeValue<'a>, name: &str) -> Value<'a> {
    match value.node() {
        serde_json::Value::Object(map) => map.get(name).map_or(Value::Absent, Value::node),
        serde_json::Value::Array(items) => array_index(name)
            .and_then(|index| items.get(index))
            .map_or(Value::Absent, Value::node),
        _ => Value::Absent,
    }
}

/// Plain decimal index; signs and leading zeros never select an element
fn array_index(name: &str) -> Option<usize> {
    let plain = !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_digit())
        && (name == "0" || !name.starts_with('0'));
    if plain {
        name.parse().ok()
    } else {
        None
    }
}

fn wildcard<'a>(value: &Value<'a>) -> Value<'a> {
    match value {
        Value::Shape(shape) => match shape.shape() {
            Some(resolved) => member_shapes(shape, resolved),
            None => Value::Absent,
        },
        Value::Node(node) => node_children(node),
        _ => Value::Absent,
    }
}

fn member_shapes<'a>(value: &ShapeValue<'a>, shape: &'a Shape) -> Value<'a> {
    let model = value.model();
    Value::projection(
        shape
            .members()
            .values()
            .map(|member| Value::shape(model, member.id())),
    )
}

fn node_children<'a>(value: &NodeValue<'a>) -> Value<'a> {
    match value.node() {
        serde_json::Value::Object(map) => Value::projection(map.values().map(Value::node)),
        serde_json::Value::Array(items) => Value::projection(items.iter().map(Value::node)),
        _ => Value::Absent,
    }
}

/// Resolve a trait reference: an absolute id is looked up exactly; a bare name
/// is tried in the prelude first, then against every applied trait's name.
fn find_trait<'a>(shape: &'a Shape, name: &str) -> Option<&'a Trait> {
    if name.contains('#') {
        let id = ShapeId::parse(name).ok()?;
        return shape.find_trait(&id);
    }

    ShapeId::parse_relative(name, PRELUDE_NAMESPACE)
        .ok()
        .and_then(|id| shape.find_trait(&id))
        .or_else(|| {
            shape
                .traits()
                .values()
                .find(|applied| applied.id().name() == name && !applied.id().is_member())
        })
}

fn call<'a>(function: Function, args: &[String], value: &Value<'a>) -> Value<'a> {
    let arg = args.first().map(String::as_str).unwrap_or_default();

    match (function, value) {
        (Function::Trait, Value::Shape(shape)) => shape
            .shape()
            .and_then(|resolved| find_trait(resolved, arg))
            .map_or(Value::Absent, Value::trait_node),

        (Function::Var, Value::Shape(shape)) => {
            let model = shape.model();
            match shape.variables().and_then(|vars| vars.get(arg)) {
                Some(ids) => Value::projection(ids.iter().map(|id| Value::shape(model, id))),
                None => Value::Absent,
            }
        }

        (Function::Member, Value::Shape(shape)) => shape
            .shape()
            .and_then(|resolved| resolved.member(arg))
            .map_or(Value::Absent, |member| Value::shape(shape.model(), member.id())),

        (Function::Keys, Value::Shape(shape)) => match shape.shape() {
            Some(resolved) => Value::projection(
                resolved
                    .traits()
                    .keys()
                    .map(|id| Value::string(id.to_string())),
            ),
            None => Value::Absent,
        },
        (Function::Keys, Value::Node(node)) => match node.node() {
            serde_json::Value::Object(map) => {
                Value::projection(map.keys().map(|k| Value::string(k.as_str())))
            }
            _ => Value::Absent,
        },

        (Function::Values, Value::Shape(shape)) => match shape.shape() {
            Some(resolved) => Value::projection(resolved.traits().values().map(Value::trait_node)),
            None => Value::Absent,
        },
        (Function::Values, Value::Node(node)) => node_children(node),

        (Function::Length, Value::Shape(shape)) => shape
            .shape()
            .map_or(Value::Absent, |resolved| count(resolved.members().len())),
        (Function::Length, Value::Node(node)) => match node.node() {
            serde_json::Value::String(s) => count(s.chars().count()),
            serde_json::Value::Array(items) => count(items.len()),
            serde_json::Value::Object(map) => count(map.len()),
            _ => Value::Absent,
        },
        (Function::Length, Value::String(s)) => count(s.chars().count()),

        (Function::Id, Value::Shape(shape)) => Value::string(shape.id().to_string()),
        (Function::Name, Value::Shape(shape)) => Value::string(shape.id().name()),
        (Function::Namespace, Value::Shape(shape)) => Value::string(shape.id().namespace()),
        (Function::Id | Function::Name | Function::Namespace, Value::Node(node)) => {
            match node.trait_id() {
                Some(id) => match function {
                    Function::Id => Value::string(id.to_string()),
                    Function::Name => Value::string(id.name()),
                    _ => Value::string(id.namespace()),
                },
                None => Value::Absent,
            }
        }

        (Function::Has, Value::Shape(shape)) => Value::Bool(
            shape
                .shape()
                .and_then(|resolved| find_trait(resolved, arg))
                .is_some(),
        ),
        (Function::Has, Value::Node(node)) => match node.node() {
            serde_json::Value::Object(map) => Value::Bool(map.contains_key(arg)),
            _ => Value::Absent,
        },

        _ => Value::Absent,
    }
}

fn count<'a>(n: usize) -> Value<'a> {
    Value::string(n.to_string())
}
