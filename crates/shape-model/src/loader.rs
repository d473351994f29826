//! JSON model loader
//!
//! Reads a small subset of the JSON model format:
//!
//! ```json
//! {
//!   "shapes": {
//!     "com.example#Widget": {
//!       "type": "structure",
//!       "members": { "name": { "target": "smithy.api#String" } },
//!       "traits": { "smithy.api#since": "1.0" }
//!     }
//!   }
//! }
//! ```
//!
//! Lists and sets may use `member`, maps `key` and `value`, in place of
//! `members`. Relative trait ids resolve against the prelude namespace.
//! The loader has no position data, so every shape and trait is located at
//! the file itself (line and column 0).

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::info;

use crate::error::ModelError;
use crate::model::Model;
use crate::shape::{Shape, ShapeBuilder, ShapeKind, SourceLocation};
use crate::shape_id::{ShapeId, PRELUDE_NAMESPACE};

#[derive(Debug, Deserialize)]
struct JsonModel {
    #[serde(default)]
    shapes: IndexMap<String, JsonShape>,
}

#[derive(Debug, Deserialize)]
struct JsonShape {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    members: IndexMap<String, JsonMember>,
    member: Option<JsonMember>,
    key: Option<JsonMember>,
    value: Option<JsonMember>,
    #[serde(default)]
    traits: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct JsonMember {
    target: String,
    #[serde(default)]
    traits: IndexMap<String, serde_json::Value>,
}

impl Model {
    /// Load a model from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Model, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json_str(&content, &path.display().to_string())?;
        info!("Loaded {} shapes from {}", model.len(), path.display());
        Ok(model)
    }

    /// Parse a model from JSON text; `filename` is used for source locations
    pub fn from_json_str(json: &str, filename: &str) -> Result<Model, ModelError> {
        let parsed: JsonModel = serde_json::from_str(json)?;
        let location = SourceLocation::new(filename, 0, 0);

        let mut builder = Model::builder();
        for (id, shape) in parsed.shapes {
            builder = builder.add_shape(build_shape(&ShapeId::parse(&id)?, shape, &location)?);
        }
        builder.build()
    }
}

fn build_shape(
    id: &ShapeId,
    shape: JsonShape,
    location: &SourceLocation,
) -> Result<Shape, ModelError> {
    let kind: ShapeKind = shape.kind.parse()?;
    let mut builder = apply_traits(
        Shape::builder(id.clone(), kind).source_location(location.clone()),
        shape.traits,
    )?;

    let named = [
        ("member", shape.member),
        ("key", shape.key),
        ("value", shape.value),
    ];
    let members = shape
        .members
        .into_iter()
        .chain(
            named
                .into_iter()
                .filter_map(|(name, member)| member.map(|m| (name.to_string(), m))),
        );

    for (name, member) in members {
        let member_shape = apply_traits(
            Shape::builder(id.with_member(&name)?, ShapeKind::Member)
                .target(ShapeId::parse(&member.target)?)
                .source_location(location.clone()),
            member.traits,
        )?
        .build();
        builder = builder.add_member_shape(member_shape);
    }

    Ok(builder.build())
}

fn apply_traits(
    mut builder: ShapeBuilder,
    traits: IndexMap<String, serde_json::Value>,
) -> Result<ShapeBuilder, ModelError> {
    for (trait_id, node) in traits {
        builder = builder.add_trait(ShapeId::parse_relative(&trait_id, PRELUDE_NAMESPACE)?, node);
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    const WIDGET_MODEL: &str = r#"{
        "shapes": {
            "com.example#Widget": {
                "type": "structure",
                "members": {
                    "zeta": { "target": "smithy.api#String", "traits": { "required": {} } },
                    "alpha": { "target": "smithy.api#Integer" }
                },
                "traits": {
                    "smithy.api#since": "1.0",
                    "smithy.api#documentation": "A widget"
                }
            },
            "com.example#Names": {
                "type": "list",
                "member": { "target": "smithy.api#String" }
            },
            "com.example#Lookup": {
                "type": "map",
                "key": { "target": "smithy.api#String" },
                "value": { "target": "com.example#Widget" }
            }
        }
    }"#;

    fn id(text: &str) -> ShapeId {
        ShapeId::parse(text).unwrap()
    }

    #[test]
    fn test_loads_shapes_in_file_order() {
        let model = Model::from_json_str(WIDGET_MODEL, "widget.json").unwrap();
        let ids: Vec<String> = model
            .top_level_shapes()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["com.example#Widget", "com.example#Names", "com.example#Lookup"]
        );
    }

    #[test]
    fn test_members_and_traits_keep_declaration_order() {
        let model = Model::from_json_str(WIDGET_MODEL, "widget.json").unwrap();
        let widget = model.get_shape(&id("com.example#Widget")).unwrap();

        assert_eq!(widget.member_names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        let trait_ids: Vec<String> = widget.traits().keys().map(ToString::to_string).collect();
        assert_eq!(
            trait_ids,
            vec!["smithy.api#since", "smithy.api#documentation"]
        );
        assert_eq!(
            widget.find_trait(&id("smithy.api#since")).unwrap().node(),
            &json!("1.0")
        );
    }

    #[test]
    fn test_relative_member_traits_use_prelude() {
        let model = Model::from_json_str(WIDGET_MODEL, "widget.json").unwrap();
        let zeta = model.get_shape(&id("com.example#Widget$zeta")).unwrap();
        assert!(zeta.has_trait(&id("smithy.api#required")));
        assert_eq!(zeta.source_location().filename, "widget.json");
    }

    #[test]
    fn test_collection_members() {
        let model = Model::from_json_str(WIDGET_MODEL, "widget.json").unwrap();
        let names = model.get_shape(&id("com.example#Names")).unwrap();
        assert_eq!(names.member_names().collect::<Vec<_>>(), vec!["member"]);

        let lookup = model.get_shape(&id("com.example#Lookup")).unwrap();
        assert_eq!(lookup.member_names().collect::<Vec<_>>(), vec!["key", "value"]);
        assert_eq!(
            lookup.member("value").unwrap().target(),
            Some(&id("com.example#Widget"))
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = Model::from_json_str(
            r#"{ "shapes": { "com.example#A": { "type": "gadget" } } }"#,
            "bad.json",
        );
        assert!(matches!(result, Err(ModelError::UnknownShapeType(t)) if t == "gadget"));
    }

    #[test]
    fn test_invalid_shape_id_is_rejected() {
        let result = Model::from_json_str(
            r#"{ "shapes": { "Widget": { "type": "structure" } } }"#,
            "bad.json",
        );
        assert!(matches!(result, Err(ModelError::InvalidShapeId(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WIDGET_MODEL.as_bytes()).unwrap();

        let model = Model::load(file.path()).unwrap();
        assert_eq!(model.len(), 3);
        let widget = model.get_shape(&id("com.example#Widget")).unwrap();
        assert_eq!(
            widget.source_location().filename,
            file.path().display().to_string()
        );
    }
}
