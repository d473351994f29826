//! attr-template: scoped-attribute paths and message templates
//!
//! A scoped attribute is an `@`-prefixed path that reads a value reachable
//! from a shape: `@id`, `@trait(since)`, `@{members|target|name}`. Templates
//! embed scoped attributes in literal text and render them against a
//! [`Value`], usually a selector match:
//!
//! ```
//! use attr_template::{Template, Value};
//! use serde_json::json;
//! use shape_model::{Model, Shape, ShapeId, ShapeKind};
//!
//! let id = ShapeId::parse("com.example#Widget").unwrap();
//! let widget = Shape::builder(id.clone(), ShapeKind::Structure)
//!     .add_trait(ShapeId::parse("smithy.api#since").unwrap(), json!("1.0"))
//!     .build();
//! let model = Model::builder().add_shape(widget).build().unwrap();
//!
//! let template = Template::parse("Shape @id matched with value @trait(since)").unwrap();
//! assert_eq!(
//!     template.render(&Value::shape(&model, &id)),
//!     "Shape com.example#Widget matched with value 1.0"
//! );
//! ```

pub mod cursor;
pub mod error;
pub mod eval;
pub mod path;
pub mod template;
pub mod value;

pub use cursor::Cursor;
pub use error::SyntaxError;
pub use eval::evaluate;
pub use path::{parse_path, parse_scoped_attribute, Function, Path, PathSegment};
pub use template::{Fragment, Template};
pub use value::{NodeValue, ShapeValue, Value};
