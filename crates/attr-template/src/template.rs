//! Message templates
//!
//! A template is literal text with embedded scoped attributes:
//! `"Shape @id is deprecated since @trait(deprecated).since"`. A literal `@`
//! is written `@@`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shape_model::{Model, ShapeId};

use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::path::{parse_scoped_attribute, Path};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    Literal(String),
    Computed(Path),
}

/// A compiled template. Compiled once, rendered any number of times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    fragments: Vec<Fragment>,
}

impl Template {
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let fragments = TemplateParser::new(text).parse()?;
        Ok(Self {
            source: text.to_string(),
            fragments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn render(&self, value: &Value<'_>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for fragment in &self.fragments {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Computed(path) => out.push_str(&path.evaluate(value).to_message_string()),
            }
        }
        out
    }

    /// Render against a single shape with no bound variables
    pub fn expand_shape(&self, model: &Model, id: &ShapeId) -> String {
        self.render(&Value::shape(model, id))
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Template {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl TryFrom<String> for Template {
    type Error = SyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let fragments = TemplateParser::new(&value).parse()?;
        Ok(Self {
            source: value,
            fragments,
        })
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.source
    }
}

/// Splits a template into literal runs and computed paths.
///
/// `mark` is the start of the pending literal run. `@@` flushes the run up to
/// and including the first `@` and restarts it after the second.
struct TemplateParser<'s> {
    cursor: Cursor<'s>,
    mark: usize,
    fragments: Vec<Fragment>,
}

impl<'s> TemplateParser<'s> {
    fn new(text: &'s str) -> Self {
        Self {
            cursor: Cursor::new(text),
            mark: 0,
            fragments: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<Fragment>, SyntaxError> {
        loop {
            self.cursor.advance_while(|c| c != '@');
            if self.cursor.eof() {
                break;
            }

            if self.cursor.peek_nth(1) == Some('@') {
                self.cursor.advance();
                self.flush_literal();
                self.cursor.advance();
                self.mark = self.cursor.position();
            } else {
                self.flush_literal();
                let path = parse_scoped_attribute(&mut self.cursor)?;
                self.fragments.push(Fragment::Computed(path));
                self.mark = self.cursor.position();
            }
        }

        self.flush_literal();
        Ok(self.fragments)
    }

    fn flush_literal(&mut self) {
        let text = self.cursor.slice_from(self.mark);
        if text.is_empty() {
            return;
        }
        // Adjacent runs (split by an escape) merge into one fragment
        if let Some(Fragment::Literal(last)) = self.fragments.last_mut() {
            last.push_str(text);
        } else {
            self.fragments.push(Fragment::Literal(text.to_string()));
        }
        self.mark = self.cursor.position();
    }
}
