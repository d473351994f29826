//! Scoped-attribute paths
//!
//! A scoped attribute is `@` followed by a path, either bare or in braces:
//!
//! ```text
//! expression := '@' ( '{' path '}' | path )
//! path       := segment ( ( '.' | '|' ) segment | literal )*
//! segment    := '*' | ident [ '(' args ')' ] | literal
//! literal    := '[' text-without-']' ']'
//! ident      := [A-Za-z0-9_]+
//! args       := [ arg ( ',' arg )* ]          (whitespace allowed around args)
//! arg        := "double quoted" | 'single quoted' | raw
//! ```
//!
//! A bare path ends at the first character that cannot extend it, so
//! `"Shape @id."` ends the path before the period. Braced paths must be closed
//! and may abut literal text: `@{id}Suffix`.

use std::fmt;
use std::str::FromStr;

use crate::cursor::{Cursor, Location};
use crate::error::SyntaxError;

/// Named accessors callable from a path: `trait(since)`, `keys()`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// `trait(id)`: a trait applied to a shape
    Trait,
    /// `var(name)`: shapes bound to a selector variable
    Var,
    /// `member(name)`: a member shape
    Member,
    /// `keys()`: trait ids of a shape, or keys of an object node
    Keys,
    /// `values()`: trait nodes of a shape, or children of an object/array node
    Values,
    /// `length()`: member count, string length, or container size
    Length,
    /// `id()`: shape id, or the id of a trait
    Id,
    /// `name()`: shape name, or the name of a trait
    Name,
    /// `namespace()`: namespace of a shape or trait
    Namespace,
    /// `has(name)`: whether a shape has a trait, or an object has a key
    Has,
}

impl Function {
    pub fn all() -> &'static [Function] {
        &[
            Function::Trait,
            Function::Var,
            Function::Member,
            Function::Keys,
            Function::Values,
            Function::Length,
            Function::Id,
            Function::Name,
            Function::Namespace,
            Function::Has,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Trait => "trait",
            Function::Var => "var",
            Function::Member => "member",
            Function::Keys => "keys",
            Function::Values => "values",
            Function::Length => "length",
            Function::Id => "id",
            Function::Name => "name",
            Function::Namespace => "namespace",
            Function::Has => "has",
        }
    }

    pub fn from_name(name: &str) -> Option<Function> {
        Function::all().iter().copied().find(|f| f.name() == name)
    }

    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        match self {
            Function::Trait | Function::Var | Function::Member | Function::Has => 1,
            Function::Keys
            | Function::Values
            | Function::Length
            | Function::Id
            | Function::Name
            | Function::Namespace => 0,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// `name`: a shape facet, member, or trait; or an object key
    Key(String),
    /// `*`: every element of a container
    Wildcard,
    /// `name(args)`
    FunctionCall { function: Function, args: Vec<String> },
    /// `[text]`: a key that may contain any character but `]`
    Literal(String),
}

/// A parsed path; reusable across any number of evaluations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Canonical braced form, e.g. `@{trait(smithy.api#since)|name}`
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@{")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            match segment {
                PathSegment::Key(name) => f.write_str(name)?,
                PathSegment::Wildcard => f.write_str("*")?,
                PathSegment::Literal(text) => write!(f, "[{}]", text)?,
                PathSegment::FunctionCall { function, args } => {
                    write!(f, "{}(", function)?;
                    for (j, arg) in args.iter().enumerate() {
                        if j > 0 {
                            f.write_str(", ")?;
                        }
                        write_arg(f, arg)?;
                    }
                    f.write_str(")")?;
                }
            }
        }
        f.write_str("}")
    }
}

fn write_arg(f: &mut fmt::Formatter<'_>, arg: &str) -> fmt::Result {
    if !arg.is_empty() && arg.chars().all(is_raw_arg_char) {
        return f.write_str(arg);
    }
    f.write_str("\"")?;
    for c in arg.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl FromStr for Path {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a standalone path. The leading `@` is optional and the whole input
/// must be consumed.
pub fn parse_path(text: &str) -> Result<Path, SyntaxError> {
    let mut cursor = Cursor::new(text);
    let path = if cursor.peek() == Some('@') {
        parse_scoped_attribute(&mut cursor)?
    } else {
        PathParser::new(&mut cursor, false).parse_body()?
    };

    match cursor.peek() {
        None => Ok(path),
        Some(c) => Err(cursor.error(format!("unexpected character '{}' after path", c))),
    }
}

/// Parse a scoped attribute starting at the `@` under the cursor. The cursor
/// is left on the first character after the expression.
pub fn parse_scoped_attribute(cursor: &mut Cursor<'_>) -> Result<Path, SyntaxError> {
    if !cursor.eat('@') {
        return Err(cursor.error("expected '@' to start a scoped attribute"));
    }

    if cursor.peek() == Some('{') {
        let open = cursor.location();
        cursor.advance();
        if !cursor.rest().contains('}') {
            return Err(open.error("unterminated '{'"));
        }
        let path = PathParser::new(cursor, true).parse_body()?;
        return match cursor.peek() {
            Some('}') => {
                cursor.advance();
                Ok(path)
            }
            None => Err(open.error("unterminated '{'")),
            Some(c) => Err(cursor.error(format!("unexpected character '{}', expected '}}'", c))),
        };
    }

    if !cursor.peek().is_some_and(starts_segment) {
        return Err(cursor.error("expected a scoped attribute path after '@'"));
    }
    PathParser::new(cursor, false).parse_body()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn starts_segment(c: char) -> bool {
    is_ident_char(c) || c == '*' || c == '['
}

fn is_raw_arg_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | ',' | '[' | ']' | '{' | '}' | '"' | '\'' | '@')
}

struct PathParser<'c, 's> {
    cursor: &'c mut Cursor<'s>,
    /// Inside `@{...}`: separators always introduce a segment
    braced: bool,
}

impl<'c, 's> PathParser<'c, 's> {
    fn new(cursor: &'c mut Cursor<'s>, braced: bool) -> Self {
        Self { cursor, braced }
    }

    fn parse_body(&mut self) -> Result<Path, SyntaxError> {
        let mut segments = vec![self.parse_segment()?];

        loop {
            match self.cursor.peek() {
                Some('[') => segments.push(self.parse_literal()?),
                Some('|') => {
                    self.cursor.advance();
                    segments.push(self.parse_segment()?);
                }
                // A bare path leaves a trailing '.' to the surrounding text
                Some('.') if self.braced || self.cursor.peek_nth(1).is_some_and(starts_segment) => {
                    self.cursor.advance();
                    segments.push(self.parse_segment()?);
                }
                _ => break,
            }
        }

        Ok(Path::new(segments))
    }

    fn parse_segment(&mut self) -> Result<PathSegment, SyntaxError> {
        match self.cursor.peek() {
            Some('*') => {
                self.cursor.advance();
                Ok(PathSegment::Wildcard)
            }
            Some('[') => self.parse_literal(),
            Some(c) if is_ident_char(c) => {
                let start = self.cursor.location();
                let name = self.cursor.advance_while(is_ident_char);
                if self.cursor.peek() == Some('(') {
                    self.parse_function_call(name, start)
                } else {
                    Ok(PathSegment::Key(name.to_string()))
                }
            }
            Some(c) => Err(self
                .cursor
                .error(format!("unexpected character '{}', expected a path segment", c))),
            None => Err(self
                .cursor
                .error("unexpected end of input, expected a path segment")),
        }
    }

    fn parse_literal(&mut self) -> Result<PathSegment, SyntaxError> {
        let open = self.cursor.location();
        self.cursor.advance();
        let text = self.cursor.advance_while(|c| c != ']');
        if !self.cursor.eat(']') {
            return Err(open.error("unterminated '['"));
        }
        if text.is_empty() {
            return Err(open.error("empty literal '[]'"));
        }
        Ok(PathSegment::Literal(text.to_string()))
    }

    fn parse_function_call(
        &mut self,
        name: &str,
        start: Location,
    ) -> Result<PathSegment, SyntaxError> {
        let function = Function::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = Function::all().iter().map(Function::name).collect();
            start.error(format!(
                "unknown function '{}', expected one of: {}",
                name,
                known.join(", ")
            ))
        })?;

        let open = self.cursor.location();
        self.cursor.advance();
        let args = self.parse_args(open)?;

        if args.len() != function.arity() {
            return Err(start.error(format!(
                "function '{}' expects {} argument(s), got {}",
                function,
                function.arity(),
                args.len()
            )));
        }

        Ok(PathSegment::FunctionCall { function, args })
    }

    fn parse_args(&mut self, open: Location) -> Result<Vec<String>, SyntaxError> {
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.cursor.eat(')') {
            return Ok(args);
        }

        loop {
            self.skip_whitespace();
            args.push(self.parse_arg(open)?);
            self.skip_whitespace();
            match self.cursor.peek() {
                Some(',') => {
                    self.cursor.advance();
                }
                Some(')') => {
                    self.cursor.advance();
                    return Ok(args);
                }
                None => return Err(open.error("unterminated '('")),
                Some(c) => {
                    return Err(self
                        .cursor
                        .error(format!("unexpected character '{}' in arguments", c)))
                }
            }
        }
    }

    fn parse_arg(&mut self, open: Location) -> Result<String, SyntaxError> {
        match self.cursor.peek() {
            Some(q @ ('"' | '\'')) => self.parse_quoted(q),
            Some(c) if is_raw_arg_char(c) => {
                Ok(self.cursor.advance_while(is_raw_arg_char).to_string())
            }
            None => Err(open.error("unterminated '('")),
            Some(c) => Err(self
                .cursor
                .error(format!("unexpected character '{}', expected an argument", c))),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SyntaxError> {
        let open = self.cursor.location();
        self.cursor.advance();
        let mut value = String::new();

        loop {
            let here = self.cursor.location();
            match self.cursor.advance() {
                None => return Err(open.error("unterminated string")),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.cursor.advance() {
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('\'') => value.push('\''),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(c) => return Err(here.error(format!("invalid escape '\\{}'", c))),
                    None => return Err(open.error("unterminated string")),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        self.cursor.advance_while(char::is_whitespace);
    }
}
