//! Character cursor shared by the template scanner and the path parser
//!
//! The template scanner hands the same cursor to the path parser by `&mut`,
//! and resumes scanning literals wherever the path parser stopped.

use crate::error::SyntaxError;

/// 1-based line and column of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Build a syntax error pointing at this location
    pub fn error(self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.line, self.column, message)
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    input: &'s str,
    /// Byte offset of the next character
    pos: usize,
    line: u32,
    column: u32,
}

impl<'s> Cursor<'s> {
    pub fn new(input: &'s str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn input(&self) -> &'s str {
        self.input
    }

    /// Byte offset of the next character
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'s str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look `n` characters past the next one (`peek_nth(0) == peek()`)
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `expected` if it is the next character
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds and return them
    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
        &self.input[start..self.pos]
    }

    /// Text between a previous position and the current one
    pub fn slice_from(&self, mark: usize) -> &'s str {
        &self.input[mark..self.pos]
    }

    /// Syntax error at the next character
    pub fn error(&self, message: impl Into<String>) -> SyntaxError {
        self.location().error(message)
    }
}
