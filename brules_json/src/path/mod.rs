//! JsonPath subset: `$`, `.name`, `.*`, `[*]`, `[n]` and `['name']`.

use std::{fmt::Display, str::FromStr};

use crate::{constants::*, stream::TextStream, JsonPathError, JsonPathResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Root,
    Field(String),
    Wildcard,
    Index(usize),
}

/// A compiled path. The first segment is always [`PathSegment::Root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    segments: Vec<PathSegment>,
}

impl PathExpression {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl FromStr for PathExpression {
    type Err = JsonPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s)
    }
}

impl Display for PathExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            match segment {
                PathSegment::Root => f.write_str("$")?,
                PathSegment::Field(name) if is_plain_name(name) => {
                    f.write_fmt(format_args!(".{}", name))?
                }
                PathSegment::Field(name) => f.write_fmt(format_args!(
                    "['{}']",
                    name.replace('\\', "\\\\").replace('\'', "\\'")
                ))?,
                PathSegment::Wildcard => f.write_str("[*]")?,
                PathSegment::Index(i) => f.write_fmt(format_args!("[{}]", i))?,
            }
        }
        Ok(())
    }
}

/// Compiles path text into a [`PathExpression`].
///
/// Fails with [`JsonPathError::InvalidJsonPath`] carrying the byte offset of
/// the offending character.
pub fn compile(json_path: &str) -> JsonPathResult<PathExpression> {
    PathCompiler::new(json_path).compile()
}

fn is_name_char(c: &char) -> bool {
    c.is_alphanumeric() || *c == UNDERSCORE || *c == DOC_CONTEXT || *c == MINUS
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| is_name_char(&c))
}

fn invalid<T>(message: &str, pos: usize) -> JsonPathResult<T> {
    Err(JsonPathError::InvalidJsonPath(message.to_string(), pos))
}

struct PathCompiler<'a> {
    stream: TextStream<'a>,
    segments: Vec<PathSegment>,
}

impl<'a> PathCompiler<'a> {
    fn new(json_path: &'a str) -> Self {
        PathCompiler {
            stream: TextStream::new(json_path),
            segments: vec![],
        }
    }

    fn compile(mut self) -> JsonPathResult<PathExpression> {
        self.stream.drop_while(|c| c.is_whitespace());
        let pos = self.stream.offset();
        if !self.stream.next_if_eq(DOC_CONTEXT) {
            return invalid("The jsonpath must start with '$'", pos);
        }
        self.segments.push(PathSegment::Root);

        loop {
            let pos = self.stream.offset();
            match self.stream.peek() {
                None => break,
                Some(PERIOD) => self.read_dot_segment()?,
                Some(OPEN_SQUARE_BRACKET) => self.read_bracket_segment()?,
                Some(c) if c.is_whitespace() => {
                    self.stream.drop_while(|c| c.is_whitespace());
                    if self.stream.peek().is_some() {
                        let pos = self.stream.offset();
                        return invalid("Unexpected character after the jsonpath", pos);
                    }
                }
                Some(_) => return invalid("Illegal character, expected '.' or '['", pos),
            }
        }

        Ok(PathExpression {
            segments: self.segments,
        })
    }

    fn read_dot_segment(&mut self) -> JsonPathResult<()> {
        self.stream.next();
        let pos = self.stream.offset();
        match self.stream.peek() {
            None => invalid("The jsonpath must not end with a '.'", pos),
            Some(PERIOD) => invalid("Deep scan ('..') is not supported", pos),
            Some(WILDCARD) => {
                self.stream.next();
                self.segments.push(PathSegment::Wildcard);
                Ok(())
            }
            Some(c) if is_name_char(&c) => {
                let name = self.stream.take_while(is_name_char);
                self.segments.push(PathSegment::Field(name));
                Ok(())
            }
            Some(_) => invalid("Expected a property name after '.'", pos),
        }
    }

    fn read_bracket_segment(&mut self) -> JsonPathResult<()> {
        if self.stream.next_if_matches("[*]") {
            self.segments.push(PathSegment::Wildcard);
            return Ok(());
        }
        let open = self.stream.offset();
        self.stream.next();
        let pos = self.stream.offset();
        let segment = match self.stream.peek() {
            None => return invalid("Unterminated '['", open),
            Some(SINGLE_QUOTE | DOUBLE_QUOTE) => PathSegment::Field(self.read_quoted_name()?),
            Some(c) if c.is_ascii_digit() => {
                let digits = self.stream.take_while(char::is_ascii_digit);
                let index = digits.parse::<usize>().map_err(|_e| {
                    JsonPathError::InvalidJsonPath("Array index is too large".to_string(), pos)
                })?;
                PathSegment::Index(index)
            }
            Some(_) => {
                return invalid(
                    "Expected '*', a non-negative index or a quoted name inside '[]'",
                    pos,
                )
            }
        };
        let pos = self.stream.offset();
        if !self.stream.next_if_eq(CLOSE_SQUARE_BRACKET) {
            return invalid("Expected ']'", pos);
        }
        self.segments.push(segment);
        Ok(())
    }

    fn read_quoted_name(&mut self) -> JsonPathResult<String> {
        let open = self.stream.offset();
        let quote = match self.stream.next() {
            Some(q) => q,
            None => return invalid("Expected a quoted name", open),
        };
        let mut s = String::new();
        loop {
            match self.stream.next() {
                None => return invalid("Unterminated quoted name", open),
                Some(c) if c == quote => return Ok(s),
                Some(ESCAPE) => {
                    let pos = self.stream.offset();
                    match self.stream.next() {
                        Some(c @ (ESCAPE | SINGLE_QUOTE | DOUBLE_QUOTE)) => s.push(c),
                        _ => return invalid("Unsupported escape in quoted name", pos),
                    }
                }
                Some(c) => s.push(c),
            }
        }
    }
}
