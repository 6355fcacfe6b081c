//! Parser for relaxed JSON.
//!
//! Scalars are read straight from the lexer with one token of lookahead.
//! Arrays and objects are built on an explicit stack of open containers, so
//! nesting depth costs heap, not call stack, and only `max_depth` bounds it.
//! The relaxed features (bareword keys, single-quoted strings) are switched
//! by [`ParseOptions`] rather than living in a second grammar, so validating
//! and querying always agree on what a document means.

mod lexer;
mod options;

pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};

use lexer::{Lexer, Spanned, Token};

use crate::{Map, ParseError, Value};

type ParseResult<T> = Result<T, ParseError>;

/// Parses `text` with the default relaxed options.
pub fn parse(text: &str) -> ParseResult<Value> {
    parse_with_options(text, ParseOptions::default())
}

pub fn parse_with_options(text: &str, options: ParseOptions) -> ParseResult<Value> {
    Parser::new(text, options).parse_document()
}

/// A container whose closing bracket has not been read yet.
enum Frame {
    Array(Vec<Value>),
    /// `key` is the member whose value is being parsed.
    Object { map: Map, key: String },
}

impl Frame {
    fn into_value(self) -> Value {
        match self {
            Frame::Array(items) => Value::Array(items),
            Frame::Object { map, .. } => Value::Object(map),
        }
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Spanned>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str, options: ParseOptions) -> Self {
        Parser {
            lexer: Lexer::new(text, options),
            lookahead: None,
            options,
        }
    }

    /// Parses exactly one value followed by nothing but whitespace.
    pub fn parse_document(mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;
        match self.bump()? {
            (_, Token::Eof) => Ok(value),
            (offset, _) => Err(ParseError::expected(offset, "end of input")),
        }
    }

    fn peek(&mut self) -> ParseResult<&Spanned> {
        let t = match self.lookahead.take() {
            Some(t) => t,
            None => self.lexer.next_token()?,
        };
        Ok(&*self.lookahead.insert(t))
    }

    fn bump(&mut self) -> ParseResult<Spanned> {
        match self.lookahead.take() {
            Some(t) => Ok(t),
            None => self.lexer.next_token(),
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        let mut stack: Vec<Frame> = vec![];
        'value: loop {
            let mut value = match self.bump()? {
                (offset, Token::BeginObject) => {
                    self.check_depth(stack.len() + 1, offset)?;
                    if matches!(self.peek()?, (_, Token::EndObject)) {
                        self.bump()?;
                        Value::Object(Map::new())
                    } else {
                        let key = self.parse_member_key()?;
                        stack.push(Frame::Object {
                            map: Map::new(),
                            key,
                        });
                        continue 'value;
                    }
                }
                (offset, Token::BeginArray) => {
                    self.check_depth(stack.len() + 1, offset)?;
                    if matches!(self.peek()?, (_, Token::EndArray)) {
                        self.bump()?;
                        Value::Array(vec![])
                    } else {
                        stack.push(Frame::Array(vec![]));
                        continue 'value;
                    }
                }
                token => self.parse_scalar(token)?,
            };

            // hand the finished value to its parent, closing every container
            // whose last member it was
            loop {
                let mut frame = match stack.pop() {
                    Some(frame) => frame,
                    None => return Ok(value),
                };
                let closed = match &mut frame {
                    Frame::Array(items) => {
                        items.push(value);
                        match self.bump()? {
                            (_, Token::ValueSeparator) => false,
                            (_, Token::EndArray) => true,
                            (offset, _) => return Err(ParseError::expected(offset, "',' or ']'")),
                        }
                    }
                    Frame::Object { map, key } => {
                        map.insert(std::mem::take(key), value);
                        match self.bump()? {
                            (_, Token::ValueSeparator) => {
                                *key = self.parse_member_key()?;
                                false
                            }
                            (_, Token::EndObject) => true,
                            (offset, _) => return Err(ParseError::expected(offset, "',' or '}'")),
                        }
                    }
                };
                if !closed {
                    stack.push(frame);
                    continue 'value;
                }
                value = frame.into_value();
            }
        }
    }

    fn parse_scalar(&mut self, token: Spanned) -> ParseResult<Value> {
        match token {
            (_, Token::String(s)) => Ok(Value::String(s)),
            (_, Token::Number(n)) => Ok(Value::Number(n)),
            (offset, Token::Word(w)) => match w.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                _ => Err(ParseError::expected(offset, "a value")),
            },
            (offset, _) => Err(ParseError::expected(offset, "a value")),
        }
    }

    fn check_depth(&self, depth: usize, offset: usize) -> ParseResult<()> {
        if depth > self.options.max_depth {
            return Err(ParseError::too_deep(offset, self.options.max_depth));
        }
        Ok(())
    }

    /// `key ':'`
    fn parse_member_key(&mut self) -> ParseResult<String> {
        let key = match self.bump()? {
            (_, Token::String(s)) => s,
            (_, Token::Word(w)) if self.options.allow_unquoted_keys => w,
            (offset, _) => return Err(ParseError::expected(offset, "an object key")),
        };
        match self.bump()? {
            (_, Token::NameSeparator) => Ok(key),
            (offset, _) => Err(ParseError::expected(offset, "':'")),
        }
    }
}
