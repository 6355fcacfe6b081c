use crate::{constants::*, stream::TextStream, ParseError};

use super::ParseOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    NameSeparator,
    ValueSeparator,
    String(String),
    /// A bare identifier: a literal (`true`, `false`, `null`) or an unquoted key.
    Word(String),
    Number(f64),
    Eof,
}

/// A token and the byte offset it starts at.
pub type Spanned = (usize, Token);

type LexResult<T> = Result<T, ParseError>;

pub struct Lexer<'a> {
    stream: TextStream<'a>,
    options: ParseOptions,
}

fn is_json_whitespace(c: &char) -> bool {
    matches!(*c, SPACE | TAB | CR | LF)
}

fn is_word_start(c: &char) -> bool {
    c.is_alphabetic() || *c == UNDERSCORE || *c == DOC_CONTEXT
}

fn is_word_char(c: &char) -> bool {
    c.is_alphanumeric() || *c == UNDERSCORE || *c == DOC_CONTEXT
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, options: ParseOptions) -> Self {
        Lexer {
            stream: TextStream::new(text),
            options,
        }
    }

    pub fn next_token(&mut self) -> LexResult<Spanned> {
        self.stream.drop_while(is_json_whitespace);
        let offset = self.stream.offset();
        let c = match self.stream.peek() {
            None => return Ok((offset, Token::Eof)),
            Some(c) => c,
        };
        let token = match c {
            OPEN_BRACE => self.single(Token::BeginObject),
            CLOSE_BRACE => self.single(Token::EndObject),
            OPEN_SQUARE_BRACKET => self.single(Token::BeginArray),
            CLOSE_SQUARE_BRACKET => self.single(Token::EndArray),
            COLON => self.single(Token::NameSeparator),
            COMMA => self.single(Token::ValueSeparator),
            DOUBLE_QUOTE => Token::String(self.read_string()?),
            SINGLE_QUOTE if self.options.allow_single_quotes => Token::String(self.read_string()?),
            MINUS => Token::Number(self.read_number()?),
            c if c.is_ascii_digit() => Token::Number(self.read_number()?),
            c if is_word_start(&c) => Token::Word(self.stream.take_while(is_word_char)),
            _ => return Err(ParseError::expected(offset, "a JSON value or punctuation")),
        };
        Ok((offset, token))
    }

    fn single(&mut self, token: Token) -> Token {
        self.stream.next();
        token
    }

    fn read_digits(&mut self, w: &mut String, expected: &'static str) -> LexResult<()> {
        let offset = self.stream.offset();
        let digits = self.stream.take_while(char::is_ascii_digit);
        if digits.is_empty() {
            return Err(ParseError::expected(offset, expected));
        }
        w.push_str(&digits);
        Ok(())
    }

    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn read_number(&mut self) -> LexResult<f64> {
        let start = self.stream.offset();
        let mut w = String::new();
        if self.stream.next_if_eq(MINUS) {
            w.push(MINUS);
        }
        if self.stream.next_if_eq('0') {
            w.push('0');
        } else {
            self.read_digits(&mut w, "a digit")?;
        }
        if self.stream.next_if_eq(PERIOD) {
            w.push(PERIOD);
            self.read_digits(&mut w, "a digit after '.'")?;
        }
        if let Some(e @ ('e' | 'E')) = self.stream.peek() {
            self.stream.next();
            w.push(e);
            if let Some(sign @ (PLUS | MINUS)) = self.stream.peek() {
                self.stream.next();
                w.push(sign);
            }
            self.read_digits(&mut w, "a digit in the exponent")?;
        }
        w.parse::<f64>()
            .map_err(|_e| ParseError::expected(start, "a number"))
    }

    fn read_string(&mut self) -> LexResult<String> {
        let quote = match self.stream.next() {
            Some(q) => q,
            None => return Err(ParseError::expected(self.stream.offset(), "a quote")),
        };
        let mut s = String::new();
        loop {
            let offset = self.stream.offset();
            match self.stream.next() {
                None => return Err(ParseError::expected(offset, "a closing quote")),
                Some(c) if c == quote => return Ok(s),
                Some(ESCAPE) => s.push(self.read_escape()?),
                Some(c) if (c as u32) < 0x20 => {
                    return Err(ParseError::expected(offset, "an escaped control character"))
                }
                Some(c) => s.push(c),
            }
        }
    }

    fn read_escape(&mut self) -> LexResult<char> {
        let offset = self.stream.offset();
        let c = match self.stream.next() {
            Some('"') => '"',
            Some('\'') if self.options.allow_single_quotes => '\'',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.read_unicode_escape(offset),
            _ => return Err(ParseError::expected(offset, "a valid escape sequence")),
        };
        Ok(c)
    }

    fn read_hex4(&mut self) -> LexResult<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let offset = self.stream.offset();
            let digit = self
                .stream
                .next()
                .and_then(|c| c.to_digit(16))
                .ok_or(ParseError::expected(offset, "a hex digit"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn read_unicode_escape(&mut self, offset: usize) -> LexResult<char> {
        let high = self.read_hex4()?;
        let code = match high {
            0xD800..=0xDBFF => {
                if !self.stream.next_if_matches("\\u") {
                    return Err(ParseError::expected(
                        self.stream.offset(),
                        "a low surrogate escape",
                    ));
                }
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(ParseError::expected(offset, "a low surrogate escape"));
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(ParseError::expected(offset, "a high surrogate before a low one"))
            }
            c => c,
        };
        char::from_u32(code).ok_or(ParseError::expected(offset, "a unicode scalar value"))
    }
}
