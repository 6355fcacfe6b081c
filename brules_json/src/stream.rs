use std::str::CharIndices;

use peekmore::{PeekMore, PeekMoreIterator};

/// A character cursor over borrowed text that knows the byte offset of the
/// next unread character.
///
/// The peekmore cursor is only moved inside [`TextStream::peek_matches`] and
/// is always reset before it returns, so `peek` always sees the next unread
/// character.
pub struct TextStream<'a> {
    chars: PeekMoreIterator<CharIndices<'a>>,
    len: usize,
}

impl<'a> TextStream<'a> {
    pub fn new(text: &'a str) -> Self {
        TextStream {
            chars: text.char_indices().peekmore(),
            len: text.len(),
        }
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    pub fn next(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Byte offset of the next unread character, or the text length at the end.
    pub fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.len)
    }

    pub fn next_if_eq(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    pub fn drop_while<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&char) -> bool,
    {
        while let Some(c) = self.peek() {
            if predicate(&c) {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    /// Reads characters while `predicate` holds and returns them.
    pub fn take_while<P>(&mut self, mut predicate: P) -> String
    where
        P: FnMut(&char) -> bool,
    {
        let mut w = String::new();
        while let Some(c) = self.peek() {
            if !predicate(&c) {
                break;
            }
            w.push(c);
            self.chars.next();
        }
        w
    }

    /// Checks whether the unread text starts with `pattern` without consuming it.
    pub fn peek_matches(&mut self, pattern: &str) -> bool {
        let mut matched = true;
        for expected in pattern.chars() {
            match self.chars.peek() {
                Some(&(_, c)) if c == expected => {
                    self.chars.advance_cursor();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        self.chars.reset_cursor();
        matched
    }

    /// Consumes `pattern` if the unread text starts with it.
    pub fn next_if_matches(&mut self, pattern: &str) -> bool {
        if !self.peek_matches(pattern) {
            return false;
        }
        for _ in pattern.chars() {
            self.chars.next();
        }
        true
    }
}
