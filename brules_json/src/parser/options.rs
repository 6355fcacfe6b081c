/// Nesting limit applied unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Leniency switches for the JSON grammar.
///
/// The defaults accept the relaxed grammar: bareword object keys and
/// single-quoted strings. [`ParseOptions::strict`] accepts strict JSON only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub allow_unquoted_keys: bool,
    pub allow_single_quotes: bool,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            allow_unquoted_keys: true,
            allow_single_quotes: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions {
            allow_unquoted_keys: false,
            allow_single_quotes: false,
            ..Default::default()
        }
    }

    pub fn with_unquoted_keys(mut self, allow: bool) -> Self {
        self.allow_unquoted_keys = allow;
        self
    }

    pub fn with_single_quotes(mut self, allow: bool) -> Self {
        self.allow_single_quotes = allow;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
