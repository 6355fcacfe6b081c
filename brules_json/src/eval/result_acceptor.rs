use crate::Value;

/// Receives the final matches of an evaluation, in order.
pub trait ResultAcceptor<'v> {
    /// Takes one match. Returning `false` stops the evaluation.
    fn accept(&mut self, value: &'v Value) -> bool;
}

/// Keeps every match.
#[derive(Debug, Default)]
pub struct MatchCollector<'v> {
    matches: Vec<&'v Value>,
}

impl<'v> MatchCollector<'v> {
    pub fn new() -> Self {
        Self { matches: vec![] }
    }

    pub fn into_matches(self) -> Vec<&'v Value> {
        self.matches
    }
}

impl<'v> ResultAcceptor<'v> for MatchCollector<'v> {
    fn accept(&mut self, value: &'v Value) -> bool {
        self.matches.push(value);
        true
    }
}

/// Stops at the first match.
#[derive(Debug, Default)]
pub struct ExistenceAcceptor {
    found: bool,
}

impl ExistenceAcceptor {
    pub fn new() -> Self {
        Self { found: false }
    }

    pub fn found(&self) -> bool {
        self.found
    }
}

impl<'v> ResultAcceptor<'v> for ExistenceAcceptor {
    fn accept(&mut self, _value: &'v Value) -> bool {
        self.found = true;
        false
    }
}
