//! Lenient JSON recognition and JsonPath matching.
//!
//! ```
//! use brules_json::{has_json_path, is_json};
//!
//! assert!(is_json(Some("{name: 'Carl'}")));
//! let json = Some("{items: [{'name': 'carl'}, {'name': 'jim'}]}");
//! assert!(has_json_path(json, Some("$.items[*].name")).unwrap());
//! ```

mod constants;
mod errors;
pub mod eval;
pub mod parser;
pub mod path;
mod stream;
mod value;

pub use errors::*;
pub use eval::evaluate;
pub use parser::{parse, parse_with_options, ParseOptions};
pub use path::{compile, PathExpression, PathSegment};
pub use value::{Map, Value};

use eval::{Eval, ExistenceAcceptor};
use tracing::debug;

pub trait JsonPathQuery {
    fn query(&self, json_path: &str) -> JsonPathResult<Vec<&Value>>;
}

impl JsonPathQuery for Value {
    fn query(&self, json_path: &str) -> JsonPathResult<Vec<&Value>> {
        let path = compile(json_path)?;
        Ok(evaluate(self, &path))
    }
}

/// Matches `\{\s*\}` or `\[\s*\]` against the whole text.
fn is_blank_container(text: &str) -> bool {
    let inner = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .or_else(|| text.strip_prefix('[').and_then(|t| t.strip_suffix(']')));
    match inner {
        Some(inner) => inner
            .chars()
            .all(|c| matches!(c, ' ' | '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r')),
        None => false,
    }
}

/// Whether `text` is a JSON-like document under the relaxed grammar.
///
/// Absent or empty text is not JSON. Never fails.
pub fn is_json(text: Option<&str>) -> bool {
    is_json_with_options(text, ParseOptions::default())
}

pub fn is_json_with_options(text: Option<&str>, options: ParseOptions) -> bool {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return false,
    };
    if is_blank_container(text) {
        return true;
    }
    match parse_with_options(text, options) {
        Ok(_) => true,
        Err(e) => {
            debug!(error = %e, "text is not JSON");
            false
        }
    }
}

/// Whether `json_path` matches anything in the document `text`.
///
/// An absent or empty document, a document that does not parse, and a path
/// that does not compile all yield `Ok(false)`. An absent or empty path is a
/// caller error and yields [`JsonPathError::InvalidArgument`].
pub fn has_json_path(text: Option<&str>, json_path: Option<&str>) -> JsonPathResult<bool> {
    has_json_path_with_options(text, json_path, ParseOptions::default())
}

pub fn has_json_path_with_options(
    text: Option<&str>,
    json_path: Option<&str>,
    options: ParseOptions,
) -> JsonPathResult<bool> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(false),
    };
    let json_path = required_path(json_path)?;

    let tree = match parse_with_options(text, options) {
        Ok(tree) => tree,
        Err(e) => {
            debug!(error = %e, "document is not JSON, no jsonpath match");
            return Ok(false);
        }
    };
    let path = match compile(json_path) {
        Ok(path) => path,
        Err(e) => {
            debug!(error = %e, json_path, "invalid jsonpath, no match");
            return Ok(false);
        }
    };

    let mut acceptor = ExistenceAcceptor::new();
    Eval::new(&path).eval(&tree, &mut acceptor);
    Ok(acceptor.found())
}

/// Text of every match of `json_path` in `text`, in document order.
///
/// Unlike [`has_json_path`], parse and path errors are returned to the caller.
/// Matched strings appear as their raw content, other values as compact JSON.
pub fn query_json_path(text: &str, json_path: &str) -> JsonPathResult<Vec<String>> {
    query_json_path_with_options(text, json_path, ParseOptions::default())
}

pub fn query_json_path_with_options(
    text: &str,
    json_path: &str,
    options: ParseOptions,
) -> JsonPathResult<Vec<String>> {
    let json_path = required_path(Some(json_path))?;
    let path = compile(json_path)?;
    let tree = parse_with_options(text, options)?;
    Ok(evaluate(&tree, &path)
        .into_iter()
        .map(Value::to_match_string)
        .collect())
}

fn required_path(json_path: Option<&str>) -> JsonPathResult<&str> {
    match json_path {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(JsonPathError::InvalidArgument(
            "a jsonpath must be specified".to_string(),
        )),
    }
}
