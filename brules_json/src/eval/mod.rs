mod result_acceptor;
pub use result_acceptor::*;

use tracing::trace;

use crate::{
    path::{PathExpression, PathSegment},
    Value,
};

/// Applies a compiled path to a value tree, one segment at a time, over the
/// set of nodes matched so far.
pub struct Eval<'p> {
    path: &'p PathExpression,
}

/// Returns every node `path` matches in `tree`, in document order.
pub fn evaluate<'v>(tree: &'v Value, path: &PathExpression) -> Vec<&'v Value> {
    let mut collector = MatchCollector::new();
    Eval::new(path).eval(tree, &mut collector);
    collector.into_matches()
}

impl<'p> Eval<'p> {
    pub fn new(path: &'p PathExpression) -> Self {
        Eval { path }
    }

    pub fn eval<'v>(&self, json: &'v Value, acceptor: &mut impl ResultAcceptor<'v>) {
        let segments = self.path.segments();
        let (last, steps) = match segments.split_last() {
            Some(split) => split,
            None => return,
        };

        let mut working: Vec<&'v Value> = vec![json];
        for segment in steps {
            let mut next = vec![];
            for node in working.iter().copied() {
                select(segment, node, &mut next);
            }
            trace!(?segment, matched = next.len(), "applied jsonpath segment");
            if next.is_empty() {
                return;
            }
            working = next;
        }

        let mut selected = vec![];
        for node in working {
            select(last, node, &mut selected);
            for value in selected.drain(..) {
                if !acceptor.accept(value) {
                    return;
                }
            }
        }
    }
}

/// Pushes what `segment` selects from `node`; selects nothing where the
/// segment does not apply to the node's type.
fn select<'v>(segment: &PathSegment, node: &'v Value, out: &mut Vec<&'v Value>) {
    match (segment, node) {
        (PathSegment::Root, _) => out.push(node),
        (PathSegment::Field(name), Value::Object(object)) => out.extend(object.get(name)),
        (PathSegment::Wildcard, Value::Array(array)) => out.extend(array.iter()),
        (PathSegment::Wildcard, Value::Object(object)) => out.extend(object.values()),
        (PathSegment::Index(i), Value::Array(array)) => out.extend(array.get(*i)),
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use crate::{parse, path::compile, JsonPathResult, Value};

    use super::{evaluate, Eval, ExistenceAcceptor, ResultAcceptor};

    fn strings(matches: Vec<&Value>) -> Vec<String> {
        matches.iter().map(|v| v.to_match_string()).collect()
    }

    fn query(json: &str, path: &str) -> JsonPathResult<Vec<String>> {
        let tree = parse(json)?;
        let path = compile(path)?;
        Ok(strings(evaluate(&tree, &path)))
    }

    #[test]
    fn can_query_root_node() -> JsonPathResult<()> {
        assert_eq!(vec![r#"{"data":{"msg":"hello"}}"#], query("{data: {msg: 'hello'}}", "$")?);
        Ok(())
    }

    #[test]
    fn can_query_single_property() -> JsonPathResult<()> {
        assert_eq!(vec!["hello"], query("{data: {msg: 'hello'}}", "$.data.msg")?);
        assert_eq!(vec!["hello"], query("{data: {msg: 'hello'}}", "$['data'].msg")?);
        Ok(())
    }

    #[test]
    fn wildcard_fans_out_over_arrays_and_objects() -> JsonPathResult<()> {
        let json = "{items: [{'name': 'carl'}, {'name': 'jim'}, {'age': 3}]}";
        assert_eq!(vec!["carl", "jim"], query(json, "$.items[*].name")?);
        assert_eq!(
            vec!["1", "x", "true"],
            query("{o: {a: 1, b: 'x', c: true}}", "$.o.*")?
        );
        assert_eq!(vec!["a", "b", "c"], query("{x: ['a', 'b', 'c']}", "$.x[*]")?);
        Ok(())
    }

    #[test]
    fn index_selects_array_elements() -> JsonPathResult<()> {
        let json = "{rows: [[1, 2], [3], []]}";
        assert_eq!(vec!["[3]"], query(json, "$.rows[1]")?);
        assert_eq!(vec!["2"], query(json, "$.rows[0][1]")?);
        assert_eq!(vec!["1", "3"], query(json, "$.rows[*][0]")?);
        assert!(query(json, "$.rows[7]")?.is_empty());
        Ok(())
    }

    #[test]
    fn segments_do_nothing_on_mismatched_types() -> JsonPathResult<()> {
        assert!(query("[1, 2]", "$.a")?.is_empty());
        assert!(query("{a: 1}", "$[0]")?.is_empty());
        assert!(query("'text'", "$[*]")?.is_empty());
        assert!(query("{a: null}", "$.a.b")?.is_empty());
        assert!(query("{a: 1}", "$.b[*].c[0]")?.is_empty());
        Ok(())
    }

    #[test]
    fn null_members_are_matches() -> JsonPathResult<()> {
        assert_eq!(vec!["null"], query("{a: null}", "$.a")?);
        Ok(())
    }

    #[test]
    fn existence_acceptor_stops_at_first_match() -> JsonPathResult<()> {
        struct Counting<'v>(Vec<&'v Value>);
        impl<'v> ResultAcceptor<'v> for Counting<'v> {
            fn accept(&mut self, value: &'v Value) -> bool {
                self.0.push(value);
                self.0.len() < 2
            }
        }

        let tree = parse("[1, 2, 3, 4]")?;
        let path = compile("$[*]")?;

        let mut exists = ExistenceAcceptor::new();
        Eval::new(&path).eval(&tree, &mut exists);
        assert!(exists.found());

        let mut counting = Counting(vec![]);
        Eval::new(&path).eval(&tree, &mut counting);
        assert_eq!(vec!["1", "2"], strings(counting.0));
        Ok(())
    }

    #[test]
    fn evaluation_is_repeatable() -> JsonPathResult<()> {
        let tree = parse("{x: [{y: 1}, {y: 2}]}")?;
        let path = compile("$.x[*].y")?;
        assert_eq!(evaluate(&tree, &path), evaluate(&tree, &path));
        Ok(())
    }
}
