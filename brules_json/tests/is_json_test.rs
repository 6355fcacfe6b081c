use brules_json::{is_json, is_json_with_options, ParseOptions};
use serde_json::json;

#[test]
fn absent_and_empty_text_is_not_json() {
    assert!(!is_json(None));
    assert!(!is_json(Some("")));
    assert!(!is_json(Some("   ")));
}

#[test]
fn empty_containers_are_json() {
    for text in ["{}", "{ }", "[]", "[ ]", " [ ] ", "{\n}"] {
        assert!(is_json(Some(text)), "{:?}", text);
    }
}

#[test]
fn relaxed_documents_are_json() {
    assert!(is_json(Some("{name: 'Carl'}")));
    assert!(is_json(Some("{name: \"Carl\"}")));
    assert!(is_json(Some("['BRules 1', 'BRules2']")));
    assert!(is_json(Some("{'mixed': \"quotes\", list: ['a', \"b\"]}")));
}

#[test]
fn scalars_are_json() {
    for text in ["true", "false", "null", "0", "-12.5e3", "'x'", "\"x\""] {
        assert!(is_json(Some(text)), "{:?}", text);
    }
}

#[test]
fn malformed_documents_are_not_json() {
    for text in [
        "{x}",
        "{",
        "[1, 2",
        "{name: Carl}",
        "{ [{\"name\": \"Carl\"}, {\"program\": \"BRules\"}] }",
        "hello",
        "{} {}",
        "[1,]",
        "01",
    ] {
        assert!(!is_json(Some(text)), "{:?}", text);
    }
}

#[test]
fn strict_json_is_always_json() {
    let docs = vec![
        json!({"name": "carl", "age": 42, "tags": ["a", "b"], "nested": {"ok": true, "none": null}}),
        json!([1, -2.5, 1e300, "\u{0001}\"\\/\u{00e9}\u{1F600}", [], {}]),
        json!("just a string with \n newline"),
        json!(12345678901234u64),
        json!({"": {"": [[[]]]}}),
    ];
    for doc in docs {
        let compact = doc.to_string();
        let pretty = serde_json::to_string_pretty(&doc).unwrap();
        assert!(is_json(Some(compact.as_str())), "{}", compact);
        assert!(is_json(Some(pretty.as_str())), "{}", pretty);
        assert!(is_json_with_options(Some(compact.as_str()), ParseOptions::strict()), "{}", compact);
    }
}

#[test]
fn depth_limit_is_configurable() {
    let nested = "[[[[[]]]]]";
    assert!(is_json(Some(nested)));
    assert!(!is_json_with_options(Some(nested), ParseOptions::default().with_max_depth(4)));
    assert!(is_json_with_options(Some(nested), ParseOptions::default().with_max_depth(5)));
}

#[test]
fn nesting_up_to_the_default_limit_is_json() {
    for depth in [200, 800, 1000] {
        let text = "[".repeat(depth) + &"]".repeat(depth);
        assert!(is_json(Some(text.as_str())), "depth {}", depth);
    }
    let text = "[".repeat(1001) + &"]".repeat(1001);
    assert!(!is_json(Some(text.as_str())));
    let text = "{a:".repeat(50_000);
    assert!(!is_json(Some(text.as_str())));
}
