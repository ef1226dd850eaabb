//! Parsers for the two metadata decorators the zoo's wrapper classes carry.
//!
//! `enforce_types_and_ranges({...})` on `__init__` declares per-parameter
//! constraints; `tag(task=..., ...)` on the class declares semantic labels.
//! Any other decorator is silently skipped, so wrappers are free to stack
//! unrelated decorators alongside these.

use indexmap::IndexMap;
use tree_sitter::Node;

use crate::analyzer::literal::evaluate;
use crate::schema::{ClassSchema, LiteralValue, ParameterSchema};

/// Decorator declaring constructor parameter constraints.
pub const CONSTRAINT_DECORATOR: &str = "enforce_types_and_ranges";

/// Decorator declaring semantic tags on a wrapped class.
pub const TAG_DECORATOR: &str = "tag";

/// Parse a constraint decorator expression into a parameter table.
///
/// Returns an empty map when the decorator is not a
/// `enforce_types_and_ranges(...)` call or its first argument is not a dict
/// literal. Only `type`/`default` (kept as evaluated values) and
/// `range`/`options` (evaluated then stringified) are retained; unknown
/// property keys are ignored.
pub fn parse_constraints(decorator: Node<'_>, source: &[u8]) -> ClassSchema {
    let mut params = ClassSchema::new();
    let Some(arguments) = matching_call(decorator, source, CONSTRAINT_DECORATOR) else {
        return params;
    };
    let Some(spec_dict) = first_positional(arguments) else {
        return params;
    };
    if spec_dict.kind() != "dictionary" {
        return params;
    }

    for (name_node, properties) in dict_pairs(spec_dict) {
        let LiteralValue::Str(param_name) = evaluate(name_node, source) else {
            continue;
        };
        if properties.kind() != "dictionary" {
            continue;
        }
        let mut schema = ParameterSchema::default();
        for (key_node, value_node) in dict_pairs(properties) {
            let LiteralValue::Str(key) = evaluate(key_node, source) else {
                continue;
            };
            match key.as_str() {
                "type" => schema.type_desc = Some(evaluate(value_node, source)),
                "default" => schema.default = Some(evaluate(value_node, source)),
                "range" => schema.range = Some(evaluate(value_node, source).py_str()),
                "options" => schema.options = Some(evaluate(value_node, source).py_str()),
                _ => {}
            }
        }
        params.insert(param_name, schema);
    }
    params
}

/// Parse a tag decorator expression into tag lists.
///
/// Each keyword argument's value is evaluated; scalar values are wrapped
/// into single-element lists so tags are always exposed as lists.
pub fn parse_tags(decorator: Node<'_>, source: &[u8]) -> IndexMap<String, Vec<LiteralValue>> {
    let mut tags = IndexMap::new();
    let Some(arguments) = matching_call(decorator, source, TAG_DECORATOR) else {
        return tags;
    };

    let mut cursor = arguments.walk();
    for child in arguments.named_children(&mut cursor) {
        if child.kind() != "keyword_argument" {
            continue;
        }
        let (Some(name), Some(value)) = (
            child.child_by_field_name("name"),
            child.child_by_field_name("value"),
        ) else {
            continue;
        };
        let key = name.utf8_text(source).unwrap_or("").to_string();
        let values = match evaluate(value, source) {
            LiteralValue::List(items) => items,
            scalar => vec![scalar],
        };
        tags.insert(key, values);
    }
    tags
}

/// If `decorator` is a call to the named bare identifier, return its
/// argument list.
fn matching_call<'a>(decorator: Node<'a>, source: &[u8], name: &str) -> Option<Node<'a>> {
    if decorator.kind() != "call" {
        return None;
    }
    let function = decorator.child_by_field_name("function")?;
    if function.kind() != "identifier" || function.utf8_text(source).ok()? != name {
        return None;
    }
    decorator.child_by_field_name("arguments")
}

fn first_positional(arguments: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = arguments.walk();
    let first = arguments
        .named_children(&mut cursor)
        .find(|c| !matches!(c.kind(), "keyword_argument" | "comment"));
    first
}

fn dict_pairs(dict: Node<'_>) -> Vec<(Node<'_>, Node<'_>)> {
    let mut pairs = Vec::new();
    let mut cursor = dict.walk();
    for child in dict.named_children(&mut cursor) {
        if child.kind() != "pair" {
            continue;
        }
        if let (Some(key), Some(value)) = (
            child.child_by_field_name("key"),
            child.child_by_field_name("value"),
        ) {
            pairs.push((key, value));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    /// Parse a decorated function and hand each decorator expression to `f`.
    fn with_decorators(source: &str, mut f: impl FnMut(Node<'_>, &[u8])) {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("python grammar loads");
        let tree = parser.parse(source, None).expect("source parses");
        let decorated = tree.root_node().named_child(0).expect("one definition");
        assert_eq!(decorated.kind(), "decorated_definition");
        let mut cursor = decorated.walk();
        for child in decorated.children(&mut cursor) {
            if child.kind() == "decorator" {
                let expr = child.named_child(0).expect("decorator expression");
                f(expr, source.as_bytes());
            }
        }
    }

    #[test]
    fn test_constraint_decorator_full_grammar() {
        let source = r#"
@enforce_types_and_ranges({
    'num_classes': {'type': int, 'default': 1000, 'range': (1, 10000)},
    'pretrained': {'type': bool, 'default': False},
    'mode': {'type': str, 'default': 'bilinear', 'options': ['bilinear', 'nearest']},
})
def __init__(self):
    pass
"#;
        let mut params = ClassSchema::new();
        with_decorators(source, |node, src| params.extend(parse_constraints(node, src)));

        assert_eq!(params.len(), 3);
        let num_classes = &params["num_classes"];
        assert_eq!(num_classes.type_desc, Some(LiteralValue::type_ref("int")));
        assert_eq!(num_classes.default, Some(LiteralValue::Int(1000)));
        assert_eq!(num_classes.range.as_deref(), Some("(1, 10000)"));
        assert_eq!(num_classes.options, None);

        let pretrained = &params["pretrained"];
        assert_eq!(pretrained.default, Some(LiteralValue::Bool(false)));

        let mode = &params["mode"];
        assert_eq!(mode.options.as_deref(), Some("['bilinear', 'nearest']"));
        assert_eq!(mode.range, None);
    }

    #[test]
    fn test_unknown_property_keys_ignored() {
        let source = r#"
@enforce_types_and_ranges({'x': {'type': int, 'doc': 'ignored', 'default': 1}})
def __init__(self):
    pass
"#;
        let mut params = ClassSchema::new();
        with_decorators(source, |node, src| params.extend(parse_constraints(node, src)));
        let x = &params["x"];
        assert_eq!(x.type_desc, Some(LiteralValue::type_ref("int")));
        assert_eq!(x.default, Some(LiteralValue::Int(1)));
        assert_eq!(x.range, None);
        assert_eq!(x.options, None);
    }

    #[test]
    fn test_unrelated_decorator_is_noop() {
        let source = "@torch.no_grad()\ndef __init__(self):\n    pass\n";
        let mut params = ClassSchema::new();
        with_decorators(source, |node, src| params.extend(parse_constraints(node, src)));
        assert!(params.is_empty());
    }

    #[test]
    fn test_bare_decorator_is_noop() {
        let source = "@staticmethod\ndef __init__(self):\n    pass\n";
        let mut params = ClassSchema::new();
        with_decorators(source, |node, src| params.extend(parse_constraints(node, src)));
        assert!(params.is_empty());
    }

    #[test]
    fn test_tag_scalar_wrapped_into_list() {
        let source = "@tag(task='classification', subtask=['binary', 'multi-class'])\nclass M:\n    pass\n";
        let mut tags = IndexMap::new();
        with_decorators(source, |node, src| tags.extend(parse_tags(node, src)));

        assert_eq!(
            tags["task"],
            vec![LiteralValue::str("classification")],
            "scalar tag should be wrapped"
        );
        assert_eq!(
            tags["subtask"],
            vec![LiteralValue::str("binary"), LiteralValue::str("multi-class")],
            "list tag should be preserved verbatim"
        );
    }

    #[test]
    fn test_tag_parser_ignores_other_calls() {
        let source = "@register(name='x')\nclass M:\n    pass\n";
        let mut tags = IndexMap::new();
        with_decorators(source, |node, src| tags.extend(parse_tags(node, src)));
        assert!(tags.is_empty());
    }
}
