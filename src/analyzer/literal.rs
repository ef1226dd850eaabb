//! Partial evaluator for decorator literal expressions.
//!
//! Operates directly on tree-sitter-python nodes and never executes source
//! code. Only the literal subset the decorator grammar actually uses is
//! evaluated; everything else degrades to a sentinel string instead of
//! failing the extraction.

use tree_sitter::Node;

use crate::schema::value::{
    LiteralValue, FUNCTION_SENTINEL, LAMBDA_SENTINEL, UNSUPPORTED_SENTINEL,
};

/// Identifiers that stand for a primitive type (plus the transform
/// composition utility) rather than a runtime value.
const TYPE_IDENTIFIERS: &[&str] = &["float", "int", "str", "bool", "Compose"];

/// Evaluate a syntax node to its native value.
///
/// Unrecognized shapes never raise; they come back as `"<function>"`,
/// `"<lambda>"` or `"<unsupported>"` so that one odd decorator cannot abort
/// a whole catalog run.
pub fn evaluate(node: Node<'_>, source: &[u8]) -> LiteralValue {
    match node.kind() {
        "integer" => eval_integer(node_text(node, source)),
        "float" => node_text(node, source)
            .parse::<f64>()
            .map(LiteralValue::Float)
            .unwrap_or(LiteralValue::Opaque(UNSUPPORTED_SENTINEL)),
        "string" => eval_string(node, source),
        "concatenated_string" => eval_concatenated(node, source),
        "true" => LiteralValue::Bool(true),
        "false" => LiteralValue::Bool(false),
        "none" => LiteralValue::None,
        "tuple" => LiteralValue::Tuple(eval_elements(node, source)),
        "list" => LiteralValue::List(eval_elements(node, source)),
        "dictionary" => eval_dictionary(node, source),
        "identifier" => eval_name(node_text(node, source)),
        "call" => eval_call(node, source),
        "lambda" => LiteralValue::Opaque(LAMBDA_SENTINEL),
        "unary_operator" => eval_unary(node, source),
        "not_operator" => child_or_unsupported(node.child_by_field_name("argument"), source),
        "parenthesized_expression" => child_or_unsupported(node.named_child(0), source),
        _ => LiteralValue::Opaque(UNSUPPORTED_SENTINEL),
    }
}

fn child_or_unsupported(node: Option<Node<'_>>, source: &[u8]) -> LiteralValue {
    node.map(|n| evaluate(n, source))
        .unwrap_or(LiteralValue::Opaque(UNSUPPORTED_SENTINEL))
}

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn eval_integer(text: &str) -> LiteralValue {
    let cleaned = text.replace('_', "");
    let parsed = if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else if let Some(oct) = cleaned.strip_prefix("0o").or_else(|| cleaned.strip_prefix("0O")) {
        i64::from_str_radix(oct, 8)
    } else if let Some(bin) = cleaned.strip_prefix("0b").or_else(|| cleaned.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2)
    } else {
        cleaned.parse::<i64>()
    };
    match parsed {
        Ok(i) => LiteralValue::Int(i),
        // Integers beyond i64 are kept with float precision loss rather
        // than dropped.
        Err(_) => cleaned
            .parse::<f64>()
            .map(LiteralValue::Float)
            .unwrap_or(LiteralValue::Opaque(UNSUPPORTED_SENTINEL)),
    }
}

fn eval_string(node: Node<'_>, source: &[u8]) -> LiteralValue {
    let mut out = String::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "string_content" => out.push_str(node_text(child, source)),
            "escape_sequence" => out.push_str(&unescape(node_text(child, source))),
            // f-string interpolation needs runtime state; refuse it.
            "interpolation" => return LiteralValue::Opaque(UNSUPPORTED_SENTINEL),
            _ => {}
        }
    }
    LiteralValue::Str(out)
}

fn eval_concatenated(node: Node<'_>, source: &[u8]) -> LiteralValue {
    let mut out = String::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match eval_string(child, source) {
            LiteralValue::Str(s) => out.push_str(&s),
            other => return other,
        }
    }
    LiteralValue::Str(out)
}

fn unescape(seq: &str) -> String {
    let mut chars = seq.chars();
    if chars.next() != Some('\\') {
        return seq.to_string();
    }
    match chars.next() {
        Some('n') => "\n".to_string(),
        Some('t') => "\t".to_string(),
        Some('r') => "\r".to_string(),
        Some('0') => "\0".to_string(),
        Some(c) => c.to_string(),
        None => String::new(),
    }
}

fn eval_elements(node: Node<'_>, source: &[u8]) -> Vec<LiteralValue> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| evaluate(c, source))
        .collect()
}

fn eval_dictionary(node: Node<'_>, source: &[u8]) -> LiteralValue {
    let mut pairs = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "pair" {
            continue;
        }
        let (Some(key), Some(value)) = (
            child.child_by_field_name("key"),
            child.child_by_field_name("value"),
        ) else {
            continue;
        };
        pairs.push((evaluate(key, source), evaluate(value, source)));
    }
    LiteralValue::Dict(pairs)
}

fn eval_name(name: &str) -> LiteralValue {
    // `None`/`True`/`False` arrive as their own node kinds, so any
    // identifier here is either a whitelisted type name or an opaque
    // symbolic reference kept verbatim.
    if TYPE_IDENTIFIERS.contains(&name) {
        LiteralValue::type_ref(name)
    } else {
        LiteralValue::Symbol(name.to_string())
    }
}

fn eval_call(node: Node<'_>, source: &[u8]) -> LiteralValue {
    let Some(function) = node.child_by_field_name("function") else {
        return LiteralValue::Opaque(FUNCTION_SENTINEL);
    };
    if function.kind() != "identifier" {
        return LiteralValue::Opaque(FUNCTION_SENTINEL);
    }
    let name = node_text(function, source);
    let args = positional_args(node, source);

    match name {
        "int" | "float" | "str" | "bool" => convert_primitive(name, args),
        // `type(x)` names the runtime type of its argument. The original
        // produced a live type object here; a type name serializes the same.
        "type" if args.len() == 1 => LiteralValue::type_ref(args[0].runtime_type_name()),
        _ => LiteralValue::Opaque(FUNCTION_SENTINEL),
    }
}

fn positional_args(call: Node<'_>, source: &[u8]) -> Vec<LiteralValue> {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|c| !matches!(c.kind(), "keyword_argument" | "comment"))
        .map(|c| evaluate(c, source))
        .collect()
}

fn convert_primitive(name: &str, args: Vec<LiteralValue>) -> LiteralValue {
    if args.len() > 1 {
        return LiteralValue::Opaque(FUNCTION_SENTINEL);
    }
    let arg = args.into_iter().next();
    match name {
        "int" => match arg {
            None => LiteralValue::Int(0),
            Some(LiteralValue::Int(i)) => LiteralValue::Int(i),
            Some(LiteralValue::Float(f)) => LiteralValue::Int(f.trunc() as i64),
            Some(LiteralValue::Bool(b)) => LiteralValue::Int(i64::from(b)),
            Some(LiteralValue::Str(s)) => s
                .trim()
                .parse::<i64>()
                .map(LiteralValue::Int)
                .unwrap_or(LiteralValue::Opaque(UNSUPPORTED_SENTINEL)),
            Some(_) => LiteralValue::Opaque(UNSUPPORTED_SENTINEL),
        },
        "float" => match arg {
            None => LiteralValue::Float(0.0),
            Some(LiteralValue::Int(i)) => LiteralValue::Float(i as f64),
            Some(LiteralValue::Float(f)) => LiteralValue::Float(f),
            Some(LiteralValue::Bool(b)) => LiteralValue::Float(if b { 1.0 } else { 0.0 }),
            Some(LiteralValue::Str(s)) => s
                .trim()
                .parse::<f64>()
                .map(LiteralValue::Float)
                .unwrap_or(LiteralValue::Opaque(UNSUPPORTED_SENTINEL)),
            Some(_) => LiteralValue::Opaque(UNSUPPORTED_SENTINEL),
        },
        "str" => LiteralValue::Str(arg.map(|v| v.py_str()).unwrap_or_default()),
        "bool" => LiteralValue::Bool(match arg {
            None | Some(LiteralValue::None) => false,
            Some(LiteralValue::Bool(b)) => b,
            Some(LiteralValue::Int(i)) => i != 0,
            Some(LiteralValue::Float(f)) => f != 0.0,
            Some(LiteralValue::Str(s)) => !s.is_empty(),
            Some(LiteralValue::Tuple(v)) | Some(LiteralValue::List(v)) => !v.is_empty(),
            Some(LiteralValue::Dict(p)) => !p.is_empty(),
            Some(_) => true,
        }),
        _ => LiteralValue::Opaque(FUNCTION_SENTINEL),
    }
}

fn eval_unary(node: Node<'_>, source: &[u8]) -> LiteralValue {
    let operand = child_or_unsupported(node.child_by_field_name("argument"), source);
    let operator = node.child(0).map(|c| c.kind()).unwrap_or("");
    if operator != "-" {
        return operand;
    }
    match operand {
        LiteralValue::Int(i) => LiteralValue::Int(-i),
        LiteralValue::Float(f) => LiteralValue::Float(-f),
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tree_sitter::Parser;

    /// Parse `expr` as a standalone expression statement and evaluate it.
    pub(crate) fn eval_expr(expr: &str) -> LiteralValue {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("python grammar loads");
        let tree = parser.parse(expr, None).expect("expression parses");
        let statement = tree.root_node().named_child(0).expect("one statement");
        assert_eq!(statement.kind(), "expression_statement");
        let node = statement.named_child(0).expect("one expression");
        evaluate(node, expr.as_bytes())
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval_expr("5"), LiteralValue::Int(5));
        assert_eq!(eval_expr("1_000"), LiteralValue::Int(1000));
        assert_eq!(eval_expr("0xff"), LiteralValue::Int(255));
        assert_eq!(eval_expr("0.5"), LiteralValue::Float(0.5));
        assert_eq!(eval_expr("True"), LiteralValue::Bool(true));
        assert_eq!(eval_expr("False"), LiteralValue::Bool(false));
        assert_eq!(eval_expr("None"), LiteralValue::None);
        assert_eq!(eval_expr("'cpu'"), LiteralValue::str("cpu"));
        assert_eq!(eval_expr("\"val_loss\""), LiteralValue::str("val_loss"));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(eval_expr(r"'a\'b'"), LiteralValue::str("a'b"));
        assert_eq!(eval_expr(r"'x\ny'"), LiteralValue::str("x\ny"));
    }

    #[test]
    fn test_containers_recursive() {
        assert_eq!(
            eval_expr("(0, 10)"),
            LiteralValue::Tuple(vec![LiteralValue::Int(0), LiteralValue::Int(10)])
        );
        assert_eq!(
            eval_expr("['a', 'b']"),
            LiteralValue::list_of_strs(&["a", "b"])
        );
        assert_eq!(
            eval_expr("{1: 'x', 'k': [2]}"),
            LiteralValue::Dict(vec![
                (LiteralValue::Int(1), LiteralValue::str("x")),
                (
                    LiteralValue::str("k"),
                    LiteralValue::List(vec![LiteralValue::Int(2)])
                ),
            ])
        );
    }

    #[test]
    fn test_bare_names() {
        assert_eq!(eval_expr("int"), LiteralValue::type_ref("int"));
        assert_eq!(eval_expr("Compose"), LiteralValue::type_ref("Compose"));
        assert_eq!(
            eval_expr("SOME_CONSTANT"),
            LiteralValue::Symbol("SOME_CONSTANT".into())
        );
    }

    #[test]
    fn test_primitive_constructor_calls() {
        assert_eq!(eval_expr("int('5')"), LiteralValue::Int(5));
        assert_eq!(eval_expr("float(1)"), LiteralValue::Float(1.0));
        assert_eq!(eval_expr("float('inf')"), LiteralValue::Float(f64::INFINITY));
        assert_eq!(eval_expr("str(10)"), LiteralValue::str("10"));
        assert_eq!(eval_expr("bool(0)"), LiteralValue::Bool(false));
    }

    #[test]
    fn test_type_call_names_runtime_type() {
        assert_eq!(eval_expr("type(None)"), LiteralValue::type_ref("NoneType"));
        assert_eq!(eval_expr("type(5)"), LiteralValue::type_ref("int"));
        assert_eq!(eval_expr("type('x')"), LiteralValue::type_ref("str"));
    }

    #[test]
    fn test_unknown_calls_degrade() {
        assert_eq!(
            eval_expr("torch.zeros(3)"),
            LiteralValue::Opaque(FUNCTION_SENTINEL)
        );
        assert_eq!(
            eval_expr("make_default()"),
            LiteralValue::Opaque(FUNCTION_SENTINEL)
        );
    }

    #[test]
    fn test_lambda_is_never_executed() {
        assert_eq!(
            eval_expr("lambda x: x + 1"),
            LiteralValue::Opaque(LAMBDA_SENTINEL)
        );
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(eval_expr("-1"), LiteralValue::Int(-1));
        assert_eq!(eval_expr("-0.5"), LiteralValue::Float(-0.5));
        assert_eq!(eval_expr("+3"), LiteralValue::Int(3));
        assert_eq!(eval_expr("~7"), LiteralValue::Int(7));
    }

    #[test]
    fn test_unsupported_shapes() {
        assert_eq!(
            eval_expr("a if b else c"),
            LiteralValue::Opaque(UNSUPPORTED_SENTINEL)
        );
        assert_eq!(
            eval_expr("f'{x}'"),
            LiteralValue::Opaque(UNSUPPORTED_SENTINEL)
        );
    }

    #[test]
    fn test_evaluation_is_idempotent_for_literals() {
        // Re-parsing the repr of an evaluated literal gives the same value.
        for expr in ["(0, 10)", "['a', 'b']", "1.5", "-2", "None", "True"] {
            let first = eval_expr(expr);
            let second = eval_expr(&first.py_repr());
            assert_eq!(first, second, "round trip differs for {expr}");
        }
    }
}
