//! tree-sitter-python parsing and class discovery for wrapper files.
//!
//! A file maps to one `ClassSchemaMap`: every public top-level class is
//! recorded (with an empty parameter table when its constructor carries no
//! constraint decorator), plus the tag sets declared on decorated classes.

use std::fs;
use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::analyzer::decorators::{parse_constraints, parse_tags};
use crate::schema::{ClassSchemaMap, ClassTags, ExtractError};

/// Parsed wrapper file: class parameter tables plus per-class tags.
#[derive(Debug)]
pub struct ParsedFile {
    pub classes: ClassSchemaMap,
    pub tags: Vec<ClassTags>,
}

pub fn python_parser() -> Result<Parser, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ExtractError::ParserInit(e.to_string()))?;
    Ok(parser)
}

/// Read and parse one wrapper file.
pub fn parse_file(parser: &mut Parser, path: &Path) -> Result<ParsedFile, ExtractError> {
    let source = fs::read_to_string(path).map_err(|source| ExtractError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    parse_source(parser, &source, &stem, path)
}

/// Parse wrapper source text. `stem` qualifies tag references
/// (`"<stem>>ClassName"`); `path` only feeds diagnostics.
pub fn parse_source(
    parser: &mut Parser,
    source: &str,
    stem: &str,
    path: &Path,
) -> Result<ParsedFile, ExtractError> {
    let tree: Tree = parser
        .parse(source, None)
        .ok_or_else(|| ExtractError::MalformedSource(path.to_path_buf()))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ExtractError::MalformedSource(path.to_path_buf()));
    }

    let bytes = source.as_bytes();
    let mut classes = ClassSchemaMap::new();
    let mut tags = Vec::new();

    let mut cursor = root.walk();
    for item in root.named_children(&mut cursor) {
        let (class_node, class_decorators) = match item.kind() {
            "class_definition" => (item, Vec::new()),
            "decorated_definition" => {
                let Some(definition) = item.child_by_field_name("definition") else {
                    continue;
                };
                if definition.kind() != "class_definition" {
                    continue;
                }
                (definition, decorator_expressions(item))
            }
            _ => continue,
        };

        let Some(name_node) = class_node.child_by_field_name("name") else {
            continue;
        };
        let class_name = name_node.utf8_text(bytes).unwrap_or("").to_string();
        // Leading underscore marks private helpers and inline test cases.
        if class_name.is_empty() || class_name.starts_with('_') {
            continue;
        }

        let params = constructor_params(class_node, bytes);

        let mut class_tags = indexmap::IndexMap::new();
        for decorator in &class_decorators {
            class_tags.extend(parse_tags(*decorator, bytes));
        }
        if !class_tags.is_empty() {
            tags.push(ClassTags {
                class_name: class_name.clone(),
                source: stem.to_string(),
                tags: class_tags,
            });
        }

        classes.insert(class_name, params);
    }

    Ok(ParsedFile { classes, tags })
}

/// Collect the decorator expression nodes attached to a decorated definition.
fn decorator_expressions(decorated: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let mut cursor = decorated.walk();
    for child in decorated.children(&mut cursor) {
        if child.kind() == "decorator" {
            if let Some(expr) = child.named_child(0) {
                out.push(expr);
            }
        }
    }
    out
}

/// Run the constraint parser over every decorator on the class's `__init__`.
/// Later decorators overwrite earlier ones on key collision; decorators on
/// other methods are ignored.
fn constructor_params(class_node: Node<'_>, source: &[u8]) -> crate::schema::ClassSchema {
    let mut params = crate::schema::ClassSchema::new();
    let Some(body) = class_node.child_by_field_name("body") else {
        return params;
    };

    let mut cursor = body.walk();
    for item in body.named_children(&mut cursor) {
        let (function, decorators) = match item.kind() {
            "function_definition" => (item, Vec::new()),
            "decorated_definition" => {
                let Some(definition) = item.child_by_field_name("definition") else {
                    continue;
                };
                if definition.kind() != "function_definition" {
                    continue;
                }
                (definition, decorator_expressions(item))
            }
            _ => continue,
        };

        let name = function
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .unwrap_or("");
        if name != "__init__" {
            continue;
        }
        for decorator in decorators {
            params.extend(parse_constraints(decorator, source));
        }
    }
    params
}
