//! Catalog schema data structures
//!
//! This module defines the shared vocabulary of both extraction pipelines:
//! the per-parameter schema entry, the per-class and per-source collections,
//! the tag sets declared on wrapped classes, and the `SchemaSource` seam that
//! keeps the catalog merger agnostic of where a class entry came from.

use std::io;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

pub mod value;

pub use value::{LiteralValue, FUNCTION_SENTINEL, LAMBDA_SENTINEL, UNSUPPORTED_SENTINEL};

/// One constructor parameter's schema entry.
///
/// Exactly one of `range`/`options` is ever present (the decorator grammar
/// does not declare both, and Literal-typed library parameters only produce
/// `options`). `range` and `options` are stored pre-stringified in Python
/// `str()` form, e.g. `"(1, 1024)"` or `"['train_loss', 'val_loss']"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_desc: Option<LiteralValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<LiteralValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl ParameterSchema {
    /// A typed entry with a default, the common scalar-config shape.
    pub fn typed(type_name: &str, default: LiteralValue) -> Self {
        ParameterSchema {
            type_desc: Some(LiteralValue::type_ref(type_name)),
            default: Some(default),
            ..Default::default()
        }
    }

    /// A typed entry with no default (the UI requires the user to fill it).
    pub fn typed_only(type_name: &str) -> Self {
        ParameterSchema {
            type_desc: Some(LiteralValue::type_ref(type_name)),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: &str) -> Self {
        self.range = Some(range.to_string());
        self
    }

    pub fn with_options(mut self, options: &str) -> Self {
        self.options = Some(options.to_string());
        self
    }
}

/// Parameter name -> schema, insertion order = declaration order.
pub type ClassSchema = IndexMap<String, ParameterSchema>;

/// Class name -> parameter table for one source (file or library module).
pub type ClassSchemaMap = IndexMap<String, ClassSchema>;

/// Semantic tags declared on one wrapped class, qualified by the file stem
/// that defined it. Tag values are always lists, even when declared scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassTags {
    pub class_name: String,
    pub source: String,
    pub tags: IndexMap<String, Vec<LiteralValue>>,
}

impl ClassTags {
    /// `"<filename>>ClassName"` provenance reference used by the tag index.
    pub fn qualified_ref(&self) -> String {
        format!("{}>{}", self.source, self.class_name)
    }
}

/// One extracted source unit: a local file (keyed by its stem) or a library
/// module (keyed by its `>`-joined path).
#[derive(Debug, Clone)]
pub struct ExtractedSource {
    pub key: String,
    pub classes: ClassSchemaMap,
    pub tags: Vec<ClassTags>,
}

/// Anything that can contribute class entries to the catalog.
///
/// The static source analyzer and the library registry inspector both
/// implement this, so the merge stage never needs to know whether an entry
/// was parsed out of a decorator or declared in a manifest.
pub trait SchemaSource {
    /// Human-readable identity for diagnostics.
    fn describe(&self) -> String;

    fn extract(&self) -> Result<Vec<ExtractedSource>, ExtractError>;
}

/// Fatal extraction failures. Everything recoverable (odd AST shapes,
/// unresolvable hints) degrades in place instead of surfacing here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("source root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("source root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read {path}: {source}")]
    FileRead { path: PathBuf, source: io::Error },

    #[error("malformed syntax tree in {0}")]
    MalformedSource(PathBuf),

    #[error("parser initialization failed: {0}")]
    ParserInit(String),
}
