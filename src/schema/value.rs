//! Literal values recovered from decorator expressions or registered as
//! library defaults.
//!
//! `LiteralValue` is the common value domain of both extraction pipelines.
//! It distinguishes provenance (a string literal vs. a bare identifier vs. a
//! primitive-type reference) while rendering identically where the catalog
//! format demands it: `py_repr`/`py_str` mirror Python's `repr()`/`str()` so
//! stringified ranges and option lists look exactly like the ones the
//! downstream UI already parses.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Sentinel for call expressions the evaluator refuses to execute.
pub const FUNCTION_SENTINEL: &str = "<function>";
/// Sentinel for lambda expressions (never compiled; the static pass executes nothing).
pub const LAMBDA_SENTINEL: &str = "<lambda>";
/// Sentinel for syntax shapes outside the supported literal subset.
pub const UNSUPPORTED_SENTINEL: &str = "<unsupported>";

/// A JSON-compatible literal, plus the symbolic shapes decorator parsing
/// produces that plain JSON cannot distinguish.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<LiteralValue>),
    List(Vec<LiteralValue>),
    /// Keys are evaluated recursively and need not be strings; they are
    /// coerced to strings at serialization time.
    Dict(Vec<(LiteralValue, LiteralValue)>),
    /// A bare identifier kept verbatim as an opaque symbolic reference,
    /// e.g. a constant name the wrapper file imports.
    Symbol(String),
    /// A reference to a whitelisted primitive-type identifier (`int`,
    /// `float`, `str`, `bool`, `Compose`) or a runtime type name produced
    /// by a `type(...)` call.
    TypeRef(String),
    /// A degraded construct: `<function>`, `<lambda>` or `<unsupported>`.
    Opaque(&'static str),
}

impl LiteralValue {
    pub fn str(s: impl Into<String>) -> Self {
        LiteralValue::Str(s.into())
    }

    pub fn type_ref(s: impl Into<String>) -> Self {
        LiteralValue::TypeRef(s.into())
    }

    pub fn list_of_strs(items: &[&str]) -> Self {
        LiteralValue::List(items.iter().map(|s| LiteralValue::str(*s)).collect())
    }

    /// Python `repr()` rendering, used for elements nested inside
    /// stringified containers.
    pub fn py_repr(&self) -> String {
        match self {
            LiteralValue::None => "None".to_string(),
            LiteralValue::Bool(true) => "True".to_string(),
            LiteralValue::Bool(false) => "False".to_string(),
            LiteralValue::Int(i) => i.to_string(),
            LiteralValue::Float(f) => format_float(*f),
            LiteralValue::Str(s) | LiteralValue::Symbol(s) | LiteralValue::TypeRef(s) => {
                quote_single(s)
            }
            LiteralValue::Tuple(items) => match items.len() {
                0 => "()".to_string(),
                1 => format!("({},)", items[0].py_repr()),
                _ => format!("({})", join_reprs(items)),
            },
            LiteralValue::List(items) => format!("[{}]", join_reprs(items)),
            LiteralValue::Dict(pairs) => {
                let body = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.py_repr(), v.py_repr()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{body}}}")
            }
            LiteralValue::Opaque(s) => (*s).to_string(),
        }
    }

    /// Python `str()` rendering: top-level strings lose their quotes,
    /// everything else falls back to `py_repr`. This is what the catalog
    /// uses to stringify `range` and `options`.
    pub fn py_str(&self) -> String {
        match self {
            LiteralValue::Str(s) | LiteralValue::Symbol(s) | LiteralValue::TypeRef(s) => s.clone(),
            LiteralValue::Opaque(s) => (*s).to_string(),
            other => other.py_repr(),
        }
    }

    /// The name a default's runtime type reports, for hint-less type
    /// inference in the library inspector.
    pub fn runtime_type_name(&self) -> &'static str {
        match self {
            LiteralValue::None => "NoneType",
            LiteralValue::Bool(_) => "bool",
            LiteralValue::Int(_) => "int",
            LiteralValue::Float(_) => "float",
            LiteralValue::Str(_) | LiteralValue::Symbol(_) | LiteralValue::TypeRef(_) => "str",
            LiteralValue::Tuple(_) => "tuple",
            LiteralValue::List(_) => "list",
            LiteralValue::Dict(_) => "dict",
            LiteralValue::Opaque(_) => "str",
        }
    }

    /// True when the value came out of the evaluator as a degraded sentinel.
    pub fn is_opaque(&self) -> bool {
        matches!(self, LiteralValue::Opaque(_))
    }
}

fn join_reprs(items: &[LiteralValue]) -> String {
    items
        .iter()
        .map(LiteralValue::py_repr)
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote_single(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// Serialization doubles as the JSON sanitizer: tuples become arrays,
/// non-string dict keys are coerced to strings, and symbolic leaves fall
/// back to their string form. It can never fail on a value this enum holds.
impl Serialize for LiteralValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LiteralValue::None => serializer.serialize_unit(),
            LiteralValue::Bool(b) => serializer.serialize_bool(*b),
            LiteralValue::Int(i) => serializer.serialize_i64(*i),
            LiteralValue::Float(f) => serializer.serialize_f64(*f),
            LiteralValue::Str(s) | LiteralValue::Symbol(s) | LiteralValue::TypeRef(s) => {
                serializer.serialize_str(s)
            }
            LiteralValue::Opaque(s) => serializer.serialize_str(s),
            LiteralValue::Tuple(items) | LiteralValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            LiteralValue::Dict(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(&k.py_str(), v)?;
                }
                map.end()
            }
        }
    }
}
