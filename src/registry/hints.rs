//! Type descriptors for registered library signatures.
//!
//! `TypeHint` is the registry's structured stand-in for a reflected
//! annotation; `format_type` renders it into the human-readable descriptor
//! string the catalog exposes, and `extract_params` turns a registered
//! parameter list into a `ClassSchema` with the same semantics the original
//! reflection pass had.

use crate::schema::{ClassSchema, LiteralValue, ParameterSchema};

/// A constructor parameter's registered type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeHint {
    /// A plain class, rendered as its bare name.
    Class(String),
    /// The `None` member of an Optional-style union.
    NoneType,
    /// A union; `None` members are dropped when rendering, so
    /// `Optional[float]` collapses to `"float"`.
    Union(Vec<TypeHint>),
    /// A restricted-choice annotation. Renders as `"str"`; the concrete
    /// choices surface through the parameter's `options` field instead.
    Literal(Vec<LiteralValue>),
    /// A parametrized generic, rendered `origin[args...]`.
    Generic {
        origin: String,
        args: Vec<TypeHint>,
    },
}

impl TypeHint {
    pub fn class(name: impl Into<String>) -> Self {
        TypeHint::Class(name.into())
    }

    pub fn int() -> Self {
        TypeHint::class("int")
    }

    pub fn float() -> Self {
        TypeHint::class("float")
    }

    pub fn string() -> Self {
        TypeHint::class("str")
    }

    pub fn boolean() -> Self {
        TypeHint::class("bool")
    }

    pub fn optional(inner: TypeHint) -> Self {
        TypeHint::Union(vec![inner, TypeHint::NoneType])
    }

    pub fn union(members: impl IntoIterator<Item = TypeHint>) -> Self {
        TypeHint::Union(members.into_iter().collect())
    }

    pub fn literal_strs(choices: &[&str]) -> Self {
        TypeHint::Literal(choices.iter().map(|c| LiteralValue::str(*c)).collect())
    }

    pub fn generic(origin: impl Into<String>, args: impl IntoIterator<Item = TypeHint>) -> Self {
        TypeHint::Generic {
            origin: origin.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn list_of(inner: TypeHint) -> Self {
        TypeHint::generic("list", [inner])
    }

    pub fn tuple_of(args: impl IntoIterator<Item = TypeHint>) -> Self {
        TypeHint::generic("tuple", args)
    }
}

/// Render a type hint into the catalog's descriptor string.
pub fn format_type(hint: &TypeHint) -> String {
    match hint {
        TypeHint::Class(name) => name.clone(),
        TypeHint::NoneType => "NoneType".to_string(),
        TypeHint::Union(members) => {
            let parts: Vec<String> = members
                .iter()
                .filter(|m| !matches!(m, TypeHint::NoneType))
                .map(format_type)
                .collect();
            if parts.is_empty() {
                "NoneType".to_string()
            } else {
                parts.join(", ")
            }
        }
        TypeHint::Literal(_) => "str".to_string(),
        TypeHint::Generic { origin, args } => {
            let rendered: Vec<String> = args.iter().map(format_type).collect();
            format!("{}[{}]", origin, rendered.join(", "))
        }
    }
}

/// A registered constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub hint: Option<TypeHint>,
    pub default: Option<LiteralValue>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: None,
            default: None,
        }
    }

    pub fn hint(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn default_value(mut self, value: LiteralValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// Build the schema for one registered parameter list.
///
/// Skips `self` and any parameter literally named `optimizer` (scheduler
/// constructors take a live optimizer instance, which has no meaningful
/// static default and must not become a configurable field). Hint-less
/// parameters fall back to type inference from the default's runtime type,
/// with a default of exactly `0` reported as the ambiguous `"int, float"`
/// and no-default parameters marked `"unknown"`.
pub fn extract_params(params: &[Param]) -> ClassSchema {
    let mut schema = ClassSchema::new();
    for param in params {
        if param.name == "self" || param.name == "optimizer" {
            continue;
        }

        let type_desc = match &param.hint {
            Some(hint) => format_type(hint),
            None => match &param.default {
                Some(LiteralValue::Int(0)) => "int, float".to_string(),
                Some(LiteralValue::Float(f)) if *f == 0.0 => "int, float".to_string(),
                Some(value) => value.runtime_type_name().to_string(),
                None => "unknown".to_string(),
            },
        };

        let options = match &param.hint {
            Some(TypeHint::Literal(choices)) => {
                Some(LiteralValue::List(choices.clone()).py_str())
            }
            _ => None,
        };

        schema.insert(
            param.name.clone(),
            ParameterSchema {
                type_desc: Some(LiteralValue::type_ref(type_desc)),
                // Library entries always carry a default key; JSON null
                // marks a required parameter.
                default: Some(param.default.clone().unwrap_or(LiteralValue::None)),
                range: None,
                options,
            },
        );
    }
    schema
}
