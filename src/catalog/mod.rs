//! Catalog assembly and JSON output.
//!
//! A catalog is an ordered map of top-level entries. Entry order is
//! insertion order, which is why everything funnels through
//! [`CatalogBuilder`]: the builder decides when each section lands.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::schema::{ClassSchemaMap, ClassTags, ParameterSchema};

/// One top-level catalog value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// A single configurable field, e.g. `batch_size`.
    Scalar(ParameterSchema),
    /// A named group of fields, e.g. `data_splits`.
    Group(IndexMap<String, ParameterSchema>),
    /// A component category keyed by file stem or library qualifier.
    Category(CategoryMap),
    /// The tag index.
    Tags(TagIndex),
}

/// file stem (or qualifier) -> class name -> parameter table.
pub type CategoryMap = IndexMap<String, ClassSchemaMap>;

/// Standard tag keys seeded for every category that carries tags.
pub const STANDARD_TAG_KEYS: &[&str] = &["task", "subtask", "modality", "submodality"];

/// category -> tag key -> tag value -> sorted set of `file>Class` refs.
///
/// The leaf is a `BTreeSet` so references serialize as a stable, sorted,
/// duplicate-free JSON array.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TagIndex {
    categories: IndexMap<String, IndexMap<String, IndexMap<String, BTreeSet<String>>>>,
}

impl TagIndex {
    pub fn add(&mut self, category: &str, key: &str, value: String, reference: String) {
        // The standard keys appear in the output (even when empty) for any
        // category that carries at least one tag.
        let keys = self.categories.entry(category.to_string()).or_default();
        if keys.is_empty() {
            for standard in STANDARD_TAG_KEYS {
                keys.entry((*standard).to_string()).or_default();
            }
        }
        keys.entry(key.to_string())
            .or_default()
            .entry(value)
            .or_default()
            .insert(reference);
    }

    pub fn refs(&self, category: &str, key: &str, value: &str) -> Option<&BTreeSet<String>> {
        self.categories.get(category)?.get(key)?.get(value)
    }
}

/// Accumulates entries in output order and produces the final [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: IndexMap<String, CatalogEntry>,
    tags: TagIndex,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, key: &str, schema: ParameterSchema) {
        self.entries
            .insert(key.to_string(), CatalogEntry::Scalar(schema));
    }

    pub fn insert_group(&mut self, key: &str, group: IndexMap<String, ParameterSchema>) {
        self.entries
            .insert(key.to_string(), CatalogEntry::Group(group));
    }

    /// Add one analyzed source file to a category. A repeated file stem
    /// replaces the earlier entry.
    pub fn merge_file(&mut self, category: &str, file_key: &str, classes: ClassSchemaMap) {
        let map = self.category_mut(category);
        if map.contains_key(file_key) {
            warn!(category, file_key, "duplicate file stem, keeping the later one");
        }
        map.insert(file_key.to_string(), classes);
    }

    /// Record the tags declared by one class into the pending index.
    pub fn add_tags(&mut self, category: &str, tags: &ClassTags) {
        let reference = tags.qualified_ref();
        for (key, values) in &tags.tags {
            for value in values {
                self.tags
                    .add(category, key, value.py_str(), reference.clone());
            }
        }
    }

    /// Place the tag index at the current position in the entry order.
    pub fn commit_tags(&mut self) {
        self.entries.insert(
            "tags".to_string(),
            CatalogEntry::Tags(std::mem::take(&mut self.tags)),
        );
    }

    /// Merge library classes into a category under the module qualifier,
    /// namespacing each class key with the qualifier as well.
    pub fn merge_library(&mut self, category: &str, qualifier: &str, classes: ClassSchemaMap) {
        let mut namespaced = ClassSchemaMap::new();
        for (class_name, schema) in classes {
            namespaced.insert(format!("{qualifier}>{class_name}"), schema);
        }
        self.category_mut(category)
            .insert(qualifier.to_string(), namespaced);
    }

    fn category_mut(&mut self, category: &str) -> &mut CategoryMap {
        let entry = self
            .entries
            .entry(category.to_string())
            .or_insert_with(|| CatalogEntry::Category(CategoryMap::new()));
        match entry {
            CatalogEntry::Category(map) => map,
            other => {
                // Overwriting a non-category entry would be a wiring bug in
                // the generator, not bad input.
                unreachable!("entry {category:?} is not a category: {other:?}")
            }
        }
    }

    pub fn finish(self) -> Catalog {
        Catalog {
            entries: self.entries,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Write the catalog as pretty-printed JSON with four-space indentation.
    pub fn write_to(&self, path: &Path) -> Result<(), CatalogWriteError> {
        let file = File::create(path).map_err(|source| CatalogWriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)?;
        writer.flush().map_err(|source| CatalogWriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Error)]
pub enum CatalogWriteError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}
