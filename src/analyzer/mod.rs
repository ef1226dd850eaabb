//! Static source analyzer
//!
//! Walks one category directory of the zoo's source tree, parses every
//! Python wrapper file with tree-sitter (no code is executed), and produces
//! one `ExtractedSource` per file, keyed by the file stem. Files are
//! independent; ordering across files never affects correctness.

pub mod decorators;
pub mod literal;
pub mod parser;

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::schema::{ExtractError, ExtractedSource, SchemaSource};

/// Directory names excluded from the walk.
const IGNORED_DIRS: &[&str] = &[r"^\.ipynb_checkpoints$", r"^__pycache__$"];

/// `SchemaSource` over one category directory of wrapper files.
pub struct SourceTreeSource {
    category: String,
    dir: PathBuf,
}

impl SourceTreeSource {
    pub fn new(category: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            category: category.into(),
            dir: dir.into(),
        }
    }

    fn ignored(path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };
        IGNORED_DIRS.iter().any(|pattern| {
            Regex::new(pattern)
                .map(|re| re.is_match(&name))
                .unwrap_or(false)
        })
    }
}

impl SchemaSource for SourceTreeSource {
    fn describe(&self) -> String {
        format!("source tree {} ({})", self.category, self.dir.display())
    }

    fn extract(&self) -> Result<Vec<ExtractedSource>, ExtractError> {
        // A category with no local wrappers yet is not an error; the
        // catalog simply omits it (or fills it from a library merge).
        if !self.dir.is_dir() {
            debug!(category = %self.category, dir = %self.dir.display(), "category directory absent, skipping");
            return Ok(Vec::new());
        }

        let mut parser = parser::python_parser()?;
        let mut sources: Vec<ExtractedSource> = Vec::new();

        let walker = WalkDir::new(&self.dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && Self::ignored(e.path())));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(category = %self.category, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("py") {
                continue;
            }

            let parsed = parser::parse_file(&mut parser, path)?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            debug!(
                category = %self.category,
                file = %path.display(),
                classes = parsed.classes.len(),
                "parsed wrapper file"
            );

            // Two files sharing a stem within a category would collide in
            // the catalog; keep the later one but make it visible.
            if let Some(existing) = sources.iter_mut().find(|s| s.key == stem) {
                warn!(
                    category = %self.category,
                    stem = %stem,
                    "duplicate file stem, later file replaces earlier entries"
                );
                existing.classes = parsed.classes;
                existing.tags = parsed.tags;
                continue;
            }

            sources.push(ExtractedSource {
                key: stem,
                classes: parsed.classes,
                tags: parsed.tags,
            });
        }

        Ok(sources)
    }
}
