//! Catalog generation pipeline.
//!
//! Runs every schema source in a fixed order and assembles the output
//! file. The order is load-bearing: the frontend renders the catalog
//! top to bottom, so sections land exactly where the builder puts them.

use std::path::PathBuf;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::info;

use crate::analyzer::SourceTreeSource;
use crate::catalog::{CatalogBuilder, CatalogWriteError};
use crate::config::ChoicegenConfig;
use crate::device;
use crate::registry::manifests;
use crate::schema::{ExtractError, LiteralValue, ParameterSchema, SchemaSource};

/// Component categories scanned from the local source tree, in output order.
pub const CATEGORIES: &[&str] = &[
    "models",
    "preprocessing",
    "datasets",
    "augmentations",
    "metrics",
    "losses",
    "early_stopping",
    "postprocessing",
];

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to extract {source_desc}: {source}")]
    Extract {
        source_desc: String,
        #[source]
        source: ExtractError,
    },
    #[error(transparent)]
    Write(#[from] CatalogWriteError),
}

/// Run the full pipeline and return the path of the written catalog.
pub fn generate(config: &ChoicegenConfig) -> Result<PathBuf, GenerateError> {
    // A missing root would silently produce a catalog with no local
    // components at all; treat it as fatal instead.
    if !config.source_root.exists() {
        return Err(root_error(config, ExtractError::RootNotFound(config.source_root.clone())));
    }
    if !config.source_root.is_dir() {
        return Err(root_error(config, ExtractError::NotADirectory(config.source_root.clone())));
    }

    let mut builder = CatalogBuilder::new();

    builder.insert_scalar(
        "load_from_checkpoint",
        ParameterSchema::typed("bool", LiteralValue::Bool(false)),
    );

    for category in CATEGORIES {
        let source = SourceTreeSource::new(*category, config.source_root.join(category));
        for extracted in run_source(&source)? {
            for tags in &extracted.tags {
                builder.add_tags(category, tags);
            }
            if !extracted.classes.is_empty() {
                builder.merge_file(category, &extracted.key, extracted.classes);
            }
        }
    }

    // The tag index sits between the local categories and the library
    // merges regardless of how late tags were recorded.
    builder.commit_tags();

    for (category, registry) in manifests::bindings() {
        for extracted in run_source(&registry)? {
            builder.merge_library(category, &extracted.key, extracted.classes);
        }
    }

    builder.insert_scalar(
        "batch_size",
        ParameterSchema::typed("int", LiteralValue::Int(1)).with_range("(1, 1024)"),
    );
    builder.insert_scalar(
        "monitor",
        ParameterSchema::typed("str", LiteralValue::str("val_loss"))
            .with_options("['train_loss', 'val_loss']"),
    );
    builder.insert_group(
        "data_splits",
        IndexMap::from([
            (
                "k".to_string(),
                ParameterSchema::typed("int", LiteralValue::Int(5)).with_range("(1, 20)"),
            ),
            ("random_seed".to_string(), ParameterSchema::typed_only("int")),
        ]),
    );
    builder.insert_scalar(
        "model_save_path",
        ParameterSchema::typed("str", LiteralValue::str("zoo/ckpts/")),
    );
    builder.insert_scalar(
        "tensorboard_log_path",
        ParameterSchema::typed("str", LiteralValue::str("zoo/logs")),
    );
    builder.insert_scalar(
        "progress_path",
        ParameterSchema::typed("str", LiteralValue::str("zoo/ckpts/progress.json")),
    );
    builder.insert_scalar("training_name", ParameterSchema::typed_only("str"));
    builder.insert_scalar("device", device::device_choices());

    let catalog = builder.finish();
    catalog.write_to(&config.output_path)?;
    info!(output = %config.output_path.display(), "catalog written");

    Ok(config.output_path.clone())
}

fn root_error(config: &ChoicegenConfig, source: ExtractError) -> GenerateError {
    GenerateError::Extract {
        source_desc: format!("source tree at {}", config.source_root.display()),
        source,
    }
}

fn run_source(
    source: &impl SchemaSource,
) -> Result<Vec<crate::schema::ExtractedSource>, GenerateError> {
    source.extract().map_err(|err| GenerateError::Extract {
        source_desc: source.describe(),
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_in_render_order() {
        assert_eq!(CATEGORIES.first(), Some(&"models"));
        assert_eq!(CATEGORIES.last(), Some(&"postprocessing"));
        assert_eq!(CATEGORIES.len(), 8);
    }
}
