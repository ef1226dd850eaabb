//! choicegen - component catalog generator for the model/dataset/metric zoo
//!
//! This library builds the `choices.json` catalog that the training frontend
//! renders as its configuration UI. It combines two kinds of sources:
//!
//! - **Static analysis**: wrapper files in the zoo's source tree are parsed
//!   (never executed) and their decorator-declared parameter constraints and
//!   semantic tags are extracted from the AST.
//! - **Library manifests**: curated third-party classes declare their
//!   constructor signatures in a registry, which is inspected the same way
//!   runtime reflection would inspect the live libraries.
//!
//! Both feed a single [`catalog::CatalogBuilder`] that controls the exact
//! order and namespacing of the output.
//!
//! # Example Usage
//!
//! ```no_run
//! use choicegen::config::ChoicegenConfig;
//! use choicegen::generator;
//!
//! fn build_catalog() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChoicegenConfig::default();
//!     config.validate()?;
//!     let written = generator::generate(&config)?;
//!     println!("catalog at {}", written.display());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`analyzer`]: tree-sitter based static analysis of wrapper files
//! - [`registry`]: library class manifests and signature inspection
//! - [`catalog`]: ordered catalog assembly and JSON output
//! - [`generator`]: the pipeline tying the sources together

// Public modules
pub mod analyzer;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod device;
pub mod generator;
pub mod registry;
pub mod schema;
pub mod util;

// Re-export key types for convenient access
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, TagIndex};
pub use config::{ChoicegenConfig, ConfigError};
pub use generator::{generate, GenerateError};
pub use schema::{
    ClassSchema, ClassSchemaMap, ClassTags, ExtractError, ExtractedSource, LiteralValue,
    ParameterSchema, SchemaSource,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_choicegen() {
        assert_eq!(NAME, "choicegen");
    }
}
