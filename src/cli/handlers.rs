//! CLI command handler.

use tracing::error;

use crate::cli::commands::CliArgs;
use crate::config::ChoicegenConfig;
use crate::generator;

/// Run a generation from parsed CLI arguments. Returns the process exit code.
pub fn handle_generate(args: &CliArgs) -> i32 {
    let mut config = ChoicegenConfig::default();
    if let Some(root) = &args.source_root {
        config.source_root = root.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        if !args.quiet {
            eprintln!("Error: {e}");
        }
        return 1;
    }

    match generator::generate(&config) {
        Ok(path) => {
            if !args.quiet {
                println!("Catalog written to {}", path.display());
            }
            0
        }
        Err(e) => {
            error!("generation failed: {e}");
            if !args.quiet {
                eprintln!("Error: {e}");
            }
            1
        }
    }
}
