use clap::Parser;
use std::path::PathBuf;

/// Component catalog generator for the model/dataset/metric zoo
#[derive(Parser, Debug)]
#[command(
    name = "choicegen",
    about = "Generates the component catalog consumed by the training frontend",
    version,
    author,
    long_about = "choicegen statically analyzes the zoo's wrapper source tree for \
                  decorator-declared parameter constraints and semantic tags, merges \
                  in the registered library class manifests, and writes the combined \
                  catalog as a single JSON file.\n\n\
                  Examples:\n  \
                  choicegen\n  \
                  choicegen --source-root zoo/src -o zoo/choices.json\n  \
                  choicegen --log-level debug"
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Root of the component source tree (defaults to zoo/src)"
    )]
    pub source_root: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Where to write the generated catalog (defaults to zoo/choices.json)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_defaults() {
        let args = CliArgs::parse_from(["choicegen"]);
        assert!(args.source_root.is_none());
        assert!(args.output.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_parses_paths_and_level() {
        let args = CliArgs::parse_from([
            "choicegen",
            "--source-root",
            "/data/src",
            "-o",
            "/data/choices.json",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.source_root, Some(PathBuf::from("/data/src")));
        assert_eq!(args.output, Some(PathBuf::from("/data/choices.json")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["choicegen", "-v", "-q"]);
        assert!(result.is_err());
    }
}
