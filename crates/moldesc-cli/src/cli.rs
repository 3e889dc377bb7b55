use clap::{Args, Parser, Subcommand, ValueEnum};
use moldesc::descriptor::engines::Backend;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "moldesc - compute named molecular descriptors for every molecule of an SD file.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Descriptor engine to resolve names with and compute on
    #[arg(short, long, global = true, value_enum, default_value_t = BackendKind::Cdk)]
    pub backend: BackendKind,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute descriptors for every molecule of an SD file.
    Compute(ComputeArgs),
    /// Print every descriptor the engine knows, with its description and value names.
    Catalog(CatalogArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cdk,
    Joelib,
}

impl From<BackendKind> for Backend {
    fn from(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Cdk => Backend::Cdk,
            BackendKind::Joelib => Backend::Joelib,
        }
    }
}

/// Configuration sources shared by all subcommands.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S preprocess.remove-hydrogens=false
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `compute` subcommand.
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Path to the input SD file. Results are written to this path plus the output suffix.
    #[arg(value_name = "SD_FILE")]
    pub input: Option<PathBuf>,

    /// Descriptor names (e.g. Weight) or descriptor.value names (e.g. AutocorrelationMass.ATSm2).
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptors: Vec<String>,

    /// Override the output suffix appended to the input path (default: per engine).
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Skip hydrogen removal, atom typing and aromaticity detection.
    #[arg(long)]
    pub no_preprocess: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_accepts_file_and_mixed_descriptor_names() {
        let cli = Cli::parse_from([
            "moldesc",
            "compute",
            "set.sdf",
            "Weight",
            "AutocorrelationMass.ATSm2",
            "--suffix",
            ".out.yaml",
        ]);
        assert_eq!(cli.backend, BackendKind::Cdk);
        let Commands::Compute(args) = cli.command else {
            panic!("Expected 'compute' subcommand");
        };
        assert_eq!(args.input, Some(PathBuf::from("set.sdf")));
        assert_eq!(args.descriptors, vec!["Weight", "AutocorrelationMass.ATSm2"]);
        assert_eq!(args.suffix.as_deref(), Some(".out.yaml"));
        assert!(!args.no_preprocess);
    }

    #[test]
    fn compute_without_arguments_still_parses() {
        let cli = Cli::parse_from(["moldesc", "compute"]);
        let Commands::Compute(args) = cli.command else {
            panic!("Expected 'compute' subcommand");
        };
        assert!(args.input.is_none());
        assert!(args.descriptors.is_empty());
    }

    #[test]
    fn backend_and_verbosity_are_global() {
        let cli = Cli::parse_from(["moldesc", "catalog", "--backend", "joelib", "-vv"]);
        assert_eq!(cli.backend, BackendKind::Joelib);
        assert_eq!(cli.verbose, 2);
        assert_eq!(Backend::from(cli.backend), Backend::Joelib);
    }

    #[test]
    fn set_values_can_repeat() {
        let cli = Cli::parse_from([
            "moldesc",
            "catalog",
            "-S",
            "catalog.exclude=Weight",
            "-S",
            "output.suffix=x.yaml",
        ]);
        let Commands::Catalog(args) = cli.command else {
            panic!("Expected 'catalog' subcommand");
        };
        assert_eq!(
            args.config.set_values,
            vec!["catalog.exclude=Weight", "output.suffix=x.yaml"]
        );
    }
}
