use clap::{Args, Parser, Subcommand, ValueEnum};
use molkit::engine::config::{BatchMode, UnlockPolicy};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "molkit CLI - Assemble molecules from TOML recipes and report their formula and molecular weight.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a molecule from a recipe and print its formula, weight and atoms.
    Build(BuildArgs),
    /// List the supported elements with their valence and atomic weight.
    Elements,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the recipe file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub recipe: PathBuf,

    /// Path to a molecule configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override `batch-mode` from the config file.
    #[arg(long, value_enum, value_name = "MODE")]
    pub batch_mode: Option<BatchModeArg>,

    /// Override `unlock-policy` from the config file.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub unlock_policy: Option<UnlockPolicyArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchModeArg {
    Transactional,
    Sequential,
}

impl From<BatchModeArg> for BatchMode {
    fn from(arg: BatchModeArg) -> Self {
        match arg {
            BatchModeArg::Transactional => BatchMode::Transactional,
            BatchModeArg::Sequential => BatchMode::Sequential,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockPolicyArg {
    SaturationOnly,
    AllHydrogens,
}

impl From<UnlockPolicyArg> for UnlockPolicy {
    fn from(arg: UnlockPolicyArg) -> Self {
        match arg {
            UnlockPolicyArg::SaturationOnly => UnlockPolicy::SaturationOnly,
            UnlockPolicyArg::AllHydrogens => UnlockPolicy::AllHydrogens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "molkit",
            "-vv",
            "build",
            "--recipe",
            "ethanol.toml",
            "--batch-mode",
            "sequential",
            "--unlock-policy",
            "all-hydrogens",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.recipe, PathBuf::from("ethanol.toml"));
                assert!(args.config.is_none());
                assert_eq!(args.batch_mode, Some(BatchModeArg::Sequential));
                assert_eq!(args.unlock_policy, Some(UnlockPolicyArg::AllHydrogens));
            }
            other => panic!("expected build command, got {:?}", other),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["molkit", "-q", "-v", "elements"]).is_err());
    }

    #[test]
    fn build_requires_a_recipe() {
        assert!(Cli::try_parse_from(["molkit", "build"]).is_err());
    }
}
