use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "flavor-sweep")]
#[command(about = "Remove redundant source flavor assets from a Kaltura catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./Config.toml when present)
    #[arg(long, global = true, env = "FLAVOR_SWEEP_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk the catalog and delete source flavors (dry run unless --confirm)
    Sweep(SweepArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Actually delete approved flavor assets
    #[arg(long, default_value_t = false)]
    pub confirm: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_defaults_to_dry_run() {
        let cli = Cli::try_parse_from(["flavor-sweep", "sweep"]).unwrap();
        match cli.command {
            Some(Commands::Sweep(args)) => assert!(!args.confirm),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sweep_confirm_flag() {
        let cli =
            Cli::try_parse_from(["flavor-sweep", "sweep", "--confirm", "--config", "a.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        match cli.command {
            Some(Commands::Sweep(args)) => assert!(args.confirm),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
