use anyhow::Result;
use clap::Parser;
use qgis_pip::commands::{self, Config, Options};
use qgis_pip::runtime::RealRuntime;
use std::path::PathBuf;

/// qgis-pip - Python package installer for QGIS
///
/// Finds the QGIS installations on this computer (OSGeo4W layouts and the
/// Windows registry), asks which one to use, and installs the required
/// Python packages through its OSGeo4W shell.
///
/// Examples:
///   qgis-pip              # Interactive installation
///   qgis-pip list --json  # Show what was discovered
#[derive(Parser, Debug)]
#[command(author, version = env!("QGIS_PIP_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Requirements file to install instead of the bundled one (also via QGIS_PIP_REQUIREMENTS)
    #[arg(
        long = "requirements",
        short = 'r',
        env = "QGIS_PIP_REQUIREMENTS",
        value_name = "PATH",
        global = true
    )]
    pub requirements: Option<PathBuf>,

    /// Do not ask for confirmation before searching
    #[arg(long = "yes", short = 'y', global = true)]
    pub yes: bool,

    /// Merge installations reported identically by several registry scopes
    #[arg(long = "dedup", global = true)]
    pub dedup: bool,

    /// Do not wait for Enter before exiting
    #[arg(long = "no-pause", global = true)]
    pub no_pause: bool,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install the Python packages into a QGIS installation (default)
    Install,

    /// List the QGIS installations found on this computer
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Print JSON instead of one line per installation
    #[arg(long = "json")]
    pub json: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            requirements: self.requirements.clone(),
            assume_yes: self.yes,
            dedup: self.dedup,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match &cli.command {
        None | Some(Commands::Install) => {
            commands::print_banner();
            let outcome = Config::new(RealRuntime, cli.options())
                .and_then(|config| commands::install(&config, &mut std::io::stdout()));
            commands::report(&outcome);
            commands::finish(&RealRuntime, !cli.no_pause);
        }
        Some(Commands::List(args)) => {
            let config = Config::new(RealRuntime, cli.options())?;
            commands::list(&config, args.json, &mut std::io::stdout())?;
        }
    }
    Ok(())
}
