use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use laravel_registry::config::{RegistryConfig, log_path};
use laravel_registry::packages::lint::lint;
use laravel_registry::packages::{Bound, PackageRegistry, Series};

#[derive(Parser)]
#[command(name = "laravel-registry")]
#[command(
    version,
    about = "Version constraints for Laravel core and community packages"
)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/laravel-registry/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read table documents from this directory instead of the bundled copies
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Write logs to a file instead of stderr
    /// (defaults to $XDG_DATA_HOME/laravel-registry/laravel-registry.log)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Packages included in a new Laravel application
    Core {
        /// Laravel version (e.g., latest, 12.x, 6.x)
        laravel: String,
    },
    /// Popular community and commercial packages
    Community {
        /// Laravel version (e.g., latest, 12.x, 6.x)
        laravel: String,
        /// PHP version selecting runtime-specific constraints
        #[arg(long)]
        php: Option<String>,
        /// Which end of the constraint range to return: earliest or latest
        #[arg(long, default_value = "latest")]
        bound: String,
    },
    /// Packages marked as abandoned on Packagist
    Abandoned,
    /// Latest tagged Laravel release for a series
    Tag {
        /// Series: latest or prior
        series: Option<String>,
    },
    /// Constraint for the Symfony components included with a Laravel version
    Symfony {
        /// Laravel version (e.g., latest, 12.x, 6.x)
        laravel: String,
    },
    /// Names of all Illuminate components
    Illuminate,
    /// Check the versioned tables for entries that cannot resolve or have inverted ranges
    Lint,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_file = cli.log_file.map(|path| path.unwrap_or_else(log_path));
    let _guard = laravel_registry::logging::init(log_file.as_deref())?;

    let mut config = RegistryConfig::load_or_default(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }
    debug!("Using configuration {:?}", config);

    let registry = PackageRegistry::from_config(&config);

    match cli.command {
        Command::Core { laravel } => print_json(&registry.core_packages_for(&laravel)?),
        Command::Community {
            laravel,
            php,
            bound,
        } => {
            let bound = bound.parse::<Bound>()?;
            let packages = registry
                .community_packages_for(&laravel, php.as_deref(), bound)?;
            print_json(&packages)
        }
        Command::Abandoned => print_json(&registry.abandoned_packages()?),
        Command::Tag { series } => {
            let series = series.map(|series| series.parse::<Series>()).transpose()?;
            print_json(&registry.tag_for_series(series)?)
        }
        Command::Symfony { laravel } => print_json(&registry.symfony_constraint_for(&laravel)?),
        Command::Illuminate => print_json(&PackageRegistry::illuminate_packages()),
        Command::Lint => {
            let issues = lint(&registry)?;
            print_json(&issues)?;
            if !issues.is_empty() {
                anyhow::bail!("{} issue(s) found", issues.len());
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
