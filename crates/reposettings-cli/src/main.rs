//! reposettings CLI
//!
//! Loads a repository settings document, checks that the governance API
//! token is available and prints the effective rulesets per repository.

mod cli;
mod error;
mod logging;
mod plan;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::{CliError, Result};
use plan::Plan;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialise logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = %format_args!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        "reposettings loader"
    );

    let path = config_path(cli)?;
    let data = read_config(&path)?;

    if cli.token.as_deref().is_none_or(str::is_empty) {
        return Err(CliError::MissingToken);
    }

    let settings = reposettings_config::decode(&data).map_err(|source| CliError::Decode {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(
        policy = %cli.policy,
        repositories = settings.overrides().len(),
        "Resolving effective rulesets"
    );

    let plan = Plan::new(&settings, cli.policy);
    let output = if cli.json {
        plan.to_json()?
    } else {
        plan.render_text()
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}

/// Settings path from `--config`, falling back to the legacy positional argument
fn config_path(cli: &Cli) -> Result<PathBuf> {
    match (&cli.config, &cli.legacy_config) {
        (Some(path), legacy) => {
            if let Some(legacy) = legacy {
                tracing::warn!(
                    ?legacy,
                    "Ignoring positional settings file; --config takes precedence"
                );
            }
            Ok(path.clone())
        }
        (None, Some(path)) => {
            tracing::warn!("Settings file not set by flag, falling back to legacy usage");
            Ok(path.clone())
        }
        (None, None) => Err(CliError::MissingConfig),
    }
}

fn read_config(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data)
}
