//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use reposettings_config::MergePolicy;

/// Repository settings loader - decode ruleset settings and show the
/// effective rulesets per repository
#[derive(Parser, Debug)]
#[command(name = "reposettings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File where to read the repository settings to set
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Settings file given without --config (legacy usage)
    #[arg(value_name = "LEGACY_FILE", hide = true)]
    pub legacy_config: Option<PathBuf>,

    /// Sets log level to debug
    #[arg(short, long)]
    pub verbose: bool,

    /// How repository overrides combine with the common rulesets: `extend` or `replace`
    #[arg(long, value_name = "POLICY", default_value_t = MergePolicy::Extend)]
    pub policy: MergePolicy,

    /// Token for the governance API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output the plan as JSON
    #[arg(long)]
    pub json: bool,
}
