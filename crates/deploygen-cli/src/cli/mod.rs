//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use deploygen_core::domain::ConfigFormat;

pub mod global;
pub mod parameters;
pub use global::GlobalArgs;
pub use parameters::ParameterArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "deploygen",
    bin_name = "deploygen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Deployment configuration generator for the cmdb service family",
    long_about = "deploygen validates deployment parameters, renders the shared \
                  configuration files into cmdb_adminserver/configures and patches \
                  every service's start.sh from its template.sh.start.",
    after_help = "EXAMPLES:\n\
        \x20 deploygen generate --discovery 127.0.0.1:2181 --redis-ip 127.0.0.1 --redis-pass pw \\\n\
        \x20     --mongo-ip 127.0.0.1 --mongo-user cc --mongo-pass pw \\\n\
        \x20     --blueking-cmdb-url http://127.0.0.1:8088\n\
        \x20 deploygen -c deploy.toml generate --dry-run\n\
        \x20 deploygen list services --format json\n\
        \x20 deploygen completions bash > /usr/share/bash-completion/completions/deploygen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate parameters, write configuration files and patch start scripts.
    #[command(
        visible_alias = "gen",
        about = "Generate configuration files and start scripts",
        after_help = "Parameters are layered: schema defaults, then the config file, \
                      then DEPLOYGEN_* environment variables, then these flags.\n\n\
                      EXAMPLES:\n\
            \x20 deploygen generate -c deploy.toml --log-level 5\n\
            \x20 deploygen generate -c deploy.toml --config-format yaml --dry-run\n\
            \x20 deploygen generate -c deploy.toml --skip-scripts"
    )]
    Generate(GenerateArgs),

    /// Show the service registry or the template catalog.
    #[command(
        visible_alias = "ls",
        about = "List services or templates",
        after_help = "EXAMPLES:\n\
            \x20 deploygen list services\n\
            \x20 deploygen list templates --config-format yaml\n\
            \x20 deploygen list templates --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 deploygen completions bash > ~/.local/share/bash-completion/completions/deploygen\n\
            \x20 deploygen completions zsh  > ~/.zfunc/_deploygen\n\
            \x20 deploygen completions fish > ~/.config/fish/completions/deploygen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `deploygen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Expand everything and print the plan without touching the disk.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Only write the configuration files.
    #[arg(long = "skip-scripts", help = "Do not patch service start scripts")]
    pub skip_scripts: bool,

    #[command(flatten)]
    pub parameters: ParameterArgs,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `deploygen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum, default_value = "services", help = "What to list")]
    pub target: ListTarget,

    /// Restrict templates to one document format.
    #[arg(
        long = "config-format",
        value_enum,
        value_name = "FORMAT",
        help = "Only templates of this format"
    )]
    pub config_format: Option<FormatArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// What `deploygen list` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    /// The service registry.
    Services,
    /// The template catalog.
    Templates,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
}

/// Document format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Ini,
    Yaml,
}

impl From<FormatArg> for ConfigFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ini => ConfigFormat::Ini,
            FormatArg::Yaml => ConfigFormat::Yaml,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `deploygen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
