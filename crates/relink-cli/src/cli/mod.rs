//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use relink_core::domain::parse_property;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "relink",
    bin_name = "relink",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render Markdown to HTML, rewriting links on the way",
    long_about = "Relink renders Markdown documents to HTML. Every link and image \
                  passes through a chain of resolver extensions that can rewrite \
                  its destination, validate it or decorate it.",
    after_help = "EXAMPLES:\n\
        \x20 relink render README.md\n\
        \x20 relink render docs -o site --base-url https://docs.example.org/\n\
        \x20 relink extensions --format json\n\
        \x20 relink completions bash > /usr/share/bash-completion/completions/relink",
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
    /// Render a Markdown file or a directory of Markdown files.
    #[command(
        visible_alias = "r",
        about = "Render Markdown to HTML",
        after_help = "EXAMPLES:\n\
            \x20 relink render README.md                     # HTML to stdout\n\
            \x20 relink render README.md -o README.html\n\
            \x20 relink render docs -o site --wiki-prefix wiki/\n\
            \x20 relink render docs -o site -D base_url=https://staging.example.org/"
    )]
    Render(RenderArgs),

    /// List the registered resolver extensions.
    #[command(
        visible_alias = "ext",
        about = "List resolver extensions",
        after_help = "EXAMPLES:\n\
            \x20 relink extensions\n\
            \x20 relink extensions --format json"
    )]
    Extensions(ExtensionsArgs),

    /// Initialise a relink configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 relink init           # user configuration directory\n\
            \x20 relink init --local   # relink.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 relink completions bash > ~/.local/share/bash-completion/completions/relink\n\
            \x20 relink completions zsh  > ~/.zfunc/_relink\n\
            \x20 relink completions fish > ~/.config/fish/completions/relink.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the relink configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 relink config get resolver.base_url\n\
            \x20 relink config list\n\
            \x20 relink config path"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `relink render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markdown file, or directory searched for `*.md` / `*.markdown`.
    #[arg(value_name = "PATH", help = "Markdown file or directory")]
    pub path: PathBuf,

    /// Output file (single document) or directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUT",
        help = "Output file or directory (default: stdout for a single file)"
    )]
    pub output: Option<PathBuf>,

    /// Base URL that relative links are joined onto.
    #[arg(long = "base-url", value_name = "URL", help = "Base URL for relative links")]
    pub base_url: Option<String>,

    /// Prefix for wiki link targets.
    #[arg(
        long = "wiki-prefix",
        value_name = "PREFIX",
        help = "Prefix prepended to wiki link pages"
    )]
    pub wiki_prefix: Option<String>,

    /// Keep `*.md` link targets as written.
    #[arg(long = "no-md-rewrite", help = "Do not rewrite .md links to .html")]
    pub no_md_rewrite: bool,

    /// Extra resolver context properties.
    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        value_parser = parse_property,
        help = "Set a resolver context property (repeatable)"
    )]
    pub define: Vec<(String, String)>,
}

// ── extensions ────────────────────────────────────────────────────────────────

/// Arguments for `relink extensions`.
#[derive(Debug, Args)]
pub struct ExtensionsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `extensions` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `relink init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `relink.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `relink completions`.
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

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `relink config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `resolver.base_url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
