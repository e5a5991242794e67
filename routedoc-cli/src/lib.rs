//! # routedoc-cli
//!
//! `generate` and `check` commands for the OpenAPI document of a service.
//!
//! The endpoint registry lives inside the application, so this crate ships
//! no binary of its own. The application wires the commands into its own
//! `main` (or a dedicated `openapi` binary) and hands over its registry:
//!
//! ```ignore
//! fn main() {
//!     let registry = routes::registry();
//!     let builder = DocumentBuilder::new(OpenApiConfig::new("Pet Store", "1.0.0"))
//!         .with_hooks(registry.hooks().clone());
//!     routedoc_cli::init_tracing();
//!     if let Err(e) = routedoc_cli::run_from_args(std::env::args_os(), &registry, &builder) {
//!         eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `generate --out <file> [--format json\|yaml]` | Build the document and write it to `<file>` |
//! | `generate --stdout [--format json\|yaml]` | Build the document and print it |
//! | `check --out <file> [--format json\|yaml]` | Fail when `<file>` differs from a fresh build |
//!
//! Both commands accept `--title`, `--api-version` and `--servers a,b` to
//! override the configured document info and servers.
//!
//! Without `--format`, the format follows the extension of `<file>` and
//! falls back to YAML. YAML output starts with [`commands::HEADER`].
//! Building with no registered routes is an error.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use routedoc_core::{Registry, Server};
use routedoc_openapi::{DocumentBuilder, Format};
use tracing_subscriber::EnvFilter;

pub mod commands;
mod error;

pub use error::{CliError, DriftKind, Result};

#[derive(Debug, Parser)]
#[command(name = "openapi", version, about = "Generate and verify the OpenAPI document")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the OpenAPI document to a file or to stdout
    Generate {
        /// Output file (e.g. openapi.yaml)
        #[arg(short, long, required_unless_present = "stdout")]
        out: Option<PathBuf>,
        /// Print the document instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
        #[command(flatten)]
        options: DocumentOptions,
    },
    /// Verify that the stored document is up to date
    Check {
        /// Stored document to compare against
        #[arg(short, long)]
        out: PathBuf,
        #[command(flatten)]
        options: DocumentOptions,
    },
}

/// Flags shared by `generate` and `check`.
#[derive(Debug, Clone, Default, Args)]
pub struct DocumentOptions {
    /// Output format: json or yaml
    #[arg(short, long)]
    pub format: Option<Format>,
    /// Override the document title
    #[arg(long)]
    pub title: Option<String>,
    /// Override the document version
    #[arg(long = "api-version", value_name = "VERSION")]
    pub api_version: Option<String>,
    /// Comma-separated server URLs, replacing the configured ones
    #[arg(long, value_name = "URLS")]
    pub servers: Option<String>,
}

impl DocumentOptions {
    /// A copy of `builder` with the overrides applied.
    pub fn apply(&self, builder: &DocumentBuilder) -> DocumentBuilder {
        let mut builder = builder.clone();
        let config = builder.config_mut();
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            config.title = title.trim().to_string();
        }
        if let Some(version) = self.api_version.as_deref().filter(|v| !v.trim().is_empty()) {
            config.version = version.trim().to_string();
        }
        let servers = parse_servers(self.servers.as_deref().unwrap_or_default());
        if !servers.is_empty() {
            config.servers = servers.into_iter().map(Server::new).collect();
        }
        builder
    }
}

/// Split a comma-separated list of server URLs. Entries are trimmed, empty
/// ones dropped, and the result sorted without duplicates.
pub fn parse_servers(raw: &str) -> Vec<String> {
    let mut servers: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    servers.sort();
    servers.dedup();
    servers
}

/// Execute a parsed command against `registry`.
pub fn run(cli: Cli, registry: &Registry, builder: &DocumentBuilder) -> Result<()> {
    match cli.command {
        Commands::Generate {
            out,
            stdout,
            options,
        } => {
            let builder = options.apply(builder);
            match out {
                Some(out) if !stdout => {
                    let format = commands::resolve_format(&out, options.format);
                    commands::generate::run(registry, &builder, &out, format)
                }
                _ => {
                    let format = options.format.unwrap_or_default();
                    commands::generate::write_to(
                        registry,
                        &builder,
                        format,
                        &mut std::io::stdout().lock(),
                    )
                }
            }
        }
        Commands::Check { out, options } => {
            let builder = options.apply(builder);
            let format = commands::resolve_format(&out, options.format);
            commands::check::run(registry, &builder, &out, format)
        }
    }
}

/// Parse `args` (program name first) and run the command.
///
/// Parse failures, including `--help` and `--version`, come back as
/// [`CliError::Args`]; call `.exit()` on the inner error to print them the
/// way clap does.
pub fn run_from_args<I, T>(args: I, registry: &Registry, builder: &DocumentBuilder) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    run(cli, registry, builder)
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing when a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
