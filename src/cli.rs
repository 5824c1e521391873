use crate::server::{DEFAULT_HOST, DEFAULT_PORT};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Clone)]
#[command(name = "auditly")]
#[command(about = "A deterministic SEO audit engine with HTML reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Audit a website snapshot (JSON file, or - for stdin)
    Analyze(AnalyzeArgs),
    /// Render a stored audit result or AI audit output as HTML
    Render(RenderArgs),
    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Snapshot file path, or - to read from stdin
    #[arg(value_name = "SNAPSHOT")]
    pub input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save report to file (.html saves the rendered report, anything else JSON)
    #[arg(short, long)]
    pub save: Option<String>,

    /// Leave the alt-text factor out of the on-page score when a page has no images
    #[arg(long)]
    pub exclude_imageless_alt: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Audit file path, or - to read from stdin
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Audited URL, used when the input does not name one
    #[arg(long)]
    pub url: Option<String>,

    /// Write the HTML to a file instead of stdout
    #[arg(short, long)]
    pub save: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Leave the alt-text factor out of the on-page score when a page has no images
    #[arg(long)]
    pub exclude_imageless_alt: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}
