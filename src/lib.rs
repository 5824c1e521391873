pub mod analyzers;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod html_report;
pub mod models;
pub mod recommendations;
pub mod reporter;
pub mod scoring;
pub mod seo_analyzer;
pub mod server;
mod snapshot;

use anyhow::{Context, Result};
use cli::{AnalyzeArgs, Cli, Command, OutputFormat, RenderArgs};
use colored::*;
use config::Config;
use html_report::AuditSource;
use models::{AuditOptions, ImageAltScoring, WebsiteSnapshot};
use reporter::Reporter;
use seo_analyzer::SeoAnalyzer;
use std::io::Read;
use std::path::Path;

/// Apply the config file (explicit `--config`, else the default locations)
pub fn resolve_args(args: Cli) -> Result<Cli> {
    let config = match &args.config {
        Some(path) => Some(Config::from_file(Path::new(path))?),
        None => Config::from_default_paths()?,
    };

    Ok(match config {
        Some(config) => config.merge_with_cli(&args),
        None => args,
    })
}

pub async fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Analyze(analyze) => run_analyze(analyze, args.verbose),
        Command::Render(render) => run_render(render),
        Command::Serve(serve) => {
            println!(
                "{} http://{}:{}",
                "Serving SEO audit API on".bright_cyan().bold(),
                serve.host,
                serve.port
            );
            server::serve(
                &serve.host,
                serve.port,
                audit_options(serve.exclude_imageless_alt),
            )
            .await
        }
    }
}

fn audit_options(exclude_imageless_alt: bool) -> AuditOptions {
    AuditOptions {
        image_alt_scoring: if exclude_imageless_alt {
            ImageAltScoring::Exclude
        } else {
            ImageAltScoring::Penalize
        },
    }
}

fn run_analyze(args: AnalyzeArgs, verbose: bool) -> Result<()> {
    let input = read_input(&args.input)?;
    let snapshot = WebsiteSnapshot::from_json(&input)
        .with_context(|| format!("Invalid website snapshot: {}", args.input))?;

    if verbose {
        eprintln!("{} {}", "Analyzing SEO for".bright_yellow(), snapshot.url);
    }

    let report = SeoAnalyzer::analyze(&snapshot, &audit_options(args.exclude_imageless_alt))?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Html => println!("{}", html_report::render_report(&report)),
        OutputFormat::Text => Reporter::print_text_report(&report),
    }

    if let Some(filename) = args.save {
        Reporter::save_report(&report, &filename)?;
    }

    Ok(())
}

fn run_render(args: RenderArgs) -> Result<()> {
    let input = read_input(&args.input)?;

    let source = match AuditSource::from_json_text(&input) {
        AuditSource::Freeform { raw_output, url } => AuditSource::Freeform {
            raw_output,
            url: url.or(args.url),
        },
        report => report,
    };
    let html = html_report::convert_to_html_report(&source);

    match args.save {
        Some(filename) => Reporter::save_to_file(&html, &filename),
        None => {
            println!("{}", html);
            Ok(())
        }
    }
}

/// Read a file, or stdin when the path is `-`
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path))
}
