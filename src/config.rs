use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command, OutputFormat};
use crate::server::{DEFAULT_HOST, DEFAULT_PORT};

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Output format for `analyze`: text, json or html
    pub output: Option<OutputFormat>,

    /// Save the `analyze` report to file
    pub save: Option<String>,

    /// Verbose output
    pub verbose: Option<bool>,

    /// Leave the alt-text factor out when a page has no images
    pub exclude_imageless_alt: Option<bool>,

    /// Address for `serve`
    pub host: Option<String>,

    /// Port for `serve`
    pub port: Option<u16>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

const FORMATS: [ConfigFormat; 3] = [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml];

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Candidate config files, highest priority first: the working
    /// directory, then `$XDG_CONFIG_HOME/auditly` (or `~/.config/auditly`)
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for format in &FORMATS {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("auditly.{}", ext)));
            }
        }

        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let auditly_dir = config_home.join("auditly");
            for format in &FORMATS {
                for ext in format.extensions() {
                    paths.push(auditly_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Load the first config file found, or None if there is none
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        let command = match &cli.command {
            Command::Analyze(args) => {
                let mut args = args.clone();
                if args.output == OutputFormat::default() {
                    args.output = self.output.unwrap_or(args.output);
                }
                args.save = args.save.or_else(|| self.save.clone());
                args.exclude_imageless_alt = args.exclude_imageless_alt
                    || self.exclude_imageless_alt.unwrap_or(false);
                Command::Analyze(args)
            }
            Command::Render(args) => Command::Render(args.clone()),
            Command::Serve(args) => {
                let mut args = args.clone();
                if args.host == DEFAULT_HOST {
                    args.host = self.host.clone().unwrap_or(args.host);
                }
                if args.port == DEFAULT_PORT {
                    args.port = self.port.unwrap_or(args.port);
                }
                args.exclude_imageless_alt = args.exclude_imageless_alt
                    || self.exclude_imageless_alt.unwrap_or(false);
                Command::Serve(args)
            }
        };

        Cli {
            command,
            config: cli.config.clone(),
            verbose: cli.verbose || self.verbose.unwrap_or(false),
        }
    }
}
