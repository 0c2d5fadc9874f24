//! Command-line interface

pub mod commands;
pub mod output;

use crate::core::RenderConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{CheckCommand, ConvertCommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

/// Converts declarative Jenkinsfiles into GitHub Actions workflows
#[derive(Debug, Parser, Clone)]
#[command(name = "jenkinsfile-convert")]
#[command(version = "0.1.0")]
#[command(about = "Convert a declarative Jenkinsfile into a GitHub Actions workflow", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to render configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Convert a Jenkinsfile into workflow YAML
    Convert(ConvertCommand),

    /// Parse a Jenkinsfile without converting it
    Check(CheckCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

/// `<config dir>/jenkinsfile-convert/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jenkinsfile-convert").join("config.yaml"))
}

/// Load the render configuration: `--config`, then the default location, then defaults
pub fn load_config(path: Option<&str>) -> Result<RenderConfig> {
    if let Some(path) = path {
        return RenderConfig::from_file(path).with_context(|| format!("Failed to load config {}", path));
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!("Using config {}", path.display());
            RenderConfig::from_file(&path)
        }
        _ => Ok(RenderConfig::default()),
    }
}
