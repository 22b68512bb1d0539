//! mobilecss - recolor a mobile app stylesheet from the command line.
//!
//! Usage:
//!   mobilecss colors app.css --json
//!   mobilecss generate app.css -r '#fff=#138f87' --custom extra.css
//!   mobilecss custom-css

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use mobilecss::{Config, CssFileStore, WizardSession, parse_replacement};

/// Recolor a mobile app stylesheet
#[derive(Parser, Debug)]
#[command(name = "mobilecss")]
#[command(about = "Generate color override stylesheets for mobile app themes")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the colors of a stylesheet, most used first
    Colors {
        /// The base stylesheet
        base: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate and publish an override stylesheet
    Generate {
        /// The base stylesheet
        base: PathBuf,

        /// Replace a color, e.g. `-r '#fff=#138f87'` (repeatable)
        #[arg(short = 'r', long = "replace", value_name = "FROM=TO")]
        replacements: Vec<String>,

        /// File with custom CSS to publish; defaults to the custom CSS of the
        /// published file
        #[arg(long, value_name = "FILE")]
        custom: Option<PathBuf>,

        /// URL clients currently use; overrides `output.current_url`
        #[arg(long, value_name = "URL")]
        current_url: Option<String>,

        /// Configuration file
        #[arg(long, default_value = Config::DEFAULT_PATH)]
        config: PathBuf,
    },

    /// Print the custom CSS of the published stylesheet
    CustomCss {
        /// Configuration file
        #[arg(long, default_value = Config::DEFAULT_PATH)]
        config: PathBuf,
    },
}

#[derive(Serialize)]
struct ColorEntry<'a> {
    color: &'a str,
    count: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    match args.command {
        Command::Colors { base, json } => colors(&base, json),
        Command::Generate {
            base,
            replacements,
            custom,
            current_url,
            config,
        } => generate(&base, &replacements, custom.as_deref(), current_url, &config),
        Command::CustomCss { config } => custom_css(&config),
    }
}

fn colors(base: &Path, json: bool) -> Result<()> {
    let session = start_session(base)?;

    if json {
        let entries: Vec<ColorEntry<'_>> = session
            .colors()
            .iter()
            .map(|usage| ColorEntry {
                color: &usage.color,
                count: usage.count,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for usage in session.colors() {
            println!("{:>6}  {}", usage.count, usage.color);
        }
    }

    Ok(())
}

fn generate(
    base: &Path,
    replacements: &[String],
    custom: Option<&Path>,
    current_url: Option<String>,
    config_path: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    let store = CssFileStore::from_config(&config.output);
    let session = start_session(base)?;

    let replacements = replacements
        .iter()
        .map(|arg| parse_replacement(arg))
        .collect::<mobilecss::Result<HashMap<_, _>>>()?;

    let custom_css = match custom {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read custom CSS from {}", path.display()))?,
        None => session.existing_custom_css(&store)?,
    };

    let current_url = current_url.or(config.output.current_url);
    let published = session
        .finish(&replacements, &custom_css, &store, current_url.as_deref())
        .context("Failed to publish override stylesheet")?;

    println!("{}", published.url);
    Ok(())
}

fn custom_css(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let store = CssFileStore::from_config(&config.output);

    match store.read()? {
        Some(text) => println!("{}", mobilecss::existing_custom_css(&text)),
        None => tracing::warn!(path = %store.path().display(), "Nothing has been published yet"),
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn start_session(base: &Path) -> Result<WizardSession> {
    let css = std::fs::read_to_string(base)
        .with_context(|| format!("Failed to read stylesheet {}", base.display()))?;
    WizardSession::start(&css).with_context(|| format!("Failed to parse {}", base.display()))
}
