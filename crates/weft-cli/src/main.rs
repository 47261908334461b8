//! weft CLI.
//!
//! Inspects the mode configuration an editor host would load.
//!
//! # Configuration Priority
//!
//! 1. CLI arguments (highest)
//! 2. Environment variables (`WEFT_*`)
//! 3. Project config (`<project>/.weft/config.toml`)
//! 4. Global config (`~/.weft/config.toml`, or `--config`)
//! 5. Default values (lowest)
//!
//! # Environment Variables
//!
//! - `WEFT_DEBUG`: enable debug logging (`true`/`false`)
//! - `WEFT_MODE`: initial mode name
//! - `WEFT_LOG_LEVEL`: default log level when `RUST_LOG` is unset
//! - `RUST_LOG`: tracing filter directives

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use weft_mode::ReadOnlyFlags;
use weft_runtime::config::{ConfigLoader, WeftConfig};
use weft_runtime::Editor;
use weft_types::ComponentId;

#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(version, about = "weft editor mode inspector", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Project root directory (default: current directory)
    #[arg(short = 'C', long = "project", value_name = "DIR")]
    project: Option<PathBuf>,

    /// Global config file (default: ~/.weft/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered modes and their read-only flags
    Modes,
    /// Switch from the initial mode to MODE and print the resulting flags
    Switch {
        /// Target mode name
        mode: String,
    },
    /// Validate the configuration and list declared components
    Check,
}

fn load_config(args: &Args) -> Result<WeftConfig> {
    let project_root = args.project.clone().unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to get current directory, using '.'");
            PathBuf::from(".")
        })
    });

    let mut loader = ConfigLoader::new().with_project_root(&project_root);
    if let Some(ref path) = args.config {
        loader = loader.with_global_config(path);
    }

    let mut config = loader.load().context("failed to load configuration")?;
    if args.debug {
        config.debug = true;
    }
    Ok(config)
}

fn init_tracing(args: &Args, config: &WeftConfig) {
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(filter))
        .init();
}

fn format_flags(flags: ReadOnlyFlags) -> String {
    format!(
        "ui={} selection={}",
        on_off(flags.ui_enabled),
        on_off(flags.selection_enabled)
    )
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn inspector(config: WeftConfig) -> Result<Editor> {
    Editor::builder()
        .config(config)
        .skip_components()
        .build()
        .context("failed to build editor")
}

fn run_modes(config: WeftConfig) -> Result<()> {
    let editor = inspector(config)?;
    let registry = editor.mode_state().registry();
    for name in registry.names() {
        let Some(descriptor) = registry.descriptor(name) else {
            continue;
        };
        let marker = if name == editor.mode() { "*" } else { " " };
        println!(
            "{marker} {name:<16} {}",
            format_flags(descriptor.editor_read_only().flags())
        );
    }
    Ok(())
}

fn run_switch(config: WeftConfig, mode: &str) -> Result<()> {
    let mut editor = inspector(config)?;
    let from = editor.mode().to_string();
    editor
        .set_mode(mode)
        .with_context(|| format!("failed to switch to mode '{mode}'"))?;
    println!(
        "{from} -> {}: {}",
        editor.mode(),
        format_flags(editor.flags())
    );
    Ok(())
}

fn run_check(config: &WeftConfig, verbose: bool) -> Result<()> {
    let problems = config.validate_all();
    for problem in &problems {
        eprintln!("error: {problem}");
    }
    if !problems.is_empty() {
        bail!("configuration has {} problem(s)", problems.len());
    }

    println!(
        "ok: {} mode(s), {} component(s), initial mode '{}'",
        config.modes.len(),
        config.components.len(),
        config.mode.initial
    );
    for component in &config.components {
        let names: Vec<&str> = component
            .behaviours
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        println!(
            "  {}: {}",
            ComponentId::parse(&component.id),
            names.join(", ")
        );
        if verbose {
            for behaviour in &component.behaviours {
                println!("    {} = {}", behaviour.name, behaviour.config);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_tracing(&args, &config);

    tracing::debug!(command = ?args.command, "weft starting");

    match args.command {
        Command::Modes => run_modes(config),
        Command::Switch { ref mode } => run_switch(config, mode),
        Command::Check => run_check(&config, args.verbose),
    }
}
