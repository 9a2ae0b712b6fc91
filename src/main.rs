//! taxcalc - Main entry point
//!
//! Interactive income form by default, plus headless helpers for scripting.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use taxcalc::cli::{Cli, Commands, ConfigCommands, FreelanceSpec};
use taxcalc::error::TaxCalcError;
use taxcalc::{App, CalculatorConfig, EstimateRequest};

/// Initialize tracing with appropriate settings
///
/// The interactive form owns the terminal, so its logs go to `log_file` or
/// nowhere. Headless commands log to stderr.
fn init_logging(interactive: bool, log_file: Option<&Path>) -> Result<()> {
    let writer = match (log_file, interactive) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        (None, true) => BoxMakeWriter::new(std::io::sink),
        (None, false) => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(log_file.is_none() && !interactive)
        .with_target(false)
        .init();

    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Run));

    init_logging(interactive, cli.log_file.as_deref())?;
    info!("taxcalc {} starting up", env!("CARGO_PKG_VERSION"));
    debug!("CLI arguments parsed");

    match cli.command {
        Some(Commands::Config { action }) => run_config_command(action),
        Some(Commands::Estimate {
            monthly,
            freelance,
            year,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            run_estimate(&config, monthly, freelance, year, json)
        }
        Some(Commands::Run) | None => {
            let config = load_config(cli.config.as_deref())?;
            info!("Launching interactive form");
            run_tui(&config)?;
            Ok(())
        }
    }
}

/// Load and validate the configuration, or fall back to defaults
fn load_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    let Some(path) = path else {
        debug!("No configuration file given, using defaults");
        return Ok(CalculatorConfig::default());
    };

    info!("Loading configuration from: {:?}", path);
    let config = CalculatorConfig::load_from_file(path)?;
    config
        .validate()
        .map_err(|e| TaxCalcError::config(format!("{:?}: {:#}", path, e)))?;
    info!("Configuration validated successfully");
    Ok(config)
}

fn run_config_command(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{:?} already exists, pass --force to overwrite it", path);
            }
            CalculatorConfig::default().save_to_file(&path)?;
            info!("Wrote default configuration to {:?}", path);
            println!("✓ Default configuration written to {}", path.display());
        }
        ConfigCommands::Validate { path } => {
            info!("Validating configuration file: {:?}", path);
            match CalculatorConfig::load_from_file(&path).and_then(|config| {
                config.validate()?;
                Ok(config)
            }) {
                Ok(config) => {
                    info!("Configuration validation successful");
                    println!("✓ Configuration file is valid: {:?}", config);
                }
                Err(e) => {
                    error!("Configuration validation failed: {:#}", e);
                    eprintln!("✗ Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

fn run_estimate(
    config: &CalculatorConfig,
    monthly: Vec<f64>,
    freelance: Vec<FreelanceSpec>,
    year: Option<f64>,
    json: bool,
) -> Result<()> {
    let request = EstimateRequest {
        monthly,
        freelance,
        year,
    };

    match taxcalc::estimate(&request, config.row_defaults(), &config.tax_rates()) {
        Ok(report) => {
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report.to_text(config.language));
            }
            Ok(())
        }
        Err(errors) => {
            error!(invalid_fields = errors.len(), "Estimate rejected");
            for field_error in errors.iter() {
                eprintln!(
                    "✗ row {}: {}",
                    field_error.row + 1,
                    field_error.message(config.language)
                );
            }
            std::process::exit(1);
        }
    }
}

/// Run the interactive form
fn run_tui(config: &CalculatorConfig) -> Result<(), TaxCalcError> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| TaxCalcError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        TaxCalcError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| TaxCalcError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| {
            let mut app = App::new(config);
            let result = app.run(&mut terminal);
            let _ = terminal.show_cursor();
            result
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}
