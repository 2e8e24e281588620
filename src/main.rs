use anyhow::{Context, Result};
use clap::Parser;
use dynaform::core::config;
use dynaform::core::validation::validate_fields;
use dynaform::logging;
use dynaform::runtime::Runtime;
use dynaform::settings::Settings;
use dynaform::terminal::Terminal;
use dynaform::widgets::shell::Shell;
use dynaform::{FormBuilderState, FormField};
use std::path::PathBuf;
use std::process::ExitCode;

/// Build, validate and preview forms in the terminal.
#[derive(Parser, Debug)]
#[command(name = "dynaform")]
#[command(version)]
#[command(about = "Build, validate and preview forms in the terminal")]
struct Cli {
    /// YAML settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Form definition (JSON) to start from
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Append logs to this file; the terminal is left alone otherwise
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Require at least one option on checkbox fields
    #[arg(long)]
    checkbox_requires_options: bool,

    /// Match file `accept` lists like a browser (`type/*`, `.ext`, any case)
    #[arg(long)]
    html_accept: bool,

    /// Validate the imported definition, print errors and exit
    #[arg(long, requires = "import")]
    check: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.checkbox_requires_options {
        settings.validation.checkbox_requires_options = true;
    }
    if cli.html_accept {
        settings.validation.html_accept = true;
    }

    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path, &settings.log_level)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
    }

    let fields: Vec<FormField> = match &cli.import {
        Some(path) => config::read_config_file(path)
            .with_context(|| format!("failed to import {}", path.display()))?,
        None => Vec::new(),
    };
    tracing::info!(fields = fields.len(), title = %settings.title, "starting");

    if cli.check {
        let result = validate_fields(&fields, &settings.validation);
        for line in result.summary_lines() {
            println!("{line}");
        }
        return Ok(if result.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let state = FormBuilderState::new(settings.validation).with_fields(fields);
    let shell = Shell::new(settings.title, state);
    let terminal = Terminal::new().context("terminal unavailable")?;
    Runtime::new(shell, terminal)
        .run()
        .context("terminal session failed")?;
    Ok(ExitCode::SUCCESS)
}
