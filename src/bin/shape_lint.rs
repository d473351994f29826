//! shape-lint command line interface
//!
//! # Usage
//!
//! ```bash
//! # Run the configured validators over a model
//! shape_lint validate --model model.json --config shape-lint.yaml
//!
//! # Render a message template against one shape
//! shape_lint render --model model.json --shape com.example#Widget 'Shape @id since @trait(since)'
//!
//! # Evaluate a scoped-attribute path against one shape
//! shape_lint path --model model.json --shape com.example#Widget '@members.target'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use shape_lint::{
    evaluate_for_shape, render_for_shape, validate_model, ConfigLoader, Model, Severity, ShapeId,
    ValidationEvent,
};

#[derive(Parser)]
#[command(name = "shape_lint")]
#[command(version = "0.1.0")]
#[command(about = "Validate shape models and evaluate scoped-attribute templates")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every configured validator over a model
    Validate {
        /// JSON model file
        #[arg(short, long)]
        model: PathBuf,

        /// Validator configuration (defaults to $SHAPE_LINT_CONFIG or shape-lint.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render a message template against one shape
    Render {
        /// JSON model file
        #[arg(short, long)]
        model: PathBuf,

        /// Absolute shape id, e.g. com.example#Widget
        #[arg(short, long)]
        shape: String,

        /// Template text, e.g. "Shape @id"
        template: String,
    },

    /// Evaluate a scoped-attribute path against one shape
    Path {
        /// JSON model file
        #[arg(short, long)]
        model: PathBuf,

        /// Absolute shape id, e.g. com.example#Widget
        #[arg(short, long)]
        shape: String,

        /// Path, e.g. "@trait(since)"
        path: String,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { model, config } => cmd_validate(&model, config, cli.format),
        Commands::Render {
            model,
            shape,
            template,
        } => cmd_render(&model, &shape, &template, cli.format).map(|_| true),
        Commands::Path { model, shape, path } => {
            cmd_path(&model, &shape, &path, cli.format).map(|_| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                let output = serde_json::json!({ "error": format!("{:#}", e) });
                println!("{}", output);
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Returns `false` when any event fails the run
fn cmd_validate(model: &Path, config: Option<PathBuf>, format: OutputFormat) -> Result<bool> {
    let model = load_model(model)?;
    let loader = match config {
        Some(path) => ConfigLoader::new(path),
        None => ConfigLoader::from_env(),
    };
    let validators = loader.load_validators()?;
    let events = validate_model(&model, &validators);
    let failed = events.iter().any(ValidationEvent::is_failure);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": !failed,
                "validators": validators.len(),
                "events": events,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("JSON serialization failed")?
            );
        }
        OutputFormat::Text => {
            for event in &events {
                println!("{}", colorize(event));
            }
            let summary = format!(
                "{} event(s) from {} validator(s) over {} shape(s)",
                events.len(),
                validators.len(),
                model.len()
            );
            if failed {
                println!("{} {}", "FAILED".red().bold(), summary);
            } else {
                println!("{} {}", "OK".green().bold(), summary);
            }
        }
    }

    Ok(!failed)
}

fn cmd_render(model: &Path, shape: &str, template: &str, format: OutputFormat) -> Result<()> {
    let model = load_model(model)?;
    let shape_id = parse_shape_id(shape)?;
    let rendered = render_for_shape(&model, &shape_id, template)?;
    print_result(&shape_id, "template", template, &rendered, format);
    Ok(())
}

fn cmd_path(model: &Path, shape: &str, path: &str, format: OutputFormat) -> Result<()> {
    let model = load_model(model)?;
    let shape_id = parse_shape_id(shape)?;
    let value = evaluate_for_shape(&model, &shape_id, path)?;
    print_result(&shape_id, "path", path, &value, format);
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn load_model(path: &Path) -> Result<Model> {
    Model::load(path).with_context(|| format!("Failed to load model '{}'", path.display()))
}

fn parse_shape_id(text: &str) -> Result<ShapeId> {
    ShapeId::parse(text).with_context(|| format!("Invalid --shape '{}'", text))
}

fn print_result(shape_id: &ShapeId, kind: &str, input: &str, output: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let mut object = serde_json::Map::new();
            object.insert("shape".to_string(), shape_id.to_string().into());
            object.insert(kind.to_string(), input.into());
            object.insert("result".to_string(), output.into());
            println!("{}", serde_json::Value::Object(object));
        }
        OutputFormat::Text => println!("{}", output),
    }
}

fn colorize(event: &ValidationEvent) -> String {
    let line = event.to_string();
    match event.severity {
        Severity::Error | Severity::Danger => line.red().to_string(),
        Severity::Warning => line.yellow().to_string(),
        Severity::Note => line.normal().to_string(),
    }
}
