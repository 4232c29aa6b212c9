use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use std::fs;
use std::path::{Path, PathBuf};

use crate::conditions::{self, ConditionKind};
use crate::handler::{initialize_form_data, ChangeEvent, FormHandler};
use crate::overrides::build_attribute_overrides;
use crate::schema;
use crate::value::{FormData, Value};

use super::exit_codes;
use super::output::{
    self, EvalData, OutputMode, OverridesData, SimulateData, VerifyData,
};

#[derive(Parser)]
#[command(name = "formflow")]
#[command(about = "A data-driven form rule engine with schema verification CLI")]
#[command(version)]
pub struct Cli {
    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify a form schema file and list its problems
    Verify {
        /// Path to the schema file (.json or .json5)
        schema: PathBuf,
    },

    /// Evaluate a single condition against a value
    Eval {
        /// Value under test, parsed as JSON (bare words become strings)
        value: String,

        /// Condition kind, e.g. "greater than" or "matches"
        when: String,

        /// Value to compare against, parsed as JSON
        #[arg(short, long)]
        compare: Option<String>,
    },

    /// Apply a sequence of field edits and print the resulting form data
    Simulate {
        /// Path to the schema file (.json or .json5)
        schema: PathBuf,

        /// Edit in field=value form, applied in order (value parsed as JSON)
        #[arg(short, long = "set", value_name = "FIELD=VALUE", action = clap::ArgAction::Append)]
        set: Vec<String>,

        /// Also resolve attribute overrides for the final form data
        #[arg(long)]
        overrides: bool,
    },

    /// Resolve attribute overrides for a schema and form data snapshot
    Overrides {
        /// Path to the schema file (.json or .json5)
        schema: PathBuf,

        /// Path to a JSON form data file (defaults to the schema's data)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

pub fn execute(cli: Cli) -> Result<()> {
    let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet);

    match cli.command {
        Commands::Verify { schema: path } => {
            let schema = load_schema(&path, output_mode);
            let problems = schema::verify(&schema);

            if problems.is_empty() {
                if output_mode.is_json() {
                    output::print_json(&VerifyData {
                        action: "verify",
                        schema: path.display().to_string(),
                        valid: true,
                        problems: &[],
                    });
                }
                // silent on success in text/quiet mode (Unix convention)
                Ok(())
            } else {
                if output_mode.is_json() {
                    output::print_json_error_with_problems(
                        exit_codes::SCHEMA_ERROR,
                        "schema failed verification",
                        problems,
                    );
                } else {
                    for problem in &problems {
                        eprintln!("{}", problem);
                    }
                }
                std::process::exit(exit_codes::SCHEMA_ERROR);
            }
        }

        Commands::Eval {
            value,
            when,
            compare,
        } => {
            let value = parse_cli_value(&value);
            let kind = ConditionKind::parse(&when);
            let compare = compare.as_deref().map(parse_cli_value);

            let result = conditions::evaluate(Some(&value), &kind, compare.as_ref())
                .context("condition evaluation failed")?;

            if output_mode.is_json() {
                output::print_json(&EvalData {
                    action: "eval",
                    result,
                });
            } else if !output_mode.is_quiet() {
                println!("{}", result);
            }
            Ok(())
        }

        Commands::Simulate {
            schema: path,
            set,
            overrides: with_overrides,
        } => {
            let schema = load_schema(&path, output_mode);
            let existing = schema.data.clone().unwrap_or_default();
            let mut data = initialize_form_data(&schema.fields, &existing);

            let fields = schema.fields.clone();
            let rules = schema.rules.clone();
            let handler = FormHandler::new(schema.fields, schema.rules);

            for edit in &set {
                let (name, value) = parse_edit(edit, output_mode);
                data = handler
                    .handle_change(&data, ChangeEvent::Value { name, value })
                    .with_context(|| format!("failed to apply edit '{}'", edit))?;
            }

            let overrides = if with_overrides {
                Some(
                    build_attribute_overrides(&fields, &rules, &data)
                        .context("failed to resolve attribute overrides")?,
                )
            } else {
                None
            };

            if output_mode.is_json() {
                output::print_json(&SimulateData {
                    action: "simulate",
                    data: &data,
                    overrides: overrides.as_ref(),
                });
            } else if !output_mode.is_quiet() {
                println!("{}", serde_json::to_string_pretty(&data)?);
                if let Some(overrides) = &overrides {
                    println!("{}", serde_json::to_string_pretty(overrides)?);
                }
            }
            Ok(())
        }

        Commands::Overrides {
            schema: path,
            data: data_path,
        } => {
            let schema = load_schema(&path, output_mode);
            let existing = match &data_path {
                Some(data_path) => load_data(data_path, output_mode),
                None => schema.data.clone().unwrap_or_default(),
            };
            let data = initialize_form_data(&schema.fields, &existing);

            let overrides = build_attribute_overrides(&schema.fields, &schema.rules, &data)
                .context("failed to resolve attribute overrides")?;

            if output_mode.is_json() {
                output::print_json(&OverridesData {
                    action: "overrides",
                    overrides: &overrides,
                });
            } else if !output_mode.is_quiet() {
                println!("{}", serde_json::to_string_pretty(&overrides)?);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "formflow", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// load a schema or exit with SCHEMA_ERROR
fn load_schema(path: &Path, output_mode: OutputMode) -> schema::FormSchema {
    match schema::load(path) {
        Ok(schema) => schema,
        Err(e) => {
            if output_mode.is_json() {
                output::print_json_error(exit_codes::SCHEMA_ERROR, &format!("{:#}", e));
            } else {
                eprintln!("{:#}", e);
            }
            std::process::exit(exit_codes::SCHEMA_ERROR);
        }
    }
}

/// load a form data file or exit with DATA_ERROR
fn load_data(path: &Path, output_mode: OutputMode) -> FormData {
    let result = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))
        .and_then(|content| {
            serde_json::from_str::<FormData>(&content)
                .with_context(|| format!("Failed to parse data file: {}", path.display()))
        });

    match result {
        Ok(data) => data,
        Err(e) => {
            if output_mode.is_json() {
                output::print_json_error(exit_codes::DATA_ERROR, &format!("{:#}", e));
            } else {
                eprintln!("{:#}", e);
            }
            std::process::exit(exit_codes::DATA_ERROR);
        }
    }
}

/// split a FIELD=VALUE edit or exit with INVALID_ARGS
fn parse_edit(edit: &str, output_mode: OutputMode) -> (String, Value) {
    match edit.split_once('=') {
        Some((name, raw)) if !name.is_empty() => (name.to_string(), parse_cli_value(raw)),
        _ => {
            let message = format!("invalid edit '{}': expected FIELD=VALUE", edit);
            if output_mode.is_json() {
                output::print_json_error(exit_codes::INVALID_ARGS, &message);
            } else {
                eprintln!("{}", message);
            }
            std::process::exit(exit_codes::INVALID_ARGS);
        }
    }
}

/// parse a CLI value as JSON, falling back to a bare string
fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
