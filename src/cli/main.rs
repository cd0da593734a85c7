//! Smart Schema CLI

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use smart_schema::cli::commands::InputFormat;
use smart_schema::cli::commands::infer::{InferArgs, handle_infer};
use smart_schema::cli::commands::validate::{ValidateArgs, handle_validate};
use smart_schema::cli::logging::{LogConfig, init_logging};
use smart_schema::cli::output::SchemaFormat;

#[derive(Parser)]
#[command(
    name = "smart-schema",
    version,
    about = "Infer schemas from sample CSV/JSON data and validate records against them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Infer a schema from sample records
    Infer(InferCommand),
    /// Validate records against a schema written by `infer`
    Validate(ValidateCommand),
}

#[derive(Parser)]
struct InferCommand {
    /// Sample file (`-` for stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Input layout (default: from the file extension, else json)
    #[arg(long = "input-format", value_enum)]
    input_format: Option<InputFormatArg>,

    /// Model name
    #[arg(long)]
    name: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: SchemaFormatArg,

    /// Inference config file (.toml, .yaml or .json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the schema to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Examine at most N records (0 = all)
    #[arg(long = "sample-size", value_name = "N")]
    sample_size: Option<usize>,

    /// Treat date-like strings as plain strings
    #[arg(long = "no-datetime")]
    no_datetime: bool,
}

#[derive(Parser)]
struct ValidateCommand {
    /// Schema description file (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    schema: String,

    /// Records to validate (`-` for stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Input layout (default: from the file extension, else json)
    #[arg(long = "input-format", value_enum)]
    input_format: Option<InputFormatArg>,

    /// Report fields the schema does not declare
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormatArg {
    Csv,
    Json,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Csv => InputFormat::Csv,
            InputFormatArg::Json => InputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaFormatArg {
    Json,
    Yaml,
    JsonSchema,
}

impl From<SchemaFormatArg> for SchemaFormat {
    fn from(arg: SchemaFormatArg) -> Self {
        match arg {
            SchemaFormatArg::Json => SchemaFormat::Json,
            SchemaFormatArg::Yaml => SchemaFormat::Yaml,
            SchemaFormatArg::JsonSchema => SchemaFormat::JsonSchema,
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Infer(cmd) => {
            let args = InferArgs {
                input: cmd.input,
                input_format: cmd.input_format.map(Into::into),
                name: cmd.name,
                format: cmd.format.into(),
                config: cmd.config,
                output: cmd.output,
                sample_size: cmd.sample_size,
                no_datetime: cmd.no_datetime,
            };
            handle_infer(&args)?;
            Ok(0)
        }
        Command::Validate(cmd) => {
            let args = ValidateArgs {
                schema: cmd.schema,
                input: cmd.input,
                input_format: cmd.input_format.map(Into::into),
                strict: cmd.strict,
            };
            let valid = handle_validate(&args)?;
            Ok(if valid { 0 } else { 1 })
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let log_config =
        LogConfig::from_verbosity(cli.verbose, cli.quiet).with_ansi(io::stderr().is_terminal());
    init_logging(&log_config);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            2
        }
    };
    std::process::exit(exit_code);
}
