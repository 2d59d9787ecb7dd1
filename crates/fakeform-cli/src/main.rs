mod history;

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use fakeform_generate::{
    sampler, Expression, FormatProcessor, GenerateError, OutputFormat, Params, ProviderRegistry,
};

const DEFAULT_COUNT: i64 = 3;
const MAX_COUNT: i64 = 10_000;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "fakeform",
    version,
    about = "Synthetic test data from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate formatted sample records.
    Sample(SampleArgs),
    /// List registered providers and their operations.
    Providers(ProvidersArgs),
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Expressions such as 'svnr.svnr' or '#{person.full_name}'.
    /// Defaults to a name-and-address sample when omitted.
    #[arg(value_name = "EXPRESSION")]
    expressions: Vec<String>,
    /// Sample every parameterless operation of these providers instead
    /// of evaluating expressions.
    #[arg(
        long = "provider",
        value_name = "NAME",
        conflicts_with = "expressions"
    )]
    providers: Vec<String>,
    /// Count of records. Zero and below fall back to the default;
    /// values above 10000 are clamped.
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    count: i64,
    /// Output format: txt, csv, tsv, json, sql, xml, or yaml.
    #[arg(short, long, default_value = "csv", value_parser = parse_format)]
    format: OutputFormat,
    /// Format parameters, e.g. 'header=false,separator=;'.
    #[arg(long, value_name = "PARAMS", default_value = "")]
    format_parameter: String,
    /// Write the rendered output to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output_file: Option<PathBuf>,
    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Append this invocation to .fakeform_history.
    #[arg(long, default_value_t = false)]
    history: bool,
}

#[derive(Args, Debug)]
struct ProvidersArgs {
    /// Emit the catalog as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_format(value: &str) -> Result<OutputFormat, GenerateError> {
    value.parse()
}

fn main() -> Result<(), CliError> {
    init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Sample(args) => run_sample(args),
        Command::Providers(args) => run_providers(args),
    }
}

fn init_logging() -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_env("FAKEFORM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn run_sample(args: SampleArgs) -> Result<(), CliError> {
    let run_id = Uuid::new_v4().to_string();
    let registry = ProviderRegistry::new();

    let expressions = if !args.providers.is_empty() {
        sampler::provider_expressions(&registry, &args.providers)?
    } else if args.expressions.is_empty() {
        sampler::sample_expressions()
    } else {
        args.expressions
            .iter()
            .map(|input| Expression::parse(input))
            .collect::<Result<Vec<_>, _>>()?
    };

    let count = normalize_count(args.count);
    let format_params = Params::parse(&args.format_parameter);

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        format = %args.format,
        count,
        fields = expressions.len()
    );

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    let processor = FormatProcessor::new(&registry, expressions, count);
    let output = processor.render(args.format, &format_params, rng.as_mut())?;

    match &args.output_file {
        Some(path) => {
            fs::write(path, &output)?;
            tracing::info!(event = "output_written", run_id = %run_id, path = %path.display());
        }
        None => {
            if output.ends_with('\n') {
                print!("{output}");
            } else {
                println!("{output}");
            }
        }
    }

    if args.history {
        history::append_invocation(std::env::args().skip(1))?;
        tracing::info!(event = "history_appended", run_id = %run_id);
    }

    tracing::info!(event = "run_finished", run_id = %run_id, status = "success");
    Ok(())
}

fn run_providers(args: ProvidersArgs) -> Result<(), CliError> {
    let registry = ProviderRegistry::new();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry.catalog())?);
        return Ok(());
    }

    for name in registry.provider_names() {
        println!("{name}");
        let Some(provider) = registry.provider(name) else {
            continue;
        };
        for operation in provider.operations() {
            if operation.params.is_empty() {
                println!("  {}", operation.name);
            } else {
                println!("  {} (params: {})", operation.name, operation.params.join(", "));
            }
        }
    }
    Ok(())
}

fn normalize_count(count: i64) -> usize {
    if count <= 0 {
        DEFAULT_COUNT as usize
    } else if count > MAX_COUNT {
        MAX_COUNT as usize
    } else {
        count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_normalization_applies_default_and_cap() {
        assert_eq!(normalize_count(-1), 3);
        assert_eq!(normalize_count(0), 3);
        assert_eq!(normalize_count(7), 7);
        assert_eq!(normalize_count(10_000), 10_000);
        assert_eq!(normalize_count(10_001), 10_000);
    }

    #[test]
    fn cli_parses_sample_defaults() {
        let cli = Cli::try_parse_from(["fakeform", "sample"]).expect("valid args");
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.count, DEFAULT_COUNT);
                assert_eq!(args.format, OutputFormat::Csv);
                assert!(args.expressions.is_empty());
                assert!(!args.history);
            }
            other => panic!("expected sample command, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["fakeform", "sample", "--format", "html"]);
        assert!(result.is_err());
    }

    #[test]
    fn provider_flag_conflicts_with_expressions() {
        let result = Cli::try_parse_from([
            "fakeform",
            "sample",
            "svnr.svnr",
            "--provider",
            "care",
        ]);
        assert!(result.is_err());
    }
}
