use std::env;
use std::path::PathBuf;

use mann_whitney_exact::{GeneratorConfig, MannWhitneyError, Result};

use examples::{compare_random_samples, generate_table};
mod examples;

fn parse_usize(flag: &str, value: Option<&String>) -> Result<usize> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| MannWhitneyError::InvalidConfig(format!("{} expects a number", flag)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("generate");

    let mut config_path: Option<PathBuf> = None;
    let mut min_size: Option<usize> = None;
    let mut max_size: Option<usize> = None;
    let mut output: Option<PathBuf> = None;
    let mut table = PathBuf::from("table_mw.txt");
    let mut size = 7;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = iter.next().map(PathBuf::from),
            "--min" => min_size = Some(parse_usize("--min", iter.next())?),
            "--max" => max_size = Some(parse_usize("--max", iter.next())?),
            "--out" => output = iter.next().map(PathBuf::from),
            "--table" => {
                if let Some(value) = iter.next() {
                    table = PathBuf::from(value);
                }
            }
            "--size" => size = parse_usize("--size", iter.next())?,
            other => {
                return Err(MannWhitneyError::InvalidConfig(format!(
                    "unknown argument '{}'",
                    other
                )))
            }
        }
    }

    match command {
        "generate" => {
            let mut config = match config_path {
                Some(path) => GeneratorConfig::from_json_file(path)?,
                None => GeneratorConfig::default(),
            };
            if let Some(min_size) = min_size {
                config.min_size = min_size;
            }
            if let Some(max_size) = max_size {
                config.max_size = max_size;
            }
            if let Some(output) = output {
                config.output = output;
            }
            generate_table(&config)
        }
        "demo" => compare_random_samples(&table, size),
        other => Err(MannWhitneyError::InvalidConfig(format!(
            "unknown command '{}' (expected 'generate' or 'demo')",
            other
        ))),
    }
}
