//! `aoc` - runs the registered Advent of Code 2021 solvers on local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Linking the solutions crate is what submits its solver plugins
use aoc2021_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use output::OutputFormatter;

/// `--quiet` silences logs entirely, `--verbose` honours `RUST_LOG`
/// (falling back to `info`), otherwise only warnings reach stderr
fn init_tracing(args: &Args) {
    let filter = if args.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if args.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    tracing::debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let formatter = OutputFormatter::new(config.quiet);
    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .map(|w| (w.year, w.day, executor.inputs().path(w.year, w.day)))
        .collect();
    formatter.print_missing_inputs(&missing);

    run_executor(executor, &work_items, formatter)
}

/// Stream results in order while the executor runs on its own thread
fn run_executor(
    executor: Executor,
    work_items: &[WorkItem],
    formatter: OutputFormatter,
) -> Result<(), CliError> {
    let expected_keys: Vec<ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();
    tracing::info!(parts = expected_keys.len(), "running solvers");

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();
    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    for key in aggregator.missing() {
        tracing::warn!(year = key.year, day = key.day, part = key.part, "no result received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    Ok(())
}

/// All plugins, or only those carrying every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_every_2021_day() {
        let registry = build_registry(&[]).unwrap();
        let days: Vec<u8> = registry
            .storage()
            .iter_info()
            .filter(|info| info.year == 2021)
            .map(|info| info.day)
            .collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_tags_must_all_match() {
        let registry = build_registry(&["grid".to_string()]).unwrap();
        let days: Vec<u8> = registry.storage().iter_info().map(|info| info.day).collect();
        assert_eq!(days, vec![9, 11]);

        let registry = build_registry(&["grid".to_string(), "simulation".to_string()]).unwrap();
        let days: Vec<u8> = registry.storage().iter_info().map(|info| info.day).collect();
        assert_eq!(days, vec![11]);

        let registry = build_registry(&["no-such-tag".to_string()]).unwrap();
        assert!(registry.storage().is_empty());
    }
}
