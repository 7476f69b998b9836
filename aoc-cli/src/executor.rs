//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Absent when the input never got parsed
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// One registered day and the parts to run for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs solvers on a dedicated rayon pool
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker needs, shared by reference across the pool
struct ExecutionContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone(), config.example),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Registered days that pass the filters, in (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cx = &self.context;
        cx.registry
            .storage()
            .iter_info()
            .filter(|info| cx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cx.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cx.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Run every work item, sending one result per part to `tx`.
    ///
    /// Solver failures travel inside the results; only delivery problems are
    /// returned here.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cx = &self.context;
        tracing::info!(
            items = work_items.len(),
            threads = self.thread_pool.current_num_threads(),
            mode = ?cx.parallelize_by,
            "starting execution"
        );

        match cx.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_work_item(work, &tx, cx).err())
                .reduce(ArcExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .into_par_iter()
                    .map(|work| run_work_item(&work, &tx, cx).err())
                    .reduce_with(|err1, err2| match (err1, err2) {
                        (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                        (None, e2) => e2,
                    })
                    .flatten()
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match cx.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            tracing::warn!(year, day, error = %source, "input unavailable");
            let error: ArcExecutorError = ExecutorError::Input { year, day, source }.into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if cx.parallelize_by == ParallelizeBy::Part {
        work.parts
            .clone()
            .into_par_iter()
            .map(|part| run_parts(year, day, part..=part, &input, tx, cx).err())
            .reduce_with(|err1, err2| match (err1, err2) {
                (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                (None, e2) => e2,
            })
            .flatten()
            .map_or(Ok(()), Err)
    } else {
        run_parts(year, day, work.parts.clone(), &input, tx, cx)
    }
}

/// Parse once, then solve `parts` in order on the same instance
fn run_parts(
    year: u16,
    day: u8,
    parts: RangeInclusive<u8>,
    input: &str,
    tx: &Sender<SolverResult>,
    cx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let mut solver = match cx.registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            tracing::warn!(year, day, error = %e, "solver could not be created");
            let error: ArcExecutorError = ExecutorError::Solver(e).into();
            for part in parts {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    for part in parts {
        send(tx, solve_part(year, day, part, &mut *solver))?;
    }
    Ok(())
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, ExecutorError::Solver(e.into()).into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverRegistryBuilder;
    use aoc2021_solutions as _;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: Some(2021),
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.path().to_path_buf(),
            example: false,
            thread_count: 2,
            parallelize_by,
            quiet: true,
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_all_plugins()
            .unwrap()
            .build()
    }

    fn write_input(dir: &TempDir, day: u8, content: &str) {
        let year_dir = dir.path().join("2021");
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join(format!("day{:02}.txt", day)), content).unwrap();
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(2), 2), 2..=2);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_work_items_follow_filters() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, ParallelizeBy::Day);
        cfg.day_filter = Some(3);
        cfg.part_filter = Some(2);

        let executor = Executor::new(registry(), &cfg).unwrap();
        assert_eq!(
            executor.collect_work_items(),
            vec![WorkItem {
                year: 2021,
                day: 3,
                parts: 2..=2
            }]
        );
    }

    #[test]
    fn test_every_mode_gives_same_answers() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n");
        write_input(&dir, 3, "00100\n11110\n10110\n10111\n10101\n01111\n00111\n11100\n10000\n11001\n00010\n01010\n");

        for mode in [ParallelizeBy::Sequential, ParallelizeBy::Day, ParallelizeBy::Part] {
            let mut cfg = config(&dir, mode);
            cfg.day_filter = Some(3);
            let executor = Executor::new(registry(), &cfg).unwrap();
            let answers: Vec<_> = run(&executor)
                .into_iter()
                .map(|r| r.answer.unwrap())
                .collect();
            assert_eq!(answers, vec!["198", "230"], "mode {:?}", mode);
        }
    }

    #[test]
    fn test_missing_and_malformed_inputs_fail_their_parts() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "199\n200\n");
        write_input(&dir, 2, "sideways 3\n");

        let mut cfg = config(&dir, ParallelizeBy::Day);
        cfg.day_filter = None;
        let executor = Executor::new(registry(), &cfg).unwrap();
        let results = run(&executor);

        let by_day = |day: u8| results.iter().filter(move |r| r.day == day);
        assert!(by_day(1).all(|r| r.answer.is_ok() && r.parse_duration.is_some()));

        for r in by_day(2) {
            let err = r.answer.as_ref().unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::Solver(_)), "{err}");
        }
        for r in by_day(12) {
            let err = r.answer.as_ref().unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::Input { day: 12, .. }));
            assert!(r.parse_duration.is_none());
        }
        // Every registered 2021 day reports both parts
        assert_eq!(results.len(), executor.collect_work_items().len() * 2);
    }

    #[test]
    fn test_closed_channel_is_an_error() {
        let dir = TempDir::new().unwrap();
        let executor = Executor::new(registry(), &config(&dir, ParallelizeBy::Sequential)).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        assert!(executor.execute(tx).is_err());
    }
}
