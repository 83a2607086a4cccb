// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! # Cross‑Validating Benchmark Harness
//!
//! Loads instance files, solves each one with every configured strategy and
//! checks that the strategies agree.
//!
//! ## Highlights
//!
//! - Execution:
//!   - Files are distributed over a pool of `std::thread::scope` workers that
//!     pull the next file index from an `AtomicUsize`.
//!   - Each strategy gets its own `CompositeMonitor` with the interrupt flag
//!     and the optional time and node limits.
//! - Verification:
//!   - Every completed selection must be feasible and worth what the strategy
//!     claims.
//!   - All completed strategies must report the same optimum.
//! - Error handling:
//!   - A file that fails to load, or a strategy that refuses an instance, is
//!     recorded in the report and the run continues.
//! - Grouping:
//!   - A file named `<category>_<n>.txt` belongs to `<category>`; other names
//!     form a category of their own.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rucksack_solver::harness::{HarnessBuilder, SolverKind};
//! use std::time::Duration;
//!
//! let harness = HarnessBuilder::<i64>::new()
//!     .with_solvers([SolverKind::DynamicProgramming, SolverKind::BranchAndBound])
//!     .with_time_limit(Duration::from_secs(10))
//!     .build();
//!
//! let report = harness.run_directory("instances").unwrap();
//! println!("{}", report);
//! assert!(report.is_clean());
//! ```

use crate::report::{BenchmarkReport, FileReport, InstanceReport, RunStatus, SolverRun};
use regex::Regex;
use rucksack_backtrack::{backtrack::BacktrackingSolver, remaining::RemainingValueBound};
use rucksack_bnb::bnb::BnbSolver;
use rucksack_core::num::KnapsackNumeric;
use rucksack_dp::{dp::DpSolver, table::TableLayout};
use rucksack_model::{
    error::KnapsackError,
    instance::Instance,
    loading::{InstanceFormat, InstanceLoader},
};
use rucksack_search::{
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, log::LogMonitor,
        node_limit::NodeLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::{SolverOutcome, TerminationReason},
};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Progress clocks are read once every 4096 nodes.
const PROGRESS_CLOCK_MASK: u64 = 4095;

static CATEGORY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<category>.+)_\d+\.txt$").expect("category pattern is a valid regex")
});

/// Returns the category of an instance file name: the part before the
/// trailing `_<n>.txt`, or the name without extension if there is none.
pub fn category_of(file_name: &str) -> String {
    if let Some(captures) = CATEGORY_PATTERN.captures(file_name) {
        return captures["category"].to_string();
    }
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// The exact strategies the harness can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SolverKind {
    DynamicProgramming,
    BranchAndBound,
    Backtracking,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [
        SolverKind::DynamicProgramming,
        SolverKind::BranchAndBound,
        SolverKind::Backtracking,
    ];
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::DynamicProgramming => write!(f, "DP"),
            SolverKind::BranchAndBound => write!(f, "BnB"),
            SolverKind::Backtracking => write!(f, "Backtracking"),
        }
    }
}

/// A failed cross‑check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossValidationError {
    #[error("solvers disagree on the optimum: {values}")]
    Disagreement { values: String },
    #[error("{solver} returned a selection that violates a capacity")]
    InfeasibleSelection { solver: SolverKind },
    #[error("{solver} claims value {claimed} but its selection is worth {actual}")]
    ValueMismatch {
        solver: SolverKind,
        claimed: String,
        actual: String,
    },
}

/// Checks every completed run against `instance` and against each other.
///
/// Returns the common optimum, or `None` if no run completed.
pub fn cross_validate<T>(
    instance: &Instance<T>,
    runs: &[SolverRun<T>],
) -> Result<Option<T>, CrossValidationError>
where
    T: KnapsackNumeric,
{
    let mut agreed: Option<T> = None;
    let mut disagreement = false;

    for run in runs {
        let Some(solution) = run.solution() else {
            continue;
        };
        if !instance.is_feasible(solution.selected()) {
            return Err(CrossValidationError::InfeasibleSelection { solver: run.kind() });
        }
        let (_, _, actual) = instance.selection_totals(solution.selected());
        if actual != solution.value() {
            return Err(CrossValidationError::ValueMismatch {
                solver: run.kind(),
                claimed: solution.value().to_string(),
                actual: actual.to_string(),
            });
        }
        match agreed {
            None => agreed = Some(actual),
            Some(value) if value != actual => disagreement = true,
            Some(_) => {}
        }
    }

    if disagreement {
        let values = runs
            .iter()
            .filter_map(|run| run.value().map(|value| format!("{}={}", run.kind(), value)))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CrossValidationError::Disagreement { values });
    }
    Ok(agreed)
}

/// Configures a `Harness`.
#[derive(Debug, Clone)]
pub struct HarnessBuilder<T> {
    solvers: Vec<SolverKind>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    progress_interval: Option<Duration>,
    dp: DpSolver<T>,
    backtracking_bound: RemainingValueBound,
    threads: usize,
    format: InstanceFormat,
}

impl<T> Default for HarnessBuilder<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HarnessBuilder<T>
where
    T: KnapsackNumeric,
{
    /// Starts with all strategies, no limits, the default table budget, the
    /// dual instance format and one worker per available core.
    #[inline]
    pub fn new() -> Self {
        Self {
            solvers: SolverKind::ALL.to_vec(),
            time_limit: None,
            node_limit: None,
            progress_interval: None,
            dp: DpSolver::new(),
            backtracking_bound: RemainingValueBound::default(),
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            format: InstanceFormat::Dual,
        }
    }

    /// Replaces the strategy set. Duplicates are ignored; the order is kept.
    pub fn with_solvers<I>(mut self, solvers: I) -> Self
    where
        I: IntoIterator<Item = SolverKind>,
    {
        self.solvers.clear();
        for kind in solvers {
            if !self.solvers.contains(&kind) {
                self.solvers.push(kind);
            }
        }
        self
    }

    /// Limits the wall time of each strategy on each instance.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Limits the nodes (table cells for the dynamic program) of each
    /// strategy on each instance.
    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Logs a progress table at `info` level at most once per `interval`
    /// while a strategy runs.
    #[inline]
    pub fn with_progress_log(mut self, interval: Duration) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    #[inline]
    pub fn with_dp_memory_budget(mut self, bytes: usize) -> Self {
        self.dp = self.dp.with_memory_budget(bytes);
        self
    }

    #[inline]
    pub fn with_dp_layout(mut self, layout: TableLayout) -> Self {
        self.dp = self.dp.with_layout(layout);
        self
    }

    #[inline]
    pub fn with_backtracking_bound(mut self, bound: RemainingValueBound) -> Self {
        self.backtracking_bound = bound;
        self
    }

    /// Sets the number of worker threads; zero is treated as one.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Sets the layout of the instance files.
    #[inline]
    pub fn with_format(mut self, format: InstanceFormat) -> Self {
        self.format = format;
        self
    }

    #[inline]
    pub fn build(self) -> Harness<T> {
        Harness {
            solvers: self.solvers,
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            progress_interval: self.progress_interval,
            dp: self.dp,
            backtracking_bound: self.backtracking_bound,
            threads: self.threads,
            loader: InstanceLoader::new().with_format(self.format),
            stop_signal: AtomicBool::new(false),
        }
    }
}

/// Runs the configured strategies over instances and cross‑checks them.
#[derive(Debug)]
pub struct Harness<T> {
    solvers: Vec<SolverKind>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    progress_interval: Option<Duration>,
    dp: DpSolver<T>,
    backtracking_bound: RemainingValueBound,
    threads: usize,
    loader: InstanceLoader<T>,
    /// Once set, every running and future solve stops at its next poll.
    stop_signal: AtomicBool,
}

impl<T> Harness<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    pub fn solvers(&self) -> &[SolverKind] {
        &self.solvers
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Asks all solves to stop. Stopped strategies are reported as aborted.
    #[inline]
    pub fn interrupt(&self) {
        self.stop_signal.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.stop_signal.load(Ordering::Relaxed)
    }

    /// Builds the monitor stack for one strategy run.
    fn monitor(&self) -> CompositeMonitor<'_, T> {
        let mut monitor = CompositeMonitor::new();
        monitor.add_monitor(InterruptMonitor::new(&self.stop_signal));
        if let Some(limit) = self.time_limit {
            monitor.add_monitor(TimeLimitMonitor::with_default_check_interval(limit));
        }
        if let Some(limit) = self.node_limit {
            monitor.add_monitor(NodeLimitMonitor::new(limit));
        }
        if let Some(interval) = self.progress_interval {
            monitor.add_monitor(LogMonitor::new(interval, PROGRESS_CLOCK_MASK));
        }
        monitor
    }

    fn run_solver(&self, kind: SolverKind, instance: &Instance<T>) -> SolverRun<T> {
        let start_time = Instant::now();
        let monitor = self.monitor();
        let outcome: Result<SolverOutcome<T>, KnapsackError> = match kind {
            SolverKind::DynamicProgramming => self.dp.solve_with_monitor(instance, monitor),
            SolverKind::BranchAndBound => Ok(BnbSolver::preallocated(instance.num_items())
                .solve_with_monitor(instance, monitor)),
            SolverKind::Backtracking => Ok(BacktrackingSolver::preallocated(
                self.backtracking_bound,
                instance.num_items(),
            )
            .solve_with_monitor(instance, monitor)),
        };

        match outcome {
            Ok(outcome) => {
                let statistics = outcome.statistics().clone();
                let elapsed = outcome.elapsed();
                let reason = outcome.reason().clone();
                let status = match (outcome.into_solution(), reason) {
                    (Some(solution), _) => RunStatus::Optimal(solution),
                    (None, TerminationReason::Aborted(msg)) => RunStatus::Aborted(msg),
                    (None, TerminationReason::OptimalityProven) => {
                        RunStatus::Aborted("finished without a solution".to_string())
                    }
                };
                SolverRun::new(kind, status, elapsed, Some(statistics))
            }
            Err(error) => {
                log::warn!("{} refused the instance: {}", kind, error);
                SolverRun::new(kind, RunStatus::Failed(error), start_time.elapsed(), None)
            }
        }
    }

    /// Solves `instance` with every configured strategy and cross‑checks the
    /// results.
    pub fn run_instance(&self, instance: &Instance<T>) -> InstanceReport<T> {
        let runs: Vec<SolverRun<T>> = self
            .solvers
            .iter()
            .map(|&kind| self.run_solver(kind, instance))
            .collect();
        let verdict = cross_validate(instance, &runs);
        InstanceReport::new(
            instance.num_items(),
            instance.weight_capacity(),
            instance.volume_capacity(),
            runs,
            verdict,
        )
    }

    /// Loads and solves one instance file. Load errors end up in the report.
    pub fn run_file(&self, path: &Path) -> FileReport<T> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let category = category_of(&name);

        let result = self
            .loader
            .from_path(path)
            .map(|instance| self.run_instance(&instance));
        match &result {
            Ok(report) => match report.verdict() {
                Ok(value) => log::info!("{}: optimum {:?}", name, value),
                Err(error) => log::warn!("{}: {}", name, error),
            },
            Err(error) => log::warn!("{}: {}", name, error),
        }

        FileReport::new(path.to_path_buf(), name, category, result)
    }

    /// Solves all `paths` on the worker pool. The report keeps the order of
    /// `paths`.
    pub fn run_files(&self, paths: &[PathBuf]) -> BenchmarkReport<T> {
        let workers = self.threads.min(paths.len()).max(1);
        let next = &AtomicUsize::new(0);

        let mut indexed: Vec<(usize, FileReport<T>)> = Vec::with_capacity(paths.len());
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        loop {
                            let index = next.fetch_add(1, Ordering::Relaxed);
                            let Some(path) = paths.get(index) else {
                                break;
                            };
                            done.push((index, self.run_file(path)));
                        }
                        done
                    })
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(done) => indexed.extend(done),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }
        });

        indexed.sort_unstable_by_key(|(index, _)| *index);
        BenchmarkReport::new(indexed.into_iter().map(|(_, report)| report).collect())
    }

    /// Solves every `*.txt` file in `dir`, in file name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read. Errors of individual
    /// files are recorded in the report.
    pub fn run_directory<P>(&self, dir: P) -> std::io::Result<BenchmarkReport<T>>
    where
        P: AsRef<Path>,
    {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                paths.push(path);
            }
        }
        paths.sort();
        log::info!(
            "harness: {} files in {} on {} threads",
            paths.len(),
            dir.as_ref().display(),
            self.threads.min(paths.len()).max(1)
        );
        Ok(self.run_files(&paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rucksack_model::{index::ItemIndex, solution::Solution};

    type IntegerType = i64;

    fn scenario() -> Instance<IntegerType> {
        Instance::from_sequences(50, 60, &[10, 20, 30], &[20, 25, 30], &[60, 100, 120])
            .expect("valid instance")
    }

    fn run(kind: SolverKind, value: IntegerType, selected: &[usize]) -> SolverRun<IntegerType> {
        SolverRun::new(
            kind,
            RunStatus::Optimal(Solution::new(
                value,
                selected.iter().copied().map(ItemIndex::new).collect(),
            )),
            Duration::ZERO,
            None,
        )
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("small_3.txt"), "small");
        assert_eq!(category_of("n10_tight_12.txt"), "n10_tight");
        assert_eq!(category_of("lonely.txt"), "lonely");
        assert_eq!(category_of("weird_x.txt"), "weird_x");
    }

    #[test]
    fn test_builder_defaults_and_dedup() {
        let harness = HarnessBuilder::<IntegerType>::new()
            .with_solvers([
                SolverKind::Backtracking,
                SolverKind::DynamicProgramming,
                SolverKind::Backtracking,
            ])
            .with_threads(0)
            .with_node_limit(10)
            .build();
        assert_eq!(
            harness.solvers(),
            &[SolverKind::Backtracking, SolverKind::DynamicProgramming]
        );
        assert_eq!(harness.threads(), 1);
        assert_eq!(harness.node_limit(), Some(10));
        assert_eq!(harness.time_limit(), None);
        assert!(!harness.is_interrupted());
    }

    #[test]
    fn test_run_instance_agrees_on_scenario() {
        let harness = HarnessBuilder::new().with_threads(1).build();
        let report = harness.run_instance(&scenario());
        assert_eq!(report.runs().len(), 3);
        assert!(report.runs().iter().all(|run| run.is_optimal()));
        assert_eq!(report.agreed_value(), Some(220));
        assert_eq!(report.num_items(), 3);
        assert_eq!(report.volume_capacity(), Some(60));
    }

    #[test]
    fn test_cross_validate_detects_problems() {
        let instance = scenario();

        let agree = [
            run(SolverKind::DynamicProgramming, 220, &[0, 1]),
            run(SolverKind::BranchAndBound, 220, &[0, 1]),
        ];
        assert_eq!(cross_validate(&instance, &agree), Ok(Some(220)));

        let misreported = [
            run(SolverKind::DynamicProgramming, 220, &[0, 1]),
            run(SolverKind::BranchAndBound, 200, &[0, 1]),
        ];
        assert!(matches!(
            cross_validate(&instance, &misreported),
            Err(CrossValidationError::ValueMismatch { solver: SolverKind::BranchAndBound, .. })
        ));

        let different_optima = [
            run(SolverKind::DynamicProgramming, 220, &[0, 1]),
            run(SolverKind::Backtracking, 180, &[0, 2]),
        ];
        match cross_validate(&instance, &different_optima) {
            Err(CrossValidationError::Disagreement { values }) => {
                assert_eq!(values, "DP=220, Backtracking=180");
            }
            other => panic!("expected disagreement, got {other:?}"),
        }

        let overloaded = [run(SolverKind::Backtracking, 280, &[0, 1, 2])];
        assert_eq!(
            cross_validate(&instance, &overloaded),
            Err(CrossValidationError::InfeasibleSelection {
                solver: SolverKind::Backtracking
            })
        );

        assert_eq!(cross_validate::<IntegerType>(&instance, &[]), Ok(None));
    }

    #[test]
    fn test_budget_failure_is_recorded_not_fatal() {
        let harness = HarnessBuilder::new()
            .with_dp_memory_budget(16)
            .with_threads(1)
            .build();
        let report = harness.run_instance(&scenario());
        let dp = report.run(SolverKind::DynamicProgramming).expect("configured");
        match dp.status() {
            RunStatus::Failed(error) => assert!(error.is_resource_exhausted()),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(report.agreed_value(), Some(220));
    }

    #[test]
    fn test_progress_log_does_not_change_results() {
        let harness = HarnessBuilder::new()
            .with_progress_log(Duration::ZERO)
            .with_threads(1)
            .build();
        let report = harness.run_instance(&scenario());
        assert_eq!(report.agreed_value(), Some(220));
    }

    #[test]
    fn test_interrupted_harness_aborts_every_strategy() {
        let harness = HarnessBuilder::new().with_threads(1).build();
        harness.interrupt();
        let report = harness.run_instance(&scenario());
        assert!(
            report
                .runs()
                .iter()
                .all(|run| matches!(run.status(), RunStatus::Aborted(_)))
        );
        assert_eq!(report.verdict(), &Ok(None));
    }
}
