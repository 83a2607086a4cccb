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


//! Harness results and their console rendering.
//!
//! A `BenchmarkReport` holds one `FileReport` per instance file. Each file
//! either failed to load or carries an `InstanceReport` with one `SolverRun`
//! per configured strategy and the verdict of the cross‑check. Files are
//! grouped into categories by name, and every category gets a timing
//! summary per strategy over the runs that completed.

use crate::harness::{CrossValidationError, SolverKind};
use rucksack_core::num::{KnapsackNumeric, as_f64};
use rucksack_model::{error::KnapsackError, solution::Solution};
use rucksack_search::stats::SolverStatistics;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

const RULE_WIDTH: usize = 80;

/// How a single strategy fared on an instance.
#[derive(Debug)]
pub enum RunStatus<T> {
    /// The strategy proved its solution optimal.
    Optimal(Solution<T>),
    /// A monitor stopped the strategy; the string says why.
    Aborted(String),
    /// The strategy refused the instance, e.g. because its table would not
    /// fit the memory budget.
    Failed(KnapsackError),
}

/// One strategy applied to one instance.
#[derive(Debug)]
pub struct SolverRun<T> {
    kind: SolverKind,
    status: RunStatus<T>,
    elapsed: Duration,
    statistics: Option<SolverStatistics>,
}

impl<T> SolverRun<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    pub fn new(
        kind: SolverKind,
        status: RunStatus<T>,
        elapsed: Duration,
        statistics: Option<SolverStatistics>,
    ) -> Self {
        Self {
            kind,
            status,
            elapsed,
            statistics,
        }
    }

    #[inline]
    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    #[inline]
    pub fn status(&self) -> &RunStatus<T> {
        &self.status
    }

    /// Wall time spent by the strategy.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Search statistics; absent if the strategy failed before searching.
    #[inline]
    pub fn statistics(&self) -> Option<&SolverStatistics> {
        self.statistics.as_ref()
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match &self.status {
            RunStatus::Optimal(solution) => Some(solution),
            _ => None,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<T> {
        self.solution().map(Solution::value)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.status, RunStatus::Optimal(_))
    }
}

impl<T> std::fmt::Display for SolverRun<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            RunStatus::Optimal(_) => write!(f, "{}: {}", self.kind, Millis(self.elapsed)),
            RunStatus::Aborted(reason) => write!(f, "{}: aborted ({})", self.kind, reason),
            RunStatus::Failed(error) => write!(f, "{}: failed ({})", self.kind, error),
        }
    }
}

/// All strategies applied to one loaded instance.
#[derive(Debug)]
pub struct InstanceReport<T> {
    num_items: usize,
    weight_capacity: T,
    volume_capacity: Option<T>,
    runs: Vec<SolverRun<T>>,
    verdict: Result<Option<T>, CrossValidationError>,
}

impl<T> InstanceReport<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    pub fn new(
        num_items: usize,
        weight_capacity: T,
        volume_capacity: Option<T>,
        runs: Vec<SolverRun<T>>,
        verdict: Result<Option<T>, CrossValidationError>,
    ) -> Self {
        Self {
            num_items,
            weight_capacity,
            volume_capacity,
            runs,
            verdict,
        }
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    #[inline]
    pub fn weight_capacity(&self) -> T {
        self.weight_capacity
    }

    #[inline]
    pub fn volume_capacity(&self) -> Option<T> {
        self.volume_capacity
    }

    #[inline]
    pub fn runs(&self) -> &[SolverRun<T>] {
        &self.runs
    }

    /// Returns the run of `kind`, if that strategy was configured.
    #[inline]
    pub fn run(&self, kind: SolverKind) -> Option<&SolverRun<T>> {
        self.runs.iter().find(|run| run.kind() == kind)
    }

    /// The cross‑check verdict: the optimum every completed strategy agreed
    /// on (`None` if none completed), or what went wrong.
    #[inline]
    pub fn verdict(&self) -> &Result<Option<T>, CrossValidationError> {
        &self.verdict
    }

    /// Returns the agreed optimum, if the strategies agreed and at least one
    /// completed.
    #[inline]
    pub fn agreed_value(&self) -> Option<T> {
        self.verdict.as_ref().ok().copied().flatten()
    }

    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.verdict.is_ok()
    }
}

/// The result of processing one instance file.
#[derive(Debug)]
pub struct FileReport<T> {
    path: PathBuf,
    name: String,
    category: String,
    result: Result<InstanceReport<T>, KnapsackError>,
}

impl<T> FileReport<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    pub fn new(
        path: PathBuf,
        name: String,
        category: String,
        result: Result<InstanceReport<T>, KnapsackError>,
    ) -> Self {
        Self {
            path,
            name,
            category,
            result,
        }
    }

    #[inline]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The file name without directories.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The instance report, or the error that prevented loading the file.
    #[inline]
    pub fn result(&self) -> Result<&InstanceReport<T>, &KnapsackError> {
        self.result.as_ref()
    }

    #[inline]
    pub fn instance(&self) -> Option<&InstanceReport<T>> {
        self.result.as_ref().ok()
    }
}

impl<T> std::fmt::Display for FileReport<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report = match &self.result {
            Ok(report) => report,
            Err(error) => return write!(f, "ERR {:30} | {}", self.name, error),
        };

        match report.verdict() {
            Ok(Some(value)) => write!(f, "OK  {:30} | value: {:>8}", self.name, value)?,
            Ok(None) => write!(f, "--  {:30} | value: {:>8}", self.name, "n/a")?,
            Err(error) => write!(f, "BAD {:30} | {}", self.name, error)?,
        }
        for run in report.runs() {
            write!(f, " | {}", run)?;
        }
        Ok(())
    }
}

/// Displays a duration as milliseconds with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Millis(Duration);

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}ms", self.0.as_secs_f64() * 1000.0)
    }
}

/// Summary statistics over a set of run times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub count: usize,
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Sample standard deviation; zero for a single sample.
    pub std_dev: Duration,
}

impl TimingSummary {
    /// Summarizes `samples`, or returns `None` if there are none.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2
        } else {
            sorted[mid]
        };

        let secs: Vec<f64> = sorted.iter().map(Duration::as_secs_f64).collect();
        let mean = secs.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let squares: f64 = secs.iter().map(|s| (s - mean) * (s - mean)).sum();
            (squares / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count,
            mean: Duration::from_secs_f64(mean),
            median,
            min: sorted[0],
            max: sorted[count - 1],
            std_dev: Duration::from_secs_f64(std_dev),
        })
    }
}

impl std::fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mean {} | median {} | min-max {} - {} | std dev {} | runs {}",
            Millis(self.mean),
            Millis(self.median),
            Millis(self.min),
            Millis(self.max),
            Millis(self.std_dev),
            self.count
        )
    }
}

/// Aggregates over all files of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    pub category: String,
    pub instances: usize,
    /// Files that failed to load or whose strategies disagreed.
    pub failures: usize,
    /// One summary per strategy that completed at least once.
    pub timings: Vec<(SolverKind, TimingSummary)>,
    /// Mean of the agreed optima, if any file produced one.
    pub mean_value: Option<f64>,
}

impl std::fmt::Display for CategoryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  Instances: {} ({} failed)", self.instances, self.failures)?;
        for (kind, summary) in &self.timings {
            writeln!(f, "  {:<14} {}", kind.to_string(), summary)?;
        }
        match self.mean_value {
            Some(mean) => writeln!(f, "  Mean value: {:.2}", mean),
            None => writeln!(f, "  Mean value: n/a"),
        }
    }
}

/// The result of a harness run over many files.
#[derive(Debug)]
pub struct BenchmarkReport<T> {
    files: Vec<FileReport<T>>,
}

impl<T> BenchmarkReport<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    pub fn new(files: Vec<FileReport<T>>) -> Self {
        Self { files }
    }

    #[inline]
    pub fn files(&self) -> &[FileReport<T>] {
        &self.files
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files that could not be loaded.
    pub fn load_failures(&self) -> impl Iterator<Item = &FileReport<T>> {
        self.files.iter().filter(|file| file.result().is_err())
    }

    /// Files whose strategies disagreed or returned an invalid selection.
    pub fn inconsistencies(&self) -> impl Iterator<Item = &FileReport<T>> {
        self.files
            .iter()
            .filter(|file| file.instance().is_some_and(|report| !report.is_consistent()))
    }

    /// Returns `true` if every file loaded and every cross‑check passed.
    pub fn is_clean(&self) -> bool {
        self.load_failures().next().is_none() && self.inconsistencies().next().is_none()
    }

    fn grouped(&self) -> BTreeMap<&str, Vec<&FileReport<T>>> {
        let mut groups: BTreeMap<&str, Vec<&FileReport<T>>> = BTreeMap::new();
        for file in &self.files {
            groups.entry(file.category()).or_default().push(file);
        }
        groups
    }

    /// Aggregates the files per category, sorted by category name.
    pub fn categories(&self) -> Vec<CategoryReport> {
        self.grouped()
            .into_iter()
            .map(|(category, files)| summarize_category(category, &files))
            .collect()
    }
}

fn summarize_category<T>(category: &str, files: &[&FileReport<T>]) -> CategoryReport
where
    T: KnapsackNumeric,
{
    let mut samples: BTreeMap<SolverKind, Vec<Duration>> = BTreeMap::new();
    let mut values = Vec::new();
    let mut failures = 0;

    for file in files {
        let Some(report) = file.instance().filter(|report| report.is_consistent()) else {
            failures += 1;
            continue;
        };
        for run in report.runs().iter().filter(|run| run.is_optimal()) {
            samples.entry(run.kind()).or_default().push(run.elapsed());
        }
        if let Some(value) = report.agreed_value() {
            values.push(as_f64(value));
        }
    }

    let timings = samples
        .into_iter()
        .filter_map(|(kind, times)| TimingSummary::from_samples(&times).map(|s| (kind, s)))
        .collect();
    let mean_value =
        (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);

    CategoryReport {
        category: category.to_string(),
        instances: files.len(),
        failures,
        timings,
        mean_value,
    }
}

impl<T> std::fmt::Display for BenchmarkReport<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", heavy)?;
        writeln!(f, "KNAPSACK BENCHMARK ({} files)", self.files.len())?;
        writeln!(f, "{}", heavy)?;
        for (category, files) in self.grouped() {
            writeln!(f)?;
            writeln!(f, "Category: {}", category)?;
            writeln!(f, "{}", light)?;
            for file in &files {
                writeln!(f, "  {}", file)?;
            }
            writeln!(f)?;
            write!(f, "{}", summarize_category(category, &files))?;
        }
        Ok(())
    }
}
