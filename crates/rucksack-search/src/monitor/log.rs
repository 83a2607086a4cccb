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


use crate::{
    monitor::search_monitor::{PruneReason, SearchMonitor},
    stats::SolverStatistics,
};
use rucksack_core::num::KnapsackNumeric;
use rucksack_model::instance::Instance;
use std::time::{Duration, Instant};

/// Prints a progress table through the `log` facade at `info` level.
///
/// The clock is read only when `nodes_explored & clock_check_mask == 0`, and
/// a line is emitted at most once per `log_interval`.
#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_value: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: KnapsackNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_value: None,
        }
    }

    #[inline(always)]
    fn log_header(&self) {
        ::log::info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<14}",
            "Elapsed",
            "Nodes",
            "Depth",
            "Best Value",
            "Pruned (Inf)",
            "Pruned (Bound)"
        );
        ::log::info!("{}", "-".repeat(89));
    }

    #[inline(always)]
    fn log_line(&mut self, statistics: &SolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match &self.best_value {
            Some(value) => format!("{}", value),
            None => "-".to_string(),
        };

        ::log::info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<14}",
            format!("{:.1}s", elapsed),
            statistics.nodes_explored,
            statistics.max_depth,
            best,
            statistics.prunings_infeasible,
            statistics.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: KnapsackNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: KnapsackNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_value = None;
        ::log::info!("Searching {}", instance);
        self.log_header();
    }

    fn on_step(&mut self, statistics: &SolverStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(statistics);
        }
    }

    fn on_prune(&mut self, _reason: PruneReason, _statistics: &SolverStatistics) {}

    fn on_solution_found(&mut self, value: T, _statistics: &SolverStatistics) {
        self.best_value = Some(value);
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        self.log_line(statistics);
        ::log::info!("{}", "-".repeat(89));
        ::log::info!("Search finished after {:.2?}.", self.start_time.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_tracks_best_value() {
        let mut monitor = LogMonitor::<IntegerType>::new(Duration::ZERO, 0);
        let instance = Instance::single(10, Vec::new()).expect("valid");
        let stats = SolverStatistics::default();

        monitor.on_enter_search(&instance);
        assert_eq!(monitor.best_value, None);
        monitor.on_solution_found(7, &stats);
        monitor.on_step(&stats);
        assert_eq!(monitor.best_value, Some(7));
        monitor.on_exit_search(&stats);
    }

    #[test]
    fn test_display() {
        let monitor = LogMonitor::<IntegerType>::default();
        assert_eq!(
            monitor.to_string(),
            "LogMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
