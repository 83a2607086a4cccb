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


use crate::stats::SolverStatistics;
use rucksack_core::num::KnapsackNumeric;
use rucksack_model::instance::Instance;

/// Command returned by a monitor to control the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Keep searching.
    Continue,
    /// Stop the search. The string says why.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate({})", reason),
        }
    }
}

/// Why a subtree was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneReason {
    /// The load already exceeds a capacity.
    Infeasible,
    /// The optimistic bound cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for observing and controlling a solve.
pub trait SearchMonitor<T>: Send
where
    T: KnapsackNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the search loop begins.
    fn on_enter_search(&mut self, instance: &Instance<T>);

    /// Called at the beginning of every search loop iteration.
    fn on_step(&mut self, _statistics: &SolverStatistics) {}

    /// Called when a subtree is discarded.
    fn on_prune(&mut self, _reason: PruneReason, _statistics: &SolverStatistics) {}

    /// Called when a strictly better packing has been installed.
    fn on_solution_found(&mut self, _value: T, _statistics: &SolverStatistics) {}

    /// Polled after `on_step`; the primary place to enforce limits.
    fn search_command(&mut self, _statistics: &SolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called when the search is finished, whether exhausted or stopped.
    fn on_exit_search(&mut self, statistics: &SolverStatistics);
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: KnapsackNumeric,
    M: SearchMonitor<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, instance: &Instance<T>) {
        (**self).on_enter_search(instance)
    }

    fn on_step(&mut self, statistics: &SolverStatistics) {
        (**self).on_step(statistics)
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &SolverStatistics) {
        (**self).on_prune(reason, statistics)
    }

    fn on_solution_found(&mut self, value: T, statistics: &SolverStatistics) {
        (**self).on_solution_found(value, statistics)
    }

    fn search_command(&mut self, statistics: &SolverStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        (**self).on_exit_search(statistics)
    }
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
