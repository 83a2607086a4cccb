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
use num_traits::PrimInt;
use rucksack_model::solution::Solution;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The search completed; the solution is provably optimal.
    Optimal(Solution<T>),
    /// The search was stopped before it completed. No partial answer is
    /// reported, since the best packing found so far carries no guarantee.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the optimal solution.
    ///
    /// # Panics
    ///
    /// Panics if the result is `Unknown`.
    #[inline]
    pub fn unwrap_optimal(self) -> Solution<T> {
        match self {
            SolverResult::Optimal(solution) => solution,
            SolverResult::Unknown => {
                panic!("called `SolverResult::unwrap_optimal` on an `Unknown` result")
            }
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(solution) => write!(f, "Optimal(value={})", solution.value()),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search space was exhausted.
    OptimalityProven,
    /// A monitor stopped the search. The string says why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The result of one solve together with why it ended and what it cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T> {
    result: SolverResult<T>,
    reason: TerminationReason,
    statistics: SolverStatistics,
}

impl<T> SolverOutcome<T>
where
    T: PrimInt,
{
    /// Creates an outcome for a completed search.
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// Creates an outcome for a search stopped by a monitor.
    #[inline]
    pub fn aborted<S>(reason: S, statistics: SolverStatistics) -> Self
    where
        S: Into<String>,
    {
        Self {
            result: SolverResult::Unknown,
            reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Wall-clock time spent in the solver.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.statistics.time_total
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.reason, TerminationReason::Aborted(_))
    }

    /// Returns the optimal solution, if the search completed.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match &self.result {
            SolverResult::Optimal(solution) => Some(solution),
            SolverResult::Unknown => None,
        }
    }

    /// Consumes the outcome, returning the optimal solution if there is one.
    #[inline]
    pub fn into_solution(self) -> Option<Solution<T>> {
        match self.result {
            SolverResult::Optimal(solution) => Some(solution),
            SolverResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}
