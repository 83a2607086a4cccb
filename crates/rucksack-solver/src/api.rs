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


//! Function entry points, one per strategy.
//!
//! Each function validates its input into an `Instance`, runs the matching
//! solver without any monitor and returns the optimum. Selections are
//! ascending positions in the caller's input order and always feasible.

use rucksack_backtrack::backtrack::BacktrackingSolver;
use rucksack_bnb::bnb::BnbSolver;
use rucksack_core::num::KnapsackNumeric;
use rucksack_dp::dp::DpSolver;
use rucksack_model::{error::KnapsackError, instance::Instance, item::Item, solution::Solution};
use rucksack_search::result::{SolverOutcome, TerminationReason};
use std::time::Duration;

/// Extracts the proven optimum of a run.
///
/// The entry points attach no monitor, so their runs never stop early; an
/// outcome without a solution still surfaces as `KnapsackError::Aborted`.
#[inline]
fn into_optimal<T>(outcome: SolverOutcome<T>) -> Result<Solution<T>, KnapsackError>
where
    T: KnapsackNumeric,
{
    let reason = match outcome.reason() {
        TerminationReason::Aborted(msg) => msg.clone(),
        TerminationReason::OptimalityProven => "no solution was recorded".to_string(),
    };
    outcome.into_solution().ok_or(KnapsackError::Aborted { reason })
}

/// Solves the dual‑capacity instance by dynamic programming.
///
/// Returns the optimal solution and the time spent inside the solver.
///
/// # Errors
///
/// Returns a validation or capacity error for invalid input, and
/// `KnapsackError::ResourceExhausted` if the table exceeds the default
/// memory budget.
pub fn solve_dp<T>(
    weight_capacity: T,
    volume_capacity: T,
    items: &[Item<T>],
) -> Result<(Solution<T>, Duration), KnapsackError>
where
    T: KnapsackNumeric,
{
    let instance = Instance::dual(weight_capacity, volume_capacity, items.to_vec())?;
    let outcome = DpSolver::new().solve(&instance)?;
    let elapsed = outcome.elapsed();
    Ok((into_optimal(outcome)?, elapsed))
}

/// Solves the dual‑capacity instance by branch‑and‑bound, returning only the
/// optimal value.
pub fn solve_branch_and_bound<T>(
    weight_capacity: T,
    volume_capacity: T,
    items: &[Item<T>],
) -> Result<T, KnapsackError>
where
    T: KnapsackNumeric,
{
    solve_branch_and_bound_with_selection(weight_capacity, volume_capacity, items)
        .map(|solution| solution.value())
}

/// Solves the dual‑capacity instance by branch‑and‑bound.
pub fn solve_branch_and_bound_with_selection<T>(
    weight_capacity: T,
    volume_capacity: T,
    items: &[Item<T>],
) -> Result<Solution<T>, KnapsackError>
where
    T: KnapsackNumeric,
{
    let instance = Instance::dual(weight_capacity, volume_capacity, items.to_vec())?;
    into_optimal(BnbSolver::new().solve(&instance))
}

/// Solves the single‑capacity instance given as parallel sequences by
/// pruned backtracking.
pub fn solve_backtracking<T>(
    capacity: T,
    weights: &[T],
    values: &[T],
) -> Result<Solution<T>, KnapsackError>
where
    T: KnapsackNumeric,
{
    let instance = Instance::single_from_sequences(capacity, weights, values)?;
    into_optimal(BacktrackingSolver::new().solve(&instance))
}

/// Solves the dual‑capacity instance given as parallel sequences by pruned
/// backtracking.
pub fn solve_backtracking_2d<T>(
    weight_capacity: T,
    volume_capacity: T,
    weights: &[T],
    volumes: &[T],
    values: &[T],
) -> Result<Solution<T>, KnapsackError>
where
    T: KnapsackNumeric,
{
    let instance =
        Instance::from_sequences(weight_capacity, volume_capacity, weights, volumes, values)?;
    into_optimal(BacktrackingSolver::new().solve(&instance))
}
