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


//! Exact dynamic programming solver.
//!
//! For items `1..=n` with weight `w_i`, volume `v_i` and value `p_i`:
//!
//! ```raw
//! dp[0][w][v] = 0
//! dp[i][w][v] = max(dp[i-1][w][v], dp[i-1][w-w_i][v-v_i] + p_i)   if w_i <= w and v_i <= v
//!             = dp[i-1][w][v]                                    otherwise
//! ```
//!
//! The selection is recovered from `dp[n][W][V]` by walking `i` from `n` down
//! to `1`: item `i-1` was taken iff `dp[i][w][v] != dp[i-1][w][v]`, in which
//! case `w` and `v` shrink by its weight and volume. Ties therefore resolve to
//! "not taken". The rolling layout records the same strict improvement as a
//! decision bit and yields the identical selection.
//!
//! Monitors are polled once per item row. A stop request drops the table and
//! returns an `Unknown` outcome.

use crate::table::{FullTable, RollingTable, TableLayout, TableShape, check_budget};
use rucksack_core::num::KnapsackNumeric;
use rucksack_model::{
    error::{KnapsackError, ResourceExhaustedError},
    index::ItemIndex,
    instance::Instance,
    solution::Solution,
};
use rucksack_search::{
    monitor::{
        no_op::NoOperationMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
    },
    result::SolverOutcome,
    stats::SolverStatistics,
};
use std::marker::PhantomData;
use std::time::Instant;

/// The default table budget: 1 GiB.
pub const DEFAULT_MEMORY_BUDGET: usize = 1 << 30;

/// Exhaustive tabulation over (item, weight, volume).
///
/// The solver itself is only configuration; every call to `solve` allocates
/// its own table and releases it before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpSolver<T> {
    memory_budget: usize,
    layout: TableLayout,
    _marker: PhantomData<T>,
}

impl<T> Default for DpSolver<T>
where
    T: KnapsackNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An item with its extents converted to table coordinates.
#[derive(Debug, Clone, Copy)]
struct TableItem<T> {
    weight: usize,
    volume: usize,
    value: T,
}

impl<T> DpSolver<T>
where
    T: KnapsackNumeric,
{
    /// Creates a solver with the full layout and the default memory budget.
    #[inline]
    pub fn new() -> Self {
        Self {
            memory_budget: DEFAULT_MEMORY_BUDGET,
            layout: TableLayout::Full,
            _marker: PhantomData,
        }
    }

    /// Sets the maximum number of bytes a table may occupy.
    #[inline]
    pub fn with_memory_budget(mut self, bytes: usize) -> Self {
        self.memory_budget = bytes;
        self
    }

    /// Sets the table layout.
    #[inline]
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    pub fn memory_budget(&self) -> usize {
        self.memory_budget
    }

    #[inline]
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    /// Returns the number of bytes a solve of `instance` would reserve.
    ///
    /// Callers can use this to guard large instances before invoking `solve`.
    pub fn required_bytes(&self, instance: &Instance<T>) -> Result<usize, ResourceExhaustedError> {
        let shape = Self::shape_of(instance)?;
        shape.required_bytes(self.layout, std::mem::size_of::<T>())
    }

    /// Solves `instance` to optimality.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::ResourceExhausted` if the table does not fit the
    /// memory budget or cannot be allocated.
    #[inline]
    pub fn solve(&self, instance: &Instance<T>) -> Result<SolverOutcome<T>, KnapsackError> {
        self.solve_with_monitor(instance, NoOperationMonitor::new())
    }

    /// Solves `instance`, polling `monitor` once per item row.
    pub fn solve_with_monitor<M>(
        &self,
        instance: &Instance<T>,
        mut monitor: M,
    ) -> Result<SolverOutcome<T>, KnapsackError>
    where
        M: SearchMonitor<T>,
    {
        let start_time = Instant::now();
        let shape = Self::shape_of(instance)?;
        let bytes = check_budget::<T>(&shape, self.layout, self.memory_budget)?;
        let items = Self::table_items(instance)?;

        log::debug!(
            "dp: {} items, table {}x{} per row, layout {}, {} bytes",
            shape.num_items(),
            shape.weight_extent(),
            shape.volume_extent(),
            self.layout,
            bytes
        );

        let mut stats = SolverStatistics::default();
        let cells = shape
            .value_cells(self.layout)?
            .saturating_add(shape.decision_bits(self.layout)?);
        stats.set_table_size(cells as u64, bytes as u64);

        monitor.on_enter_search(instance);
        let tabulated = match self.layout {
            TableLayout::Full => Self::tabulate_full(&shape, &items, &mut monitor, &mut stats)?,
            TableLayout::Rolling => {
                Self::tabulate_rolling(&shape, &items, &mut monitor, &mut stats)?
            }
        };
        stats.set_total_time(start_time.elapsed());

        let outcome = match tabulated {
            Ok(solution) => {
                stats.on_solution_found();
                monitor.on_solution_found(solution.value(), &stats);
                log::debug!(
                    "dp: optimum {} with {} items in {:.2?}",
                    solution.value(),
                    solution.num_selected(),
                    stats.time_total
                );
                SolverOutcome::optimal(solution, stats)
            }
            Err(reason) => {
                log::debug!("dp: aborted: {}", reason);
                SolverOutcome::aborted(reason, stats)
            }
        };

        monitor.on_exit_search(outcome.statistics());
        Ok(outcome)
    }

    fn shape_of(instance: &Instance<T>) -> Result<TableShape, ResourceExhaustedError> {
        let weight = instance
            .weight_capacity()
            .to_usize()
            .ok_or(ResourceExhaustedError::DimensionOverflow)?;
        let volume = instance
            .volume_limit()
            .to_usize()
            .ok_or(ResourceExhaustedError::DimensionOverflow)?;
        TableShape::new(instance.num_items(), weight, volume)
    }

    fn table_items(instance: &Instance<T>) -> Result<Vec<TableItem<T>>, ResourceExhaustedError> {
        instance
            .items()
            .iter()
            .map(|item| {
                Ok(TableItem {
                    weight: item
                        .weight()
                        .to_usize()
                        .ok_or(ResourceExhaustedError::DimensionOverflow)?,
                    volume: item
                        .volume()
                        .to_usize()
                        .ok_or(ResourceExhaustedError::DimensionOverflow)?,
                    value: item.value(),
                })
            })
            .collect()
    }

    /// Polls the monitor before row `row`. Returns the stop reason, if any.
    #[inline]
    fn poll<M>(monitor: &mut M, stats: &mut SolverStatistics, row: usize) -> Option<String>
    where
        M: SearchMonitor<T>,
    {
        stats.on_depth_update(row as u64);
        monitor.on_step(stats);
        match monitor.search_command(stats) {
            SearchCommand::Continue => None,
            SearchCommand::Terminate(reason) => Some(reason),
        }
    }

    /// Fills the full table and traces the selection back through it.
    ///
    /// The outer `Result` carries allocation failures, the inner one a stop
    /// request from the monitor.
    fn tabulate_full<M>(
        shape: &TableShape,
        items: &[TableItem<T>],
        monitor: &mut M,
        stats: &mut SolverStatistics,
    ) -> Result<Result<Solution<T>, String>, ResourceExhaustedError>
    where
        M: SearchMonitor<T>,
    {
        let mut table = FullTable::<T>::allocate(*shape)?;
        let volume_extent = shape.volume_extent();

        for (index, item) in items.iter().enumerate() {
            let row = index + 1;
            if let Some(reason) = Self::poll(monitor, stats, row) {
                return Ok(Err(reason));
            }

            let (previous, current) = table.planes_mut(row);
            for w in 0..shape.weight_extent() {
                let base = w * volume_extent;
                for v in 0..volume_extent {
                    let skip = previous[base + v];
                    current[base + v] = if item.weight <= w && item.volume <= v {
                        let take =
                            previous[(w - item.weight) * volume_extent + (v - item.volume)]
                                + item.value;
                        skip.max(take)
                    } else {
                        skip
                    };
                }
            }
            stats.on_nodes_explored(shape.plane_cells() as u64);
        }

        let mut w = shape.weight_extent() - 1;
        let mut v = shape.volume_extent() - 1;
        let value = table.get(items.len(), w, v);
        let mut selected = Vec::new();
        for row in (1..=items.len()).rev() {
            if table.get(row, w, v) != table.get(row - 1, w, v) {
                let item = &items[row - 1];
                selected.push(ItemIndex::new(row - 1));
                w -= item.weight;
                v -= item.volume;
            }
        }
        selected.reverse();

        Ok(Ok(Solution::new(value, selected)))
    }

    /// Fills the rolling plane in place and traces the selection back through
    /// the decision bits.
    fn tabulate_rolling<M>(
        shape: &TableShape,
        items: &[TableItem<T>],
        monitor: &mut M,
        stats: &mut SolverStatistics,
    ) -> Result<Result<Solution<T>, String>, ResourceExhaustedError>
    where
        M: SearchMonitor<T>,
    {
        let mut table = RollingTable::<T>::allocate(*shape)?;
        let volume_extent = shape.volume_extent();
        let weight_max = shape.weight_extent() - 1;
        let volume_max = volume_extent - 1;

        for (index, item) in items.iter().enumerate() {
            if let Some(reason) = Self::poll(monitor, stats, index + 1) {
                return Ok(Err(reason));
            }

            if item.weight <= weight_max && item.volume <= volume_max {
                // Descending sweeps read only cells this row has not written yet.
                for w in (item.weight..=weight_max).rev() {
                    for v in (item.volume..=volume_max).rev() {
                        let cell = w * volume_extent + v;
                        let source = (w - item.weight) * volume_extent + (v - item.volume);
                        let take = table.values()[source] + item.value;
                        if take > table.values()[cell] {
                            table.values_mut()[cell] = take;
                            table.mark_taken(index, cell);
                        }
                    }
                }
            }
            stats.on_nodes_explored(shape.plane_cells() as u64);
        }

        let mut w = weight_max;
        let mut v = volume_max;
        let value = table.values()[shape.cell(w, v)];
        let mut selected = Vec::new();
        for (index, item) in items.iter().enumerate().rev() {
            if table.was_taken(index, shape.cell(w, v)) {
                selected.push(ItemIndex::new(index));
                w -= item.weight;
                v -= item.volume;
            }
        }
        selected.reverse();

        Ok(Ok(Solution::new(value, selected)))
    }
}
