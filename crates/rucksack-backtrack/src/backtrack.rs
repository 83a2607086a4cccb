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


//! Pruned backtracking over ranked items.
//!
//! Nodes are handled in this order:
//!
//! 1. abandon if the packing exceeds a capacity,
//! 2. abandon if `value + remaining(depth) <= best`,
//! 3. at a leaf, record the packing (step 2 guarantees it is strictly better),
//! 4. otherwise push the exclude child and, if the next item fits, the
//!    include child on top of it.
//!
//! Because the include child is only generated when it fits, step 1 never
//! fires below the root in practice; it is kept so that the node contract is
//! the same as in the branch‑and‑bound solver.

use crate::remaining::{RemainingValueBound, SuffixValues, sum_from};
use rucksack_core::num::KnapsackNumeric;
use rucksack_model::{
    catalog::RankedItems, index::RankIndex, instance::Instance, item::Item, solution::Solution,
};
use rucksack_search::{
    incumbent::Incumbent,
    monitor::{
        no_op::NoOperationMonitor,
        search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    },
    path::SelectionPath,
    result::{SolverOutcome, TerminationReason},
    stack::{Branch, Node, NodeStack},
    stats::SolverStatistics,
};

/// A pruned backtracking solver with reusable search buffers.
#[derive(Debug, Clone)]
pub struct BacktrackingSolver<T> {
    bound: RemainingValueBound,
    stack: NodeStack<T>,
    path: SelectionPath,
}

impl<T> Default for BacktrackingSolver<T>
where
    T: KnapsackNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BacktrackingSolver<T>
where
    T: KnapsackNumeric,
{
    /// Creates a solver using precomputed suffix sums.
    #[inline]
    pub fn new() -> Self {
        Self::with_bound(RemainingValueBound::Precomputed)
    }

    /// Creates a solver that obtains the remaining value as `bound` says.
    #[inline]
    pub fn with_bound(bound: RemainingValueBound) -> Self {
        Self {
            bound,
            stack: NodeStack::new(),
            path: SelectionPath::new(),
        }
    }

    /// Creates a solver whose buffers already fit instances of up to
    /// `num_items` items.
    #[inline]
    pub fn preallocated(bound: RemainingValueBound, num_items: usize) -> Self {
        Self {
            bound,
            stack: NodeStack::preallocated(num_items),
            path: SelectionPath::preallocated(num_items),
        }
    }

    #[inline]
    pub fn bound(&self) -> RemainingValueBound {
        self.bound
    }

    /// Solves `instance` to optimality.
    #[inline]
    pub fn solve(&mut self, instance: &Instance<T>) -> SolverOutcome<T> {
        self.solve_with_monitor(instance, NoOperationMonitor::new())
    }

    /// Solves `instance`, polling `monitor` once per node.
    pub fn solve_with_monitor<M>(
        &mut self,
        instance: &Instance<T>,
        mut monitor: M,
    ) -> SolverOutcome<T>
    where
        M: SearchMonitor<T>,
    {
        self.stack.ensure_capacity(instance.num_items());
        self.path.ensure_capacity(instance.num_items());

        let ranked = instance.ranked_items();
        let remaining = match self.bound {
            RemainingValueBound::Precomputed => {
                Remaining::Suffix(SuffixValues::new(ranked.items()))
            }
            RemainingValueBound::Recomputed => Remaining::Summed(ranked.items()),
        };
        let session = BacktrackingSession {
            solver: self,
            instance,
            ranked: &ranked,
            remaining,
            monitor: &mut monitor,
            incumbent: Incumbent::preallocated(instance.num_items()),
            stats: SolverStatistics::default(),
            start_time: std::time::Instant::now(),
        };
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears the buffers without releasing their capacity.
    #[inline]
    fn reset(&mut self) {
        self.stack.reset();
        self.path.reset();
    }
}

/// The remaining‑value source of one run.
#[derive(Debug)]
enum Remaining<'a, T> {
    Suffix(SuffixValues<T>),
    Summed(&'a [Item<T>]),
}

impl<'a, T> Remaining<'a, T>
where
    T: KnapsackNumeric,
{
    #[inline(always)]
    fn from_depth(&self, depth: usize) -> T {
        match self {
            Remaining::Suffix(suffix) => suffix.from_depth(depth),
            Remaining::Summed(items) => sum_from(items, depth),
        }
    }
}

struct BacktrackingSession<'a, T, M> {
    solver: &'a mut BacktrackingSolver<T>,
    instance: &'a Instance<T>,
    ranked: &'a RankedItems<T>,
    remaining: Remaining<'a, T>,
    monitor: &'a mut M,
    incumbent: Incumbent<T>,
    stats: SolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, M> BacktrackingSession<'a, T, M>
where
    T: KnapsackNumeric,
    M: SearchMonitor<T>,
{
    fn run(mut self) -> SolverOutcome<T> {
        log::debug!(
            "backtrack: solving {} with {} remaining-value bound",
            self.instance,
            self.solver.bound
        );
        self.monitor.on_enter_search(self.instance);
        self.solver.stack.push(Node::root());

        let reason = loop {
            self.monitor.on_step(&self.stats);
            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(msg);
            }

            match self.solver.stack.pop() {
                Some(node) => self.process(node),
                None => break TerminationReason::OptimalityProven,
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        match reason {
            TerminationReason::OptimalityProven => {
                let (value, path) = self.incumbent.into_parts();
                log::debug!(
                    "backtrack: optimum {} after {} nodes in {:.2?}",
                    value,
                    self.stats.nodes_explored,
                    self.stats.time_total
                );
                SolverOutcome::optimal(
                    Solution::new(value, self.ranked.to_original(&path)),
                    self.stats,
                )
            }
            TerminationReason::Aborted(msg) => {
                log::debug!("backtrack: aborted: {}", msg);
                SolverOutcome::aborted(msg, self.stats)
            }
        }
    }

    #[inline]
    fn process(&mut self, node: Node<T>) {
        self.stats.on_node_explored();
        self.stats.on_depth_update(node.depth() as u64);

        self.solver.path.restore(node.parent_path_len());
        if let Branch::Include(rank) = node.branch() {
            self.solver.path.push(rank);
        }

        if !self.instance.fits(node.weight(), node.volume()) {
            self.stats.on_pruning_infeasible();
            self.monitor.on_prune(PruneReason::Infeasible, &self.stats);
            return;
        }

        let optimistic = node.value() + self.remaining.from_depth(node.depth());
        if optimistic <= self.incumbent.value() {
            self.stats.on_pruning_bound();
            self.monitor.on_prune(PruneReason::BoundDominated, &self.stats);
            return;
        }

        if node.depth() == self.ranked.len() {
            if self
                .incumbent
                .try_install(node.value(), self.solver.path.as_slice())
            {
                self.stats.on_solution_found();
                self.monitor.on_solution_found(node.value(), &self.stats);
            }
            return;
        }

        let item = self.ranked.item(RankIndex::new(node.depth()));
        let path_len = self.solver.path.len();
        self.solver.stack.push(node.exclude(path_len));
        if self
            .instance
            .fits(node.weight() + item.weight(), node.volume() + item.volume())
        {
            self.solver.stack.push(node.include(item, path_len));
        }
    }
}
