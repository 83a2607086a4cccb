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


//! Branch‑and‑bound solver for the 0/1 knapsack.
//!
//! The engine ranks the items by density and runs a depth‑first search over
//! include/exclude decisions, one ranked item per level. Pending subproblems
//! live on an explicit `NodeStack`; the include‑path is a single
//! `SelectionPath` that every popped node restores to its parent's length
//! before appending its own decision. A node is processed in a fixed order:
//!
//! 1. an overloaded node is abandoned,
//! 2. a leaf replaces the incumbent if its value is strictly larger,
//! 3. an inner node whose relaxation bound, rounded down, does not exceed
//!    the incumbent is pruned,
//! 4. otherwise both children are pushed, include on top.
//!
//! Ties keep the first selection found. The solver struct only carries the
//! reusable stack and path buffers; every call to `solve` starts from a clean
//! state and leaves one behind.

use crate::bound::RelaxationBound;
use rucksack_core::num::KnapsackNumeric;
use rucksack_model::{
    catalog::RankedItems, index::RankIndex, instance::Instance, solution::Solution,
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

/// A depth‑first branch‑and‑bound solver with reusable search buffers.
#[derive(Debug, Clone)]
pub struct BnbSolver<T> {
    stack: NodeStack<T>,
    path: SelectionPath,
}

impl<T> Default for BnbSolver<T>
where
    T: KnapsackNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: KnapsackNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            stack: NodeStack::new(),
            path: SelectionPath::new(),
        }
    }

    /// Creates a solver whose buffers already fit instances of up to
    /// `num_items` items.
    ///
    /// # Note
    ///
    /// The solver grows its buffers on demand, so this only moves the
    /// allocation to construction time.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            stack: NodeStack::preallocated(num_items),
            path: SelectionPath::preallocated(num_items),
        }
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
        let session = BnbSearchSession::new(self, instance, &ranked, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Returns the number of bytes held by the reusable buffers.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.stack.allocated_memory_bytes() + self.path.allocated_memory_bytes()
    }

    /// Clears the buffers without releasing their capacity.
    #[inline]
    fn reset(&mut self) {
        self.stack.reset();
        self.path.reset();
    }
}

/// The state of a single search run.
struct BnbSearchSession<'a, T, M> {
    solver: &'a mut BnbSolver<T>,
    instance: &'a Instance<T>,
    ranked: &'a RankedItems<T>,
    bound: RelaxationBound<'a, T>,
    monitor: &'a mut M,
    incumbent: Incumbent<T>,
    stats: SolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, T, M> std::fmt::Debug for BnbSearchSession<'a, T, M>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSearchSession")
            .field("instance", &self.instance)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, M> BnbSearchSession<'a, T, M>
where
    T: KnapsackNumeric,
    M: SearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        instance: &'a Instance<T>,
        ranked: &'a RankedItems<T>,
        monitor: &'a mut M,
    ) -> Self {
        Self {
            solver,
            instance,
            ranked,
            bound: RelaxationBound::new(instance, ranked.items()),
            monitor,
            incumbent: Incumbent::preallocated(instance.num_items()),
            stats: SolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> SolverOutcome<T> {
        log::debug!(
            "bnb: solving {} with root bound {}",
            self.instance,
            self.bound.root()
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
        self.finalize_result(reason)
    }

    /// Processes one popped node.
    #[inline]
    fn process(&mut self, node: Node<T>) {
        self.stats.on_node_explored();
        self.stats.on_depth_update(node.depth() as u64);

        let path = &mut self.solver.path;
        path.restore(node.parent_path_len());
        if let Branch::Include(rank) = node.branch() {
            path.push(rank);
        }

        if !self.instance.fits(node.weight(), node.volume()) {
            self.stats.on_pruning_infeasible();
            self.monitor.on_prune(PruneReason::Infeasible, &self.stats);
            return;
        }

        if node.depth() == self.ranked.len() {
            self.handle_leaf(node.value());
            return;
        }

        let bound = self
            .bound
            .evaluate(node.depth(), node.weight(), node.volume(), node.value());
        if bound <= self.incumbent.value() {
            self.stats.on_pruning_bound();
            self.monitor.on_prune(PruneReason::BoundDominated, &self.stats);
            return;
        }

        let item = self.ranked.item(RankIndex::new(node.depth()));
        let path_len = self.solver.path.len();
        self.solver.stack.push(node.exclude(path_len));
        self.solver.stack.push(node.include(item, path_len));
    }

    #[inline]
    fn handle_leaf(&mut self, value: T) {
        if self
            .incumbent
            .try_install(value, self.solver.path.as_slice())
        {
            self.stats.on_solution_found();
            self.monitor.on_solution_found(value, &self.stats);
        }
    }

    /// Builds the outcome, translating the incumbent's ranks into input
    /// positions.
    fn finalize_result(self, reason: TerminationReason) -> SolverOutcome<T> {
        match reason {
            TerminationReason::OptimalityProven => {
                let (value, path) = self.incumbent.into_parts();
                let solution = Solution::new(value, self.ranked.to_original(&path));
                log::debug!(
                    "bnb: optimum {} after {} nodes ({} prunings) in {:.2?}",
                    value,
                    self.stats.nodes_explored,
                    self.stats.prunings(),
                    self.stats.time_total
                );
                SolverOutcome::optimal(solution, self.stats)
            }
            TerminationReason::Aborted(msg) => {
                log::debug!(
                    "bnb: aborted after {} nodes: {}",
                    self.stats.nodes_explored,
                    msg
                );
                SolverOutcome::aborted(msg, self.stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rucksack_model::index::ItemIndex;
    use rucksack_search::monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, node_limit::NodeLimitMonitor,
    };
    use std::sync::atomic::AtomicBool;

    type IntegerType = i64;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn scenario() -> Instance<IntegerType> {
        Instance::from_sequences(50, 60, &[10, 20, 30], &[20, 25, 30], &[60, 100, 120])
            .expect("valid instance")
    }

    fn brute_force(instance: &Instance<IntegerType>) -> IntegerType {
        let n = instance.num_items();
        (0u32..(1 << n))
            .filter_map(|mask| {
                let selection: Vec<ItemIndex> =
                    (0..n).filter(|i| mask & (1 << i) != 0).map(ii).collect();
                let (w, v, value) = instance.selection_totals(&selection);
                instance.fits(w, v).then_some(value)
            })
            .max()
            .unwrap_or(0)
    }

    /// Counts every callback so tests can compare them with the statistics.
    #[derive(Default)]
    struct CountingMonitor {
        entered: bool,
        exited: bool,
        steps: u64,
        infeasible: u64,
        dominated: u64,
        improvements: Vec<IntegerType>,
    }

    impl SearchMonitor<IntegerType> for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }

        fn on_enter_search(&mut self, _instance: &Instance<IntegerType>) {
            self.entered = true;
        }

        fn on_step(&mut self, _statistics: &SolverStatistics) {
            self.steps += 1;
        }

        fn on_prune(&mut self, reason: PruneReason, _statistics: &SolverStatistics) {
            match reason {
                PruneReason::Infeasible => self.infeasible += 1,
                PruneReason::BoundDominated => self.dominated += 1,
            }
        }

        fn on_solution_found(&mut self, value: IntegerType, _statistics: &SolverStatistics) {
            self.improvements.push(value);
        }

        fn on_exit_search(&mut self, _statistics: &SolverStatistics) {
            self.exited = true;
        }
    }

    #[test]
    fn test_scenario_value_and_selection() {
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&scenario());
        assert!(outcome.is_optimal());
        let solution = outcome.solution().expect("optimal");
        assert_eq!(solution.value(), 220);
        assert_eq!(solution.selected(), &[ii(0), ii(1)]);
    }

    #[test]
    fn test_single_constraint_scenario() {
        let instance =
            Instance::<IntegerType>::single_from_sequences(50, &[10, 20, 30], &[60, 100, 120])
                .expect("valid instance");
        let solution = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("optimal");
        assert_eq!(solution.value(), 220);
        assert_eq!(solution.selected(), &[ii(1), ii(2)]);
    }

    #[test]
    fn test_empty_instance_is_zero() {
        let instance = Instance::<IntegerType>::dual(10, 10, Vec::new()).expect("valid");
        let solution = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("optimal");
        assert_eq!(solution.value(), 0);
        assert!(solution.selected().is_empty());
    }

    #[test]
    fn test_nothing_fits_is_zero() {
        let instance =
            Instance::<IntegerType>::from_sequences(5, 5, &[6, 2], &[1, 9], &[10, 20])
                .expect("valid instance");
        let solution = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("optimal");
        assert_eq!(solution.value(), 0);
        assert!(solution.selected().is_empty());
    }

    #[test]
    fn test_matches_brute_force_on_fixed_instances() {
        let weights = [3, 4, 5, 2, 6, 1, 7, 3, 5, 4];
        let volumes = [2, 6, 3, 4, 1, 5, 2, 3, 4, 4];
        let values = [10, 13, 9, 7, 15, 4, 12, 8, 11, 10];
        let mut solver = BnbSolver::preallocated(weights.len());
        for (w_cap, v_cap) in [(1, 1), (5, 5), (10, 8), (12, 15), (20, 20), (100, 100)] {
            let instance =
                Instance::<IntegerType>::from_sequences(w_cap, v_cap, &weights, &volumes, &values)
                    .expect("valid instance");
            let solution = solver.solve(&instance).into_solution().expect("optimal");
            assert_eq!(solution.value(), brute_force(&instance), "W={w_cap} V={v_cap}");
            assert!(instance.is_feasible(solution.selected()));
            let (_, _, value) = instance.selection_totals(solution.selected());
            assert_eq!(value, solution.value());
        }
    }

    #[test]
    fn test_everything_fits_takes_everything() {
        let instance =
            Instance::<IntegerType>::from_sequences(100, 100, &[1, 2, 3], &[3, 2, 1], &[5, 6, 7])
                .expect("valid instance");
        let solution = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("optimal");
        assert_eq!(solution.value(), 18);
        assert_eq!(solution.selected(), &[ii(0), ii(1), ii(2)]);
    }

    #[test]
    fn test_monitor_callbacks_match_statistics() {
        let mut monitor = CountingMonitor::default();
        let outcome = BnbSolver::new().solve_with_monitor(&scenario(), &mut monitor);
        let stats = outcome.statistics();

        assert!(monitor.entered && monitor.exited);
        // One extra step observes the empty stack.
        assert_eq!(monitor.steps, stats.nodes_explored + 1);
        assert_eq!(monitor.infeasible, stats.prunings_infeasible);
        assert_eq!(monitor.dominated, stats.prunings_bound);
        assert_eq!(monitor.improvements.len() as u64, stats.solutions_found);
        assert!(monitor.improvements.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(monitor.improvements.last(), Some(&220));
        assert!(stats.max_depth <= 3);
    }

    #[test]
    fn test_reused_solver_is_clean_and_deterministic() {
        let mut solver = BnbSolver::preallocated(3);
        let first = solver.solve(&scenario());
        let memory = solver.allocated_memory_bytes();
        let second = solver.solve(&scenario());

        assert_eq!(first.solution(), second.solution());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );
        assert_eq!(solver.allocated_memory_bytes(), memory);
    }

    #[test]
    fn test_interrupt_yields_no_result() {
        let flag = AtomicBool::new(true);
        let outcome =
            BnbSolver::new().solve_with_monitor(&scenario(), InterruptMonitor::new(&flag));
        assert!(outcome.is_aborted());
        assert!(outcome.solution().is_none());
        assert_eq!(outcome.statistics().nodes_explored, 0);
    }

    #[test]
    fn test_node_limit_through_composite() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(NodeLimitMonitor::new(2));
        let outcome = BnbSolver::new().solve_with_monitor(&scenario(), composite);
        assert!(outcome.is_aborted());
        assert_eq!(outcome.statistics().nodes_explored, 2);
        match outcome.reason() {
            TerminationReason::Aborted(msg) => assert!(msg.contains("Node limit")),
            other => panic!("unexpected reason {other}"),
        }
    }

    #[test]
    fn test_ties_keep_first_found_selection() {
        // Two identical items, room for one: the include‑first search finds
        // rank 0 first and an equal value later must not replace it.
        let instance =
            Instance::<IntegerType>::from_sequences(5, 5, &[5, 5], &[5, 5], &[10, 10])
                .expect("valid instance");
        let solution = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("optimal");
        assert_eq!(solution.value(), 10);
        assert_eq!(solution.selected(), &[ii(0)]);
    }

    #[test]
    fn test_values_beyond_f64_precision_are_not_pruned() {
        // 2^60 and 2^60 + 1 round to the same `f64`. The second item alone is
        // the optimum and must survive the bound test against the first.
        let base: IntegerType = 1 << 60;
        let instance =
            Instance::<IntegerType>::from_sequences(2, 2, &[1, 2], &[1, 2], &[base, base + 1])
                .expect("valid instance");
        let solution = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("optimal");
        assert_eq!(solution.value(), base + 1);
        assert_eq!(solution.selected(), &[ii(1)]);
    }
}
