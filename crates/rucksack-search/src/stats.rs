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


use std::time::Duration;

/// Statistics collected while solving a single instance.
///
/// The tree searches fill the node and pruning counters, the dynamic
/// program fills the table counters; `nodes_explored` counts evaluated
/// table cells there so that node limits and progress logs work uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Total nodes visited (table cells evaluated for the dynamic program).
    pub nodes_explored: u64,
    /// Nodes abandoned because the load exceeded a capacity.
    pub prunings_infeasible: u64,
    /// Subtrees cut because their optimistic bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Number of strictly improving solutions installed.
    pub solutions_found: u64,
    /// The deepest level reached in the tree (item rows for the dynamic program).
    pub max_depth: u64,
    /// Number of cells in the value table.
    pub table_cells: u64,
    /// Bytes reserved for the value table and decision bits.
    pub table_bytes: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl SolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    /// Records a batch of evaluated nodes or cells.
    #[inline]
    pub fn on_nodes_explored(&mut self, count: u64) {
        self.nodes_explored = self.nodes_explored.saturating_add(count);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_table_size(&mut self, cells: u64, bytes: u64) {
        self.table_cells = cells;
        self.table_bytes = bytes;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total number of prunings of either kind.
    #[inline]
    pub fn prunings(&self) -> u64 {
        self.prunings_infeasible.saturating_add(self.prunings_bound)
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Table cells:           {}", self.table_cells)?;
        writeln!(f, "  Table bytes:           {}", self.table_bytes)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}
