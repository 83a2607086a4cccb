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
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::SolverStatistics,
};
use rucksack_core::num::KnapsackNumeric;
use rucksack_model::instance::Instance;

/// A monitor that terminates the search once `nodes_explored` reaches a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    node_limit: u64,
}

impl NodeLimitMonitor {
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }

    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }
}

impl<T> SearchMonitor<T> for NodeLimitMonitor
where
    T: KnapsackNumeric,
{
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>) {}

    fn search_command(&mut self, statistics: &SolverStatistics) -> SearchCommand {
        if statistics.nodes_explored >= self.node_limit {
            SearchCommand::Terminate(format!("Node limit of {} reached", self.node_limit))
        } else {
            SearchCommand::Continue
        }
    }

    fn on_exit_search(&mut self, _statistics: &SolverStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_terminates_at_limit() {
        let mut monitor = NodeLimitMonitor::new(5);
        let mut stats = SolverStatistics::default();
        stats.on_nodes_explored(4);
        assert_eq!(
            SearchMonitor::<IntegerType>::search_command(&mut monitor, &stats),
            SearchCommand::Continue
        );
        stats.on_node_explored();
        assert_eq!(
            SearchMonitor::<IntegerType>::search_command(&mut monitor, &stats),
            SearchCommand::Terminate("Node limit of 5 reached".to_string())
        );
    }
}
