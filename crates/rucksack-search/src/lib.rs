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


//! Rucksack‑Search: shared machinery for the exact knapsack solvers
//!
//! Everything the dynamic program, the branch‑and‑bound search and the
//! backtracking search have in common lives here, so the solver crates only
//! contain their own recurrences and pruning rules.
//!
//! Module map
//! - `result`: solver outcomes (`Optimal` or `Unknown`) with termination reasons.
//! - `stats`: counters and timing collected during a solve.
//! - `monitor`: search monitors (limits, interrupts, progress logging) that
//!   observe a run and may stop it.
//! - `incumbent`: the best value and include‑path found so far.
//! - `stack`: the explicit LIFO node stack driving the depth‑first searches.
//! - `path`: the include‑path buffer restored on every pop.
//!
//! Every solve builds its own session from these parts; nothing is shared
//! between runs except preallocated capacity.

pub mod incumbent;
pub mod monitor;
pub mod path;
pub mod result;
pub mod stack;
pub mod stats;
