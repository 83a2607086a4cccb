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


//! # Rucksack Solver
//!
//! The public face of the workspace: plain function entry points for each
//! strategy, and a harness that runs all of them over instance files and
//! cross‑checks their answers.
//!
//! ## Modules
//!
//! - `api`: one function per strategy, taking raw capacities and items and
//!   returning the optimum with its selection in input order.
//! - `harness`: `HarnessBuilder` and `Harness`, which load instance files,
//!   solve them with every configured strategy on a pool of scoped threads,
//!   and verify that all strategies agree.
//! - `report`: per‑file results, per‑category timing summaries and their
//!   console rendering.
//!
//! ## Usage
//!
//! ```rust
//! use rucksack_model::item::Item;
//! use rucksack_solver::api::solve_branch_and_bound;
//!
//! let items = [
//!     Item::new(10, 20, 60),
//!     Item::new(20, 25, 100),
//!     Item::new(30, 30, 120),
//! ];
//! assert_eq!(solve_branch_and_bound(50i64, 60, &items).unwrap(), 220);
//! ```

pub mod api;
pub mod harness;
pub mod report;
