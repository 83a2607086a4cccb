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


//! Rucksack‑Backtrack: pruned include/exclude enumeration
//!
//! The same depth‑first search as the branch‑and‑bound solver, with a much
//! cheaper optimistic bound: the value of every undecided item, ignoring
//! capacity altogether. It prunes less but costs next to nothing per node.
//!
//! The instance kind selects the variant. Single‑capacity instances only
//! check weight; dual‑capacity instances check weight and volume.
//!
//! Module map
//! - `remaining`: the remaining‑value bound, precomputed or recomputed.
//! - `backtrack`: the solver and its per‑run session.

pub mod backtrack;
pub mod remaining;
