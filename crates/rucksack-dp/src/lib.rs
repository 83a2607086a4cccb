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


//! Rucksack‑DP: exhaustive tabulation over (item, weight, volume)
//!
//! `DpSolver` fills `dp[i][w][v]`, the best value achievable with the first
//! `i` items under the sub‑capacities `(w, v)`, and reconstructs the selection
//! by walking the finished table backwards. There is no pruning and no
//! randomness: the output is reproducible bit for bit, at a cost of
//! O(n · W · V) time and memory.
//!
//! Module map
//! - `table`: the flat value tables (full 3D, or rolling 2D plus decision bits)
//!   and the memory budget check that guards their allocation.
//! - `dp`: the solver and its configuration.

pub mod dp;
pub mod table;
