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


//! Rucksack‑BnB: depth‑first branch‑and‑bound
//!
//! Items are ranked by density first. The search then decides one ranked
//! item per level, exploring "take" before "skip", and discards a subtree as
//! soon as its optimistic bound cannot beat the incumbent.
//!
//! Core flow
//! - Build a `rucksack_model::instance::Instance<T>`.
//! - Run `bnb::BnbSolver::solve`, optionally with a search monitor.
//! - Read the optimum and the original‑order selection from the outcome.
//!
//! Bounding
//! - `bound::RelaxationBound` evaluates a weight‑only and a volume‑only
//!   fractional relaxation over the undecided items and keeps the larger one.
//!   Both are admissible, so pruning never loses the optimum.
//!
//! Module map
//! - `bound`: the fractional relaxations.
//! - `bnb`: the solver engine and its per‑run session.

pub mod bnb;
pub mod bound;
