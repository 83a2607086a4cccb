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


//! # Rucksack Model
//!
//! **The domain model shared by every rucksack solver.**
//!
//! This crate turns raw weight/volume/value sequences into validated data the
//! solvers can trust, and defines what they hand back.
//!
//! ## Architecture
//!
//! * **`index`**: `ItemIndex` (position in the caller's input) and `RankIndex`
//!   (position after ordering by value density). They cannot be mixed.
//! * **`item`**: The immutable `Item` record with its precomputed density ratio.
//! * **`catalog`**: Validation of raw sequences into items, and the stable
//!   descending ratio ordering (`RankedItems`) used by the tree searches.
//! * **`instance`**: `Instance`, the capacities plus items, in single or dual
//!   constraint form.
//! * **`solution`**: The optimal value together with the selected items.
//! * **`loading`**: Plain-text instance parsing (`InstanceLoader`).
//! * **`error`**: The error taxonomy (`KnapsackError` and its parts).
//!
//! ## Design Philosophy
//!
//! 1. **Fail-fast**: constructors validate eagerly so a solver never sees a
//!    non-positive weight, a non-positive capacity, or totals that overflow.
//! 2. **One canonical index space**: solutions always refer to the input order.

pub mod catalog;
pub mod error;
pub mod index;
pub mod instance;
pub mod item;
pub mod loading;
pub mod solution;
