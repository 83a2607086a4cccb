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


//! The remaining‑value bound.
//!
//! `remaining(d)` is the total value of the items at ranks `d..n`. A node at
//! depth `d` holding value `c` can never exceed `c + remaining(d)`.

use num_traits::PrimInt;
use rucksack_model::item::Item;

/// How the search obtains the remaining value at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RemainingValueBound {
    /// Suffix sums computed once per solve; O(1) per node.
    #[default]
    Precomputed,
    /// Summed over the undecided items at every node; O(n) per node.
    Recomputed,
}

impl std::fmt::Display for RemainingValueBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemainingValueBound::Precomputed => write!(f, "Precomputed"),
            RemainingValueBound::Recomputed => write!(f, "Recomputed"),
        }
    }
}

/// Suffix sums of item values in rank order.
///
/// Holds `n + 1` entries; the last one is zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuffixValues<T> {
    sums: Vec<T>,
}

impl<T> SuffixValues<T>
where
    T: PrimInt,
{
    /// Computes the suffix sums of `items`.
    ///
    /// The caller guarantees that the total value does not overflow `T`;
    /// validated instances do.
    pub fn new(items: &[Item<T>]) -> Self {
        let mut sums = vec![T::zero(); items.len() + 1];
        for (depth, item) in items.iter().enumerate().rev() {
            sums[depth] = sums[depth + 1] + item.value();
        }
        Self { sums }
    }

    /// Returns the value of the items at ranks `depth..`.
    #[inline(always)]
    pub fn from_depth(&self, depth: usize) -> T {
        self.sums[depth]
    }

    /// Returns the number of items covered.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.sums.len() - 1
    }
}

/// Sums the value of `items[depth..]` directly.
#[inline]
pub fn sum_from<T>(items: &[Item<T>], depth: usize) -> T
where
    T: PrimInt,
{
    items[depth..]
        .iter()
        .fold(T::zero(), |acc, item| acc + item.value())
}
