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


//! The best packing found so far in a depth‑first search.
//!
//! An `Incumbent` is created fresh for every solve and owned by the search
//! session, never shared between runs. It starts at value zero with an empty
//! path, which is always feasible. Installation requires a strictly greater
//! value, so among equally valued packings the first one found is kept and
//! the best value never decreases.

use num_traits::PrimInt;
use rucksack_model::index::RankIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent<T> {
    value: T,
    path: Vec<RankIndex>,
}

impl<T> Default for Incumbent<T>
where
    T: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Incumbent<T>
where
    T: PrimInt,
{
    /// Creates the empty incumbent.
    #[inline]
    pub fn new() -> Self {
        Self {
            value: T::zero(),
            path: Vec::new(),
        }
    }

    /// Creates the empty incumbent with room for a path over `num_items` items.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            value: T::zero(),
            path: Vec::with_capacity(num_items),
        }
    }

    #[inline(always)]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the include‑path of the incumbent in search order.
    #[inline(always)]
    pub fn path(&self) -> &[RankIndex] {
        &self.path
    }

    /// Installs `value` with a copy of `path` if it strictly beats the incumbent.
    ///
    /// Returns `true` if the incumbent changed.
    #[inline]
    pub fn try_install(&mut self, value: T, path: &[RankIndex]) -> bool {
        if value <= self.value {
            return false;
        }

        self.value = value;
        self.path.clear();
        self.path.extend_from_slice(path);
        true
    }

    /// Consumes the incumbent, returning its value and path.
    #[inline]
    pub fn into_parts(self) -> (T, Vec<RankIndex>) {
        (self.value, self.path)
    }
}
