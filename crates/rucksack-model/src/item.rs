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


use num_traits::PrimInt;
use rucksack_core::num::as_f64;

/// A single packable item.
///
/// The density `ratio` is `value / (weight + volume)` and is computed once at
/// construction. Items of a single-constraint instance carry a volume of zero,
/// so the same formula reduces to `value / weight`. The ratio only orders the
/// tree searches; it never decides feasibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item<T> {
    weight: T,
    volume: T,
    value: T,
    ratio: f64,
}

impl<T> Item<T>
where
    T: PrimInt,
{
    /// Creates a new item and derives its density ratio.
    ///
    /// No validation happens here; `catalog::build` and `Instance`
    /// reject non-positive attributes with a descriptive error.
    #[inline]
    pub fn new(weight: T, volume: T, value: T) -> Self {
        let consumed = as_f64(weight) + as_f64(volume);
        Self {
            weight,
            volume,
            value,
            ratio: as_f64(value) / consumed,
        }
    }

    /// Creates an item for a single-constraint instance (volume zero).
    #[inline]
    pub fn without_volume(weight: T, value: T) -> Self {
        Self::new(weight, T::zero(), value)
    }

    #[inline(always)]
    pub fn weight(&self) -> T {
        self.weight
    }

    #[inline(always)]
    pub fn volume(&self) -> T {
        self.volume
    }

    #[inline(always)]
    pub fn value(&self) -> T {
        self.value
    }

    /// Value per unit of consumed resource.
    #[inline(always)]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl<T> std::fmt::Display for Item<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item(weight: {}, volume: {}, value: {}, ratio: {:.4})",
            self.weight, self.volume, self.value, self.ratio
        )
    }
}
