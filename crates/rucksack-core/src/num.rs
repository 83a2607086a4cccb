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


//! # Knapsack Numeric Trait
//!
//! Unified numeric bounds for the model and the solvers. `KnapsackNumeric`
//! collects the integer capabilities the solvers need (`PrimInt`, `Signed`,
//! conversions, formatting) into a single alias so generic signatures stay
//! readable.
//!
//! Weights, volumes, values and capacities are signed so that loaders can
//! parse and then reject negative input instead of failing on a sign.
//! `i128` works but is noticeably slower; `i64` is the intended default.

use num_traits::{FromPrimitive, PrimInt, Signed, ToPrimitive};
use std::hash::Hash;

/// A trait alias for integer types usable as weights, volumes and values.
pub trait KnapsackNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + std::str::FromStr
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + Hash
    + 'static
{
}

impl<T> KnapsackNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + std::str::FromStr
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
        + 'static
{
}

/// Sums `values`, returning `None` on overflow.
///
/// # Examples
///
/// ```rust
/// use rucksack_core::num::checked_sum;
///
/// assert_eq!(checked_sum([1i8, 2, 3]), Some(6));
/// assert_eq!(checked_sum([100i8, 100]), None);
/// ```
#[inline]
pub fn checked_sum<T, I>(values: I) -> Option<T>
where
    T: PrimInt,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .try_fold(T::zero(), |acc, value| acc.checked_add(&value))
}

/// Converts an integer to `f64` for ratio and bound computations.
///
/// Every primitive integer has an `f64` approximation, so the fallback
/// is never taken for the types `KnapsackNumeric` admits.
#[inline(always)]
pub fn as_f64<T>(value: T) -> f64
where
    T: ToPrimitive,
{
    value.to_f64().unwrap_or(f64::NAN)
}
