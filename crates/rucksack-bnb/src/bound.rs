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


//! Fractional relaxation bounds.
//!
//! Starting from a partial packing, each relaxation walks the undecided
//! items in rank order, adds whole items while they fit into the residual
//! capacity of one dimension, then adds the matching fraction of the first
//! item that does not. The other dimension is ignored entirely, which can
//! only loosen the bound.
//!
//! The dual bound is the maximum of the weight and volume relaxations.
//! Single‑constraint instances only use the weight relaxation; their items
//! carry no volume.

use rucksack_core::num::KnapsackNumeric;
use rucksack_model::{instance::Instance, item::Item};

/// Which capacity a relaxation respects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Axis {
    Weight,
    Volume,
}

impl Axis {
    #[inline(always)]
    fn extent<T>(self, item: &Item<T>) -> T
    where
        T: KnapsackNumeric,
    {
        match self {
            Axis::Weight => item.weight(),
            Axis::Volume => item.volume(),
        }
    }
}

/// `floor(value * numerator / denominator)` for `0 <= numerator < denominator`.
///
/// The product is formed in `i128`. When even that overflows the whole item
/// value is returned, which still bounds the slice from above.
#[inline]
fn fractional_share<T>(value: T, numerator: T, denominator: T) -> T
where
    T: KnapsackNumeric,
{
    debug_assert!(
        numerator >= T::zero() && numerator < denominator,
        "called `fractional_share` with a slice outside [0, 1): {} / {}",
        numerator,
        denominator
    );

    let (Some(value_wide), Some(numerator_wide), Some(denominator_wide)) =
        (value.to_i128(), numerator.to_i128(), denominator.to_i128())
    else {
        return value;
    };
    value_wide
        .checked_mul(numerator_wide)
        .and_then(|product| T::from_i128(product / denominator_wide))
        .unwrap_or(value)
}

/// Fractional relaxation over one capacity dimension, rounded down.
///
/// `items` must be in rank order; `start` is the first undecided rank,
/// `used` the load already packed in this dimension and `value` the packed
/// value. Requires `used <= capacity`.
///
/// Every completion has an integral value, so the floor of the relaxation
/// bounds it as tightly as the relaxation itself. The result never exceeds
/// the instance's total value and therefore cannot overflow.
fn relax<T>(items: &[Item<T>], start: usize, axis: Axis, capacity: T, used: T, value: T) -> T
where
    T: KnapsackNumeric,
{
    debug_assert!(
        used <= capacity,
        "called `relax` on an overloaded packing: used {} but capacity {}",
        used,
        capacity
    );

    let mut residual = capacity - used;
    let mut bound = value;
    for item in &items[start..] {
        let extent = axis.extent(item);
        if extent <= residual {
            residual = residual - extent;
            bound = bound + item.value();
        } else {
            bound = bound + fractional_share(item.value(), residual, extent);
            break;
        }
    }
    bound
}

/// The optimistic bound used to prune the branch‑and‑bound tree.
#[derive(Debug, Clone, Copy)]
pub struct RelaxationBound<'a, T> {
    items: &'a [Item<T>],
    weight_capacity: T,
    volume_capacity: Option<T>,
}

impl<'a, T> RelaxationBound<'a, T>
where
    T: KnapsackNumeric,
{
    /// Creates the bound for `instance` over `ranked`, the instance's items in
    /// rank order.
    #[inline]
    pub fn new(instance: &Instance<T>, ranked: &'a [Item<T>]) -> Self {
        debug_assert_eq!(
            instance.num_items(),
            ranked.len(),
            "called `RelaxationBound::new` with a ranking of a different instance"
        );

        Self {
            items: ranked,
            weight_capacity: instance.weight_capacity(),
            volume_capacity: instance.volume_capacity(),
        }
    }

    /// Bounds the best value reachable from a feasible partial packing that
    /// has decided the first `depth` ranks. The bound is rounded down.
    #[inline]
    pub fn evaluate(&self, depth: usize, weight: T, volume: T, value: T) -> T {
        let by_weight = relax(
            self.items,
            depth,
            Axis::Weight,
            self.weight_capacity,
            weight,
            value,
        );
        match self.volume_capacity {
            Some(capacity) => {
                let by_volume = relax(self.items, depth, Axis::Volume, capacity, volume, value);
                by_weight.max(by_volume)
            }
            None => by_weight,
        }
    }

    /// The bound at the root, before any item is decided.
    #[inline]
    pub fn root(&self) -> T {
        self.evaluate(0, T::zero(), T::zero(), T::zero())
    }
}
