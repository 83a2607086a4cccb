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


//! Validated knapsack instances.
//!
//! An `Instance` bundles the capacities with the items. Two shapes exist:
//! dual-constraint instances limit weight and volume, single-constraint
//! instances only weight (their items carry a volume of zero). Construction
//! validates everything a solver relies on:
//!
//! - capacities are strictly positive (`CapacityError`),
//! - every weight, volume (dual only) and value is strictly positive,
//! - the totals of weight, volume and value over all items fit the numeric
//!   type, so no partial sum inside any solver can overflow.

use crate::{
    catalog::{self, RankedItems},
    error::{CapacityError, Dimension, ItemField, KnapsackError, ValidationError, widen},
    index::ItemIndex,
    item::Item,
};
use num_traits::PrimInt;
use rucksack_core::num::checked_sum;

/// The constraint structure of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Only the total weight is limited.
    Single,
    /// Both the total weight and the total volume are limited.
    Dual,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::Single => write!(f, "Single"),
            ConstraintKind::Dual => write!(f, "Dual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance<T> {
    kind: ConstraintKind,
    weight_capacity: T,
    volume_capacity: T,
    items: Vec<Item<T>>,
    total_weight: T,
    total_volume: T,
    total_value: T,
}

#[inline]
fn check_capacity<T>(dimension: Dimension, capacity: T) -> Result<(), CapacityError>
where
    T: PrimInt,
{
    if capacity <= T::zero() {
        return Err(CapacityError {
            dimension,
            value: widen(capacity),
        });
    }
    Ok(())
}

#[inline]
fn checked_total<T, F>(
    items: &[Item<T>],
    field: ItemField,
    project: F,
) -> Result<T, ValidationError>
where
    T: PrimInt,
    F: Fn(&Item<T>) -> T,
{
    checked_sum(items.iter().map(project)).ok_or(ValidationError::Overflow { field })
}

impl<T> Instance<T>
where
    T: PrimInt,
{
    /// Creates a dual-constraint instance.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::Capacity` if either capacity is not positive and
    /// `KnapsackError::Validation` if an item attribute is not positive or a
    /// total overflows `T`.
    pub fn dual(
        weight_capacity: T,
        volume_capacity: T,
        items: Vec<Item<T>>,
    ) -> Result<Self, KnapsackError> {
        check_capacity(Dimension::Weight, weight_capacity)?;
        check_capacity(Dimension::Volume, volume_capacity)?;
        for (index, item) in items.iter().enumerate() {
            catalog::validate_dual_item(index, item)?;
        }
        Self::with_totals(ConstraintKind::Dual, weight_capacity, volume_capacity, items)
    }

    /// Creates a single-constraint instance. Item volumes are discarded.
    ///
    /// # Errors
    ///
    /// Returns `KnapsackError::Capacity` if the capacity is not positive and
    /// `KnapsackError::Validation` if a weight or value is not positive or a
    /// total overflows `T`.
    pub fn single(capacity: T, items: Vec<Item<T>>) -> Result<Self, KnapsackError> {
        check_capacity(Dimension::Weight, capacity)?;
        let items: Vec<Item<T>> = items
            .into_iter()
            .map(|item| Item::without_volume(item.weight(), item.value()))
            .collect();
        for (index, item) in items.iter().enumerate() {
            catalog::validate_single_item(index, item)?;
        }
        Self::with_totals(ConstraintKind::Single, capacity, T::zero(), items)
    }

    /// Validates parallel sequences and creates a dual-constraint instance.
    pub fn from_sequences(
        weight_capacity: T,
        volume_capacity: T,
        weights: &[T],
        volumes: &[T],
        values: &[T],
    ) -> Result<Self, KnapsackError> {
        check_capacity(Dimension::Weight, weight_capacity)?;
        check_capacity(Dimension::Volume, volume_capacity)?;
        let items = catalog::build(weights, volumes, values)?;
        Self::dual(weight_capacity, volume_capacity, items)
    }

    /// Validates parallel sequences and creates a single-constraint instance.
    pub fn single_from_sequences(
        capacity: T,
        weights: &[T],
        values: &[T],
    ) -> Result<Self, KnapsackError> {
        check_capacity(Dimension::Weight, capacity)?;
        let items = catalog::build_single(weights, values)?;
        Self::single(capacity, items)
    }

    fn with_totals(
        kind: ConstraintKind,
        weight_capacity: T,
        volume_capacity: T,
        items: Vec<Item<T>>,
    ) -> Result<Self, KnapsackError> {
        let total_weight = checked_total(&items, ItemField::Weight, |item| item.weight())?;
        let total_volume = checked_total(&items, ItemField::Volume, |item| item.volume())?;
        let total_value = checked_total(&items, ItemField::Value, |item| item.value())?;

        Ok(Self {
            kind,
            weight_capacity,
            volume_capacity,
            items,
            total_weight,
            total_volume,
            total_value,
        })
    }

    #[inline(always)]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns `true` if the volume is constrained as well.
    #[inline(always)]
    pub fn is_dual(&self) -> bool {
        self.kind == ConstraintKind::Dual
    }

    #[inline(always)]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Returns the item at the given input position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn item(&self, index: ItemIndex) -> &Item<T> {
        debug_assert!(
            index.get() < self.num_items(),
            "called `Instance::item` with index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index.get()
        );

        &self.items[index.get()]
    }

    #[inline(always)]
    pub fn weight_capacity(&self) -> T {
        self.weight_capacity
    }

    /// Returns the volume capacity, or `None` for single-constraint instances.
    #[inline(always)]
    pub fn volume_capacity(&self) -> Option<T> {
        match self.kind {
            ConstraintKind::Dual => Some(self.volume_capacity),
            ConstraintKind::Single => None,
        }
    }

    /// Returns the volume capacity, zero for single-constraint instances.
    ///
    /// Since single-constraint items have zero volume, every volume check
    /// against this limit succeeds and tables collapse to one volume column.
    #[inline(always)]
    pub fn volume_limit(&self) -> T {
        self.volume_capacity
    }

    #[inline(always)]
    pub fn total_weight(&self) -> T {
        self.total_weight
    }

    #[inline(always)]
    pub fn total_volume(&self) -> T {
        self.total_volume
    }

    /// Sum of all item values; an upper bound on every solution.
    #[inline(always)]
    pub fn total_value(&self) -> T {
        self.total_value
    }

    /// Returns `true` if a load of the given weight and volume respects the capacities.
    #[inline(always)]
    pub fn fits(&self, weight: T, volume: T) -> bool {
        weight <= self.weight_capacity && volume <= self.volume_capacity
    }

    /// Returns the total weight, volume and value of a selection.
    ///
    /// Indices are assumed to be distinct and in bounds.
    pub fn selection_totals(&self, selection: &[ItemIndex]) -> (T, T, T) {
        selection.iter().fold(
            (T::zero(), T::zero(), T::zero()),
            |(weight, volume, value), &index| {
                let item = self.item(index);
                (
                    weight + item.weight(),
                    volume + item.volume(),
                    value + item.value(),
                )
            },
        )
    }

    /// Returns `true` if the selection is duplicate free, in bounds and fits.
    pub fn is_feasible(&self, selection: &[ItemIndex]) -> bool {
        let mut seen = vec![false; self.num_items()];
        for index in selection {
            match seen.get_mut(index.get()) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        let (weight, volume, _) = self.selection_totals(selection);
        self.fits(weight, volume)
    }

    /// Returns the items sorted by descending density ratio.
    #[inline]
    pub fn ranked_items(&self) -> RankedItems<T> {
        catalog::order_by_ratio_descending(&self.items)
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ConstraintKind::Dual => write!(
                f,
                "Instance(items: {}, weight capacity: {}, volume capacity: {})",
                self.num_items(),
                self.weight_capacity,
                self.volume_capacity
            ),
            ConstraintKind::Single => write!(
                f,
                "Instance(items: {}, capacity: {})",
                self.num_items(),
                self.weight_capacity
            ),
        }
    }
}
