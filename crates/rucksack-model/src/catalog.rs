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


//! Item catalog: validation of raw item data and the density ordering.
//!
//! `build` and `build_single` turn parallel weight/volume/value sequences into
//! `Item`s, rejecting mismatched lengths and non-positive entries with an error
//! that names the offending item. `order_by_ratio_descending` produces the
//! `RankedItems` view the tree searches walk. The sort is stable, so items with
//! equal ratios keep their input order and runs stay reproducible.

use crate::{
    error::{ItemField, ValidationError, widen},
    index::{ItemIndex, RankIndex},
    item::Item,
};
use num_traits::PrimInt;

#[inline]
fn check_length(field: ItemField, expected: usize, found: usize) -> Result<(), ValidationError> {
    if expected != found {
        return Err(ValidationError::LengthMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

#[inline]
fn check_positive<T>(item: usize, field: ItemField, value: T) -> Result<(), ValidationError>
where
    T: PrimInt,
{
    if value <= T::zero() {
        return Err(ValidationError::NonPositive {
            item: ItemIndex::new(item),
            field,
            value: widen(value),
        });
    }
    Ok(())
}

/// Validates an item for a dual-constraint instance.
pub(crate) fn validate_dual_item<T>(index: usize, item: &Item<T>) -> Result<(), ValidationError>
where
    T: PrimInt,
{
    check_positive(index, ItemField::Weight, item.weight())?;
    check_positive(index, ItemField::Volume, item.volume())?;
    check_positive(index, ItemField::Value, item.value())
}

/// Validates an item for a single-constraint instance; the volume is ignored.
pub(crate) fn validate_single_item<T>(index: usize, item: &Item<T>) -> Result<(), ValidationError>
where
    T: PrimInt,
{
    check_positive(index, ItemField::Weight, item.weight())?;
    check_positive(index, ItemField::Value, item.value())
}

/// Builds dual-constraint items from parallel sequences.
///
/// # Errors
///
/// Returns `ValidationError::LengthMismatch` if `volumes` or `values` differ
/// in length from `weights`, and `ValidationError::NonPositive` for the first
/// item with a zero or negative weight, volume or value.
///
/// # Examples
///
/// ```rust
/// use rucksack_model::catalog::build;
///
/// let items = build(&[10i64, 20], &[20, 25], &[60, 100]).unwrap();
/// assert_eq!(items.len(), 2);
/// assert!(build(&[10i64], &[0], &[60]).is_err());
/// ```
pub fn build<T>(weights: &[T], volumes: &[T], values: &[T]) -> Result<Vec<Item<T>>, ValidationError>
where
    T: PrimInt,
{
    check_length(ItemField::Volume, weights.len(), volumes.len())?;
    check_length(ItemField::Value, weights.len(), values.len())?;

    let mut items = Vec::with_capacity(weights.len());
    for (index, ((&weight, &volume), &value)) in
        weights.iter().zip(volumes).zip(values).enumerate()
    {
        let item = Item::new(weight, volume, value);
        validate_dual_item(index, &item)?;
        items.push(item);
    }
    Ok(items)
}

/// Builds single-constraint items (volume zero) from parallel sequences.
///
/// # Errors
///
/// Returns `ValidationError::LengthMismatch` if `values` differs in length
/// from `weights`, and `ValidationError::NonPositive` for the first item with a
/// zero or negative weight or value.
pub fn build_single<T>(weights: &[T], values: &[T]) -> Result<Vec<Item<T>>, ValidationError>
where
    T: PrimInt,
{
    check_length(ItemField::Value, weights.len(), values.len())?;

    let mut items = Vec::with_capacity(weights.len());
    for (index, (&weight, &value)) in weights.iter().zip(values).enumerate() {
        let item = Item::without_volume(weight, value);
        validate_single_item(index, &item)?;
        items.push(item);
    }
    Ok(items)
}

/// Items sorted by descending density ratio, with the mapping back to the
/// caller's input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItems<T> {
    items: Vec<Item<T>>,
    origin: Vec<ItemIndex>,
}

impl<T> RankedItems<T>
where
    T: PrimInt,
{
    /// Returns the number of ranked items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in rank order.
    #[inline]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Returns the item at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is out of bounds.
    #[inline]
    pub fn item(&self, rank: RankIndex) -> &Item<T> {
        debug_assert!(
            rank.get() < self.len(),
            "called `RankedItems::item` with rank out of bounds: the len is {} but the rank is {}",
            self.len(),
            rank.get()
        );

        &self.items[rank.get()]
    }

    /// Returns the input position of the item at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is out of bounds.
    #[inline]
    pub fn original_index(&self, rank: RankIndex) -> ItemIndex {
        debug_assert!(
            rank.get() < self.len(),
            "called `RankedItems::original_index` with rank out of bounds: the len is {} but the rank is {}",
            self.len(),
            rank.get()
        );

        self.origin[rank.get()]
    }

    /// Translates a set of ranks into ascending input positions.
    pub fn to_original(&self, ranks: &[RankIndex]) -> Vec<ItemIndex> {
        let mut selection: Vec<ItemIndex> =
            ranks.iter().map(|&rank| self.original_index(rank)).collect();
        selection.sort_unstable();
        selection
    }

    /// Iterates over `(rank, item)` pairs in rank order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (RankIndex, &Item<T>)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(rank, item)| (RankIndex::new(rank), item))
    }
}

/// Compares the densities of two items exactly.
///
/// `value_a / consumed_a` against `value_b / consumed_b` is decided by cross
/// multiplication in `i128`, so ratios that collapse to the same `f64` still
/// order correctly. Only when the products overflow does the stored ratio
/// decide.
fn compare_density<T>(a: &Item<T>, b: &Item<T>) -> std::cmp::Ordering
where
    T: PrimInt,
{
    fn cross_products<T: PrimInt>(a: &Item<T>, b: &Item<T>) -> Option<(i128, i128)> {
        let consumed_a = a.weight().to_i128()?.checked_add(a.volume().to_i128()?)?;
        let consumed_b = b.weight().to_i128()?.checked_add(b.volume().to_i128()?)?;
        Some((
            a.value().to_i128()?.checked_mul(consumed_b)?,
            b.value().to_i128()?.checked_mul(consumed_a)?,
        ))
    }

    match cross_products(a, b) {
        Some((lhs, rhs)) => lhs.cmp(&rhs),
        None => a.ratio().total_cmp(&b.ratio()),
    }
}

/// Orders items by descending density ratio.
///
/// The sort is stable: items with equal ratios keep their relative input
/// order. Densities are compared exactly, because the fractional relaxation
/// of the branch-and-bound solver is only an upper bound over this order.
pub fn order_by_ratio_descending<T>(items: &[Item<T>]) -> RankedItems<T>
where
    T: PrimInt,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| compare_density(&items[b], &items[a]));

    RankedItems {
        items: order.iter().map(|&index| items[index]).collect(),
        origin: order.into_iter().map(ItemIndex::new).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemField;

    type IntegerType = i64;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn ri(i: usize) -> RankIndex {
        RankIndex::new(i)
    }

    #[test]
    fn test_build_accepts_valid_sequences() {
        let items = build::<IntegerType>(&[10, 20, 30], &[20, 25, 30], &[60, 100, 120])
            .expect("valid input");
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].weight(), 20);
        assert_eq!(items[1].volume(), 25);
        assert_eq!(items[1].value(), 100);
    }

    #[test]
    fn test_build_rejects_length_mismatch() {
        let err = build::<IntegerType>(&[1, 2, 3], &[1, 2], &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                field: ItemField::Volume,
                expected: 3,
                found: 2
            }
        );

        let err = build::<IntegerType>(&[1, 2], &[1, 2], &[1]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                field: ItemField::Value,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_build_rejects_non_positive_entries() {
        let err = build::<IntegerType>(&[1, 0], &[1, 1], &[1, 1]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositive {
                item: ii(1),
                field: ItemField::Weight,
                value: 0
            }
        );

        let err = build::<IntegerType>(&[1, 1], &[1, -2], &[1, 1]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositive {
                item: ii(1),
                field: ItemField::Volume,
                value: -2
            }
        );

        let err = build::<IntegerType>(&[1], &[1], &[0]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonPositive {
                field: ItemField::Value,
                ..
            }
        ));
    }

    #[test]
    fn test_build_single_sets_zero_volume() {
        let items = build_single::<IntegerType>(&[10, 20, 30], &[60, 100, 120]).expect("valid");
        assert!(items.iter().all(|item| item.volume() == 0));
        assert!(build_single::<IntegerType>(&[10, -1], &[1, 1]).is_err());
        assert!(build_single::<IntegerType>(&[10], &[1, 1]).is_err());
    }

    #[test]
    fn test_build_empty_is_valid() {
        let items = build::<IntegerType>(&[], &[], &[]).expect("empty input is valid");
        assert!(items.is_empty());
        let ranked = order_by_ratio_descending(&items);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_order_by_ratio_descending_is_stable() {
        // Ratios: 60/30 = 2.0, 100/45 ~ 2.22, 120/60 = 2.0
        let items =
            build::<IntegerType>(&[10, 20, 30], &[20, 25, 30], &[60, 100, 120]).expect("valid");
        let ranked = order_by_ratio_descending(&items);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.original_index(ri(0)), ii(1));
        assert_eq!(ranked.original_index(ri(1)), ii(0));
        assert_eq!(ranked.original_index(ri(2)), ii(2));
        assert_eq!(ranked.item(ri(0)).value(), 100);

        let ratios: Vec<f64> = ranked.iter().map(|(_, item)| item.ratio()).collect();
        assert!(ratios.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_order_by_ratio_separates_ratios_equal_as_f64() {
        // (2^60 + 1) / 3 and 2^60 / 3 - 1 share an `f64` but differ exactly.
        let base: IntegerType = 1 << 60;
        let items = vec![Item::new(1, 2, base - 3), Item::new(2, 1, base + 1)];
        assert_eq!(items[0].ratio(), items[1].ratio());
        let ranked = order_by_ratio_descending(&items);
        assert_eq!(ranked.original_index(ri(0)), ii(1));
        assert_eq!(ranked.original_index(ri(1)), ii(0));
    }

    #[test]
    fn test_to_original_sorts_ascending() {
        let items =
            build::<IntegerType>(&[10, 20, 30], &[20, 25, 30], &[60, 100, 120]).expect("valid");
        let ranked = order_by_ratio_descending(&items);
        let selection = ranked.to_original(&[ri(0), ri(1)]);
        assert_eq!(selection, vec![ii(0), ii(1)]);
    }
}
