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


//! Flat value tables for the dynamic program.
//!
//! Both layouts store a `(W + 1) × (V + 1)` plane row‑major in one `Vec`, so a
//! cell `(w, v)` lives at `w * (V + 1) + v`.
//!
//! - `FullTable` keeps one plane per item prefix, `n + 1` planes in total.
//!   Traceback compares a cell with the same cell one plane up.
//! - `RollingTable` keeps a single plane updated in place plus one decision
//!   bit per item and cell, recording whether the item strictly improved the
//!   cell. Traceback walks the bits instead of the values, which divides the
//!   memory needed by roughly `8 · size_of::<T>()`.
//!
//! Sizes are computed with checked arithmetic and compared against a byte
//! budget before anything is allocated, so an oversized instance fails with
//! `ResourceExhaustedError` instead of aborting the process.

use fixedbitset::FixedBitSet;
use num_traits::PrimInt;
use rucksack_model::error::ResourceExhaustedError;

/// Which table the solver tabulates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableLayout {
    /// One value plane per item prefix.
    #[default]
    Full,
    /// One value plane plus one decision bit per item and cell.
    Rolling,
}

impl std::fmt::Display for TableLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableLayout::Full => write!(f, "Full"),
            TableLayout::Rolling => write!(f, "Rolling"),
        }
    }
}

/// The shape of a table: item count and the two capacity extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableShape {
    num_items: usize,
    weight_extent: usize,
    volume_extent: usize,
    plane_cells: usize,
}

impl TableShape {
    /// Creates the shape for `num_items` items and the given capacities.
    ///
    /// # Errors
    ///
    /// Returns `ResourceExhaustedError::DimensionOverflow` if a single plane
    /// cannot be indexed with `usize`.
    pub fn new(
        num_items: usize,
        weight_capacity: usize,
        volume_capacity: usize,
    ) -> Result<Self, ResourceExhaustedError> {
        let weight_extent = weight_capacity
            .checked_add(1)
            .ok_or(ResourceExhaustedError::DimensionOverflow)?;
        let volume_extent = volume_capacity
            .checked_add(1)
            .ok_or(ResourceExhaustedError::DimensionOverflow)?;
        let plane_cells = weight_extent
            .checked_mul(volume_extent)
            .ok_or(ResourceExhaustedError::DimensionOverflow)?;

        Ok(Self {
            num_items,
            weight_extent,
            volume_extent,
            plane_cells,
        })
    }

    #[inline(always)]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// `W + 1`.
    #[inline(always)]
    pub fn weight_extent(&self) -> usize {
        self.weight_extent
    }

    /// `V + 1`.
    #[inline(always)]
    pub fn volume_extent(&self) -> usize {
        self.volume_extent
    }

    /// Number of cells in one `(W + 1) × (V + 1)` plane.
    #[inline(always)]
    pub fn plane_cells(&self) -> usize {
        self.plane_cells
    }

    /// Flat position of `(w, v)` inside a plane.
    #[inline(always)]
    pub fn cell(&self, weight: usize, volume: usize) -> usize {
        debug_assert!(
            weight < self.weight_extent && volume < self.volume_extent,
            "called `TableShape::cell` with a cell out of bounds: the extents are ({}, {}) but the cell is ({}, {})",
            self.weight_extent,
            self.volume_extent,
            weight,
            volume
        );

        weight * self.volume_extent + volume
    }

    /// Number of value cells the layout stores.
    pub fn value_cells(&self, layout: TableLayout) -> Result<usize, ResourceExhaustedError> {
        match layout {
            TableLayout::Full => self
                .num_items
                .checked_add(1)
                .and_then(|planes| planes.checked_mul(self.plane_cells))
                .ok_or(ResourceExhaustedError::DimensionOverflow),
            TableLayout::Rolling => Ok(self.plane_cells),
        }
    }

    /// Number of decision bits the layout stores.
    pub fn decision_bits(&self, layout: TableLayout) -> Result<usize, ResourceExhaustedError> {
        match layout {
            TableLayout::Full => Ok(0),
            TableLayout::Rolling => self
                .num_items
                .checked_mul(self.plane_cells)
                .ok_or(ResourceExhaustedError::DimensionOverflow),
        }
    }

    /// Bytes the layout needs for values of size `value_size` plus decision bits.
    pub fn required_bytes(
        &self,
        layout: TableLayout,
        value_size: usize,
    ) -> Result<usize, ResourceExhaustedError> {
        let value_bytes = self
            .value_cells(layout)?
            .checked_mul(value_size)
            .ok_or(ResourceExhaustedError::DimensionOverflow)?;
        let bit_bytes = self.decision_bits(layout)?.div_ceil(8);
        value_bytes
            .checked_add(bit_bytes)
            .ok_or(ResourceExhaustedError::DimensionOverflow)
    }
}

/// Reserves a zeroed vector of `len` values, reporting allocator failure.
fn zeroed<T>(len: usize) -> Result<Vec<T>, ResourceExhaustedError>
where
    T: PrimInt,
{
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| ResourceExhaustedError::AllocationFailed {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    values.resize(len, T::zero());
    Ok(values)
}

/// Checks `shape` against `budget` bytes for the given layout.
pub fn check_budget<T>(
    shape: &TableShape,
    layout: TableLayout,
    budget: usize,
) -> Result<usize, ResourceExhaustedError> {
    let required = shape.required_bytes(layout, std::mem::size_of::<T>())?;
    if required > budget {
        return Err(ResourceExhaustedError::BudgetExceeded { required, budget });
    }
    Ok(required)
}

/// `n + 1` value planes, plane `i` holding the optimum over the first `i` items.
#[derive(Debug, Clone)]
pub struct FullTable<T> {
    shape: TableShape,
    values: Vec<T>,
}

impl<T> FullTable<T>
where
    T: PrimInt,
{
    /// Allocates a zeroed table.
    pub fn allocate(shape: TableShape) -> Result<Self, ResourceExhaustedError> {
        let values = zeroed(shape.value_cells(TableLayout::Full)?)?;
        Ok(Self { shape, values })
    }

    #[inline(always)]
    pub fn shape(&self) -> &TableShape {
        &self.shape
    }

    /// Returns plane `row`.
    #[inline]
    pub fn plane(&self, row: usize) -> &[T] {
        let cells = self.shape.plane_cells;
        &self.values[row * cells..(row + 1) * cells]
    }

    /// Returns plane `row - 1` for reading and plane `row` for writing.
    ///
    /// # Panics
    ///
    /// Panics if `row` is zero or beyond the last plane.
    #[inline]
    pub fn planes_mut(&mut self, row: usize) -> (&[T], &mut [T]) {
        debug_assert!(
            row >= 1 && row <= self.shape.num_items,
            "called `FullTable::planes_mut` with row out of bounds: the rows are 1..={} but the row is {}",
            self.shape.num_items,
            row
        );

        let cells = self.shape.plane_cells;
        let (head, tail) = self.values.split_at_mut(row * cells);
        (&head[(row - 1) * cells..], &mut tail[..cells])
    }

    /// Returns `dp[row][w][v]`.
    #[inline(always)]
    pub fn get(&self, row: usize, weight: usize, volume: usize) -> T {
        self.values[row * self.shape.plane_cells + self.shape.cell(weight, volume)]
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<T>()
    }
}

/// One value plane updated in place, plus decision bits for traceback.
#[derive(Debug, Clone)]
pub struct RollingTable<T> {
    shape: TableShape,
    values: Vec<T>,
    decisions: FixedBitSet,
}

impl<T> RollingTable<T>
where
    T: PrimInt,
{
    /// Allocates a zeroed plane and a cleared decision set.
    pub fn allocate(shape: TableShape) -> Result<Self, ResourceExhaustedError> {
        let values = zeroed(shape.plane_cells)?;
        let decisions = FixedBitSet::with_capacity(shape.decision_bits(TableLayout::Rolling)?);
        Ok(Self {
            shape,
            values,
            decisions,
        })
    }

    #[inline(always)]
    pub fn shape(&self) -> &TableShape {
        &self.shape
    }

    #[inline(always)]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline(always)]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Records that item `item` strictly improved cell `cell`.
    #[inline(always)]
    pub fn mark_taken(&mut self, item: usize, cell: usize) {
        self.decisions.insert(item * self.shape.plane_cells + cell);
    }

    /// Returns `true` if item `item` strictly improved cell `cell`.
    #[inline(always)]
    pub fn was_taken(&self, item: usize, cell: usize) -> bool {
        self.decisions.contains(item * self.shape.plane_cells + cell)
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<T>() + self.decisions.len().div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntegerType = i64;

    #[test]
    fn test_shape_extents_and_cells() {
        let shape = TableShape::new(3, 4, 5).expect("small shape");
        assert_eq!(shape.weight_extent(), 5);
        assert_eq!(shape.volume_extent(), 6);
        assert_eq!(shape.plane_cells(), 30);
        assert_eq!(shape.cell(0, 0), 0);
        assert_eq!(shape.cell(1, 0), 6);
        assert_eq!(shape.cell(4, 5), 29);
        assert_eq!(shape.value_cells(TableLayout::Full), Ok(120));
        assert_eq!(shape.value_cells(TableLayout::Rolling), Ok(30));
        assert_eq!(shape.decision_bits(TableLayout::Full), Ok(0));
        assert_eq!(shape.decision_bits(TableLayout::Rolling), Ok(90));
    }

    #[test]
    fn test_required_bytes() {
        let shape = TableShape::new(3, 4, 5).expect("small shape");
        assert_eq!(shape.required_bytes(TableLayout::Full, 8), Ok(960));
        // 30 values of 8 bytes plus ceil(90 / 8) = 12 bytes of bits.
        assert_eq!(shape.required_bytes(TableLayout::Rolling, 8), Ok(252));
    }

    #[test]
    fn test_overflowing_shapes_are_reported() {
        assert_eq!(
            TableShape::new(1, usize::MAX, 1),
            Err(ResourceExhaustedError::DimensionOverflow)
        );
        let shape = TableShape::new(usize::MAX, 1 << 20, 1 << 20).expect("plane fits");
        assert_eq!(
            shape.value_cells(TableLayout::Full),
            Err(ResourceExhaustedError::DimensionOverflow)
        );
    }

    #[test]
    fn test_budget_check() {
        let shape = TableShape::new(3, 4, 5).expect("small shape");
        assert_eq!(check_budget::<IntegerType>(&shape, TableLayout::Full, 960), Ok(960));
        assert_eq!(
            check_budget::<IntegerType>(&shape, TableLayout::Full, 959),
            Err(ResourceExhaustedError::BudgetExceeded {
                required: 960,
                budget: 959
            })
        );
        assert_eq!(check_budget::<i32>(&shape, TableLayout::Full, 480), Ok(480));
    }

    #[test]
    fn test_full_table_planes() {
        let shape = TableShape::new(2, 1, 1).expect("small shape");
        let mut table = FullTable::<IntegerType>::allocate(shape).expect("allocates");
        assert!(table.plane(0).iter().all(|&v| v == 0));

        {
            let (previous, current) = table.planes_mut(1);
            assert_eq!(previous.len(), 4);
            assert_eq!(current.len(), 4);
            current[3] = 9;
        }
        {
            let (previous, current) = table.planes_mut(2);
            assert_eq!(previous[3], 9);
            current[3] = previous[3] + 1;
        }

        assert_eq!(table.get(1, 1, 1), 9);
        assert_eq!(table.get(2, 1, 1), 10);
        assert_eq!(table.get(0, 1, 1), 0);
        assert!(table.allocated_memory_bytes() >= 12 * 8);
    }

    #[test]
    fn test_rolling_table_decisions() {
        let shape = TableShape::new(2, 2, 2).expect("small shape");
        let mut table = RollingTable::<IntegerType>::allocate(shape).expect("allocates");
        assert_eq!(table.values().len(), 9);

        table.values_mut()[8] = 5;
        table.mark_taken(1, 8);
        assert!(table.was_taken(1, 8));
        assert!(!table.was_taken(0, 8));
        assert_eq!(table.values()[8], 5);
    }
}
