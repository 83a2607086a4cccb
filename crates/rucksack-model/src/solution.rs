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


use crate::index::ItemIndex;
use num_traits::PrimInt;

/// An optimal packing: its total value and the selected items.
///
/// Selected items are stored as ascending positions in the caller's input
/// order, whichever order the producing solver searched in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    value: T,
    selected: Vec<ItemIndex>,
}

impl<T> Solution<T>
where
    T: PrimInt,
{
    /// Constructs a new `Solution`, sorting the selection ascending.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `selected` contains an index twice.
    pub fn new(value: T, mut selected: Vec<ItemIndex>) -> Self {
        selected.sort_unstable();
        debug_assert!(
            selected.windows(2).all(|w| w[0] != w[1]),
            "called `Solution::new` with a duplicate item in the selection: {:?}",
            selected
        );

        Self { value, selected }
    }

    /// The solution that packs nothing.
    #[inline]
    pub fn empty() -> Self {
        Self {
            value: T::zero(),
            selected: Vec::new(),
        }
    }

    /// Returns the total value of the selected items.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the selected items in ascending input order.
    #[inline]
    pub fn selected(&self) -> &[ItemIndex] {
        &self.selected
    }

    #[inline]
    pub fn num_selected(&self) -> usize {
        self.selected.len()
    }

    #[inline]
    pub fn contains(&self, index: ItemIndex) -> bool {
        self.selected.binary_search(&index).is_ok()
    }

    /// Returns the selection as raw `usize` positions.
    #[inline]
    pub fn selected_positions(&self) -> Vec<usize> {
        self.selected.iter().map(|index| index.get()).collect()
    }

    /// Consumes the solution, returning its value and selection.
    #[inline]
    pub fn into_parts(self) -> (T, Vec<ItemIndex>) {
        (self.value, self.selected)
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Value: {}", self.value)?;
        writeln!(f)?;

        if self.selected.is_empty() {
            writeln!(f, "   (No items selected)")?;
            return Ok(());
        }

        writeln!(f, "   {:<6} | {:<10}", "#", "Item")?;
        writeln!(f, "   {:-<6}-+-{:-<10}", "", "")?;
        for (position, index) in self.selected.iter().enumerate() {
            writeln!(f, "   {:<6} | {:<10}", position, index.get())?;
        }

        Ok(())
    }
}
