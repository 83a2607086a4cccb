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


use rucksack_model::index::RankIndex;

/// The include‑path of the node currently being processed.
///
/// A single buffer serves the whole search. Every node records the path
/// length of its parent; when the node is popped the buffer is truncated back
/// to that length before the node's own decision is pushed, so a sibling
/// never sees items included on another branch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionPath {
    ranks: Vec<RankIndex>,
}

impl SelectionPath {
    #[inline]
    pub fn new() -> Self {
        Self { ranks: Vec::new() }
    }

    /// Creates a path with room for every item of an instance.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            ranks: Vec::with_capacity(num_items),
        }
    }

    /// Ensures room for `num_items` entries without reallocating during search.
    #[inline]
    pub fn ensure_capacity(&mut self, num_items: usize) {
        if self.ranks.capacity() < num_items {
            self.ranks.reserve(num_items - self.ranks.len());
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    #[inline(always)]
    pub fn push(&mut self, rank: RankIndex) {
        self.ranks.push(rank);
    }

    /// Truncates the path back to `len` entries.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `len` exceeds the current length; a node may
    /// only restore a prefix of the path it was created on.
    #[inline(always)]
    pub fn restore(&mut self, len: usize) {
        debug_assert!(
            len <= self.ranks.len(),
            "called `SelectionPath::restore` with a length beyond the path: the len is {} but the target is {}",
            self.ranks.len(),
            len
        );

        self.ranks.truncate(len);
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[RankIndex] {
        &self.ranks
    }

    /// Clears the path, keeping its capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.ranks.clear();
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.ranks.capacity() * std::mem::size_of::<RankIndex>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ri(i: usize) -> RankIndex {
        RankIndex::new(i)
    }

    #[test]
    fn test_push_and_restore() {
        let mut path = SelectionPath::preallocated(4);
        assert!(path.is_empty());
        path.push(ri(0));
        path.push(ri(2));
        path.push(ri(3));
        assert_eq!(path.len(), 3);

        path.restore(1);
        assert_eq!(path.as_slice(), &[ri(0)]);

        path.push(ri(1));
        assert_eq!(path.as_slice(), &[ri(0), ri(1)]);

        path.restore(2);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut path = SelectionPath::new();
        path.ensure_capacity(16);
        let before = path.allocated_memory_bytes();
        path.push(ri(5));
        path.reset();
        assert!(path.is_empty());
        assert_eq!(path.allocated_memory_bytes(), before);
        assert!(before >= 16 * std::mem::size_of::<RankIndex>());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "SelectionPath::restore")]
    fn test_restore_beyond_length_panics() {
        let mut path = SelectionPath::new();
        path.push(ri(0));
        path.restore(2);
    }
}
