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


//! Explicit LIFO stack for the include/exclude searches.
//!
//! The searches never recurse. Each pending subproblem is a `Node` holding
//! the rank of the next item to decide, the accumulated load and value, and
//! the path length of its parent. Expanding a node pushes the exclude child
//! first and the include child second, so the include branch is explored
//! first, exactly like a recursive search that tries "take" before "skip".
//!
//! At most one sibling per level is waiting, so the stack never holds more
//! than `num_items + 1` nodes and can be allocated once up front.

use num_traits::PrimInt;
use rucksack_model::{index::RankIndex, item::Item};

/// The decision that created a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    /// The root; nothing has been decided.
    Root,
    /// The item at this rank was packed.
    Include(RankIndex),
    /// The previous item was skipped.
    Exclude,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Branch::Root => write!(f, "Root"),
            Branch::Include(rank) => write!(f, "Include({})", rank),
            Branch::Exclude => write!(f, "Exclude"),
        }
    }
}

/// A pending subproblem of the depth‑first search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node<T> {
    // Layout keeps the three T fields together to avoid padding for T = i64.
    weight: T,
    volume: T,
    value: T,
    depth: usize,
    parent_path_len: usize,
    branch: Branch,
}

impl<T> Node<T>
where
    T: PrimInt,
{
    /// The node with nothing decided and nothing packed.
    #[inline(always)]
    pub fn root() -> Self {
        Self {
            weight: T::zero(),
            volume: T::zero(),
            value: T::zero(),
            depth: 0,
            parent_path_len: 0,
            branch: Branch::Root,
        }
    }

    /// The child that packs `item`, the item at rank `self.depth()`.
    ///
    /// `path_len` is the length of the include‑path while `self` is current.
    #[inline(always)]
    pub fn include(&self, item: &Item<T>, path_len: usize) -> Self {
        Self {
            weight: self.weight + item.weight(),
            volume: self.volume + item.volume(),
            value: self.value + item.value(),
            depth: self.depth + 1,
            parent_path_len: path_len,
            branch: Branch::Include(RankIndex::new(self.depth)),
        }
    }

    /// The child that skips the item at rank `self.depth()`.
    #[inline(always)]
    pub fn exclude(&self, path_len: usize) -> Self {
        Self {
            depth: self.depth + 1,
            parent_path_len: path_len,
            branch: Branch::Exclude,
            ..*self
        }
    }

    /// Rank of the next item to decide; equals the number of decided items.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
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

    #[inline(always)]
    pub fn parent_path_len(&self) -> usize {
        self.parent_path_len
    }

    #[inline(always)]
    pub fn branch(&self) -> Branch {
        self.branch
    }
}

impl<T> std::fmt::Display for Node<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node(depth: {}, weight: {}, volume: {}, value: {}, branch: {})",
            self.depth, self.weight, self.volume, self.value, self.branch
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeStack<T> {
    nodes: Vec<Node<T>>,
}

impl<T> NodeStack<T>
where
    T: PrimInt,
{
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a stack that never reallocates for an instance of `num_items` items.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(num_items.saturating_add(1)),
        }
    }

    /// Ensures the stack has capacity for an instance of `num_items` items.
    #[inline]
    pub fn ensure_capacity(&mut self, num_items: usize) {
        let capacity = num_items.saturating_add(1);
        if self.nodes.capacity() < capacity {
            self.nodes.reserve(capacity - self.nodes.len());
        }
    }

    #[inline(always)]
    pub fn push(&mut self, node: Node<T>) {
        self.nodes.push(node);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<Node<T>> {
        self.nodes.pop()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clears the stack, keeping its capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node<T>>()
    }
}
