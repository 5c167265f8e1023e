//! Disjoint-set (Union-Find) over arbitrary hashable elements.
//!
//! Elements are interned to dense indices; parent pointers live in `Cell`s so
//! that `find` can compress paths through a shared reference. Union by rank
//! plus path compression keeps every operation near constant time.

use std::cell::Cell;
use std::collections::HashMap;

use crate::types::{GraphError, GraphResult, VertexValue};

/// A Disjoint Set (Union-Find) data structure.
#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    index: HashMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<Cell<usize>>,
    rank: Vec<u8>,
    sets: usize,
}

impl<T: VertexValue> UnionFind<T> {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty structure with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            elements: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// Put `element` in a singleton set. No-op if it is already known.
    pub fn make_set(&mut self, element: T) {
        if self.index.contains_key(&element) {
            return;
        }
        let id = self.elements.len();
        self.index.insert(element.clone(), id);
        self.elements.push(element);
        self.parent.push(Cell::new(id));
        self.rank.push(0);
        self.sets += 1;
    }

    /// `make_set` for every element of `elements`.
    pub fn make_set_all<I: IntoIterator<Item = T>>(&mut self, elements: I) {
        for element in elements {
            self.make_set(element);
        }
    }

    fn root(&self, id: usize) -> usize {
        let mut root = id;
        while let Some(parent) = self.parent.get(root).map(Cell::get) {
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = id;
        while current != root {
            match self.parent.get(current) {
                Some(cell) => current = cell.replace(root),
                None => break,
            }
        }
        root
    }

    /// Representative of the set containing `element`, or `None` if it was never added.
    pub fn find(&self, element: &T) -> Option<T> {
        let id = *self.index.get(element)?;
        self.elements.get(self.root(id)).cloned()
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `false` if they already share a set.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either element was never passed to `make_set`.
    pub fn union(&mut self, a: &T, b: &T) -> GraphResult<bool> {
        let ia = self.id_of(a)?;
        let ib = self.id_of(b)?;
        let ra = self.root(ia);
        let rb = self.root(ib);
        if ra == rb {
            return Ok(false);
        }

        let rank_a = self.rank.get(ra).copied().unwrap_or(0);
        let rank_b = self.rank.get(rb).copied().unwrap_or(0);
        let (child, parent) = if rank_a < rank_b { (ra, rb) } else { (rb, ra) };
        if let Some(cell) = self.parent.get(child) {
            cell.set(parent);
        }
        if rank_a == rank_b {
            if let Some(rank) = self.rank.get_mut(parent) {
                *rank += 1;
            }
        }
        self.sets -= 1;
        Ok(true)
    }

    fn id_of(&self, element: &T) -> GraphResult<usize> {
        self.index.get(element).copied().ok_or_else(|| {
            GraphError::InvalidArgument(format!("{:?} was never added to the set", element))
        })
    }

    /// Whether `a` and `b` belong to the same set. `false` if either is unknown.
    pub fn connected(&self, a: &T, b: &T) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.root(ia) == self.root(ib),
            _ => false,
        }
    }

    /// Whether `element` was ever added.
    pub fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    /// Number of disjoint sets.
    pub fn size(&self) -> usize {
        self.sets
    }

    /// Number of elements across all sets.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element was ever added.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: VertexValue> Default for UnionFind<T> {
    fn default() -> Self {
        Self::new()
    }
}
