//! Growable ordered set of literal indices.

use core::ops::Deref;

use smallvec::SmallVec;

/// Inline capacity before spilling to the heap.
///
/// Trained clauses usually include only a handful of literals, so most
/// sets never allocate.
const INLINE_CAPACITY: usize = 16;

/// # Overview
///
/// Insertion-ordered set of feature indices backed by a [`SmallVec`].
///
/// Append is O(1) amortized, removal and membership are O(n). Sets stay
/// small relative to `n_features`, so linear search wins over hashing.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::IndexSet;
///
/// let mut set = IndexSet::new();
/// assert!(set.insert(3));
/// assert!(!set.insert(3));
/// assert!(set.remove(3));
/// assert!(set.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet {
    indices: SmallVec<[u32; INLINE_CAPACITY]>
}

impl IndexSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `idx` unless already present. Returns true if added.
    #[inline]
    pub fn insert(&mut self, idx: usize) -> bool {
        if self.contains(idx) {
            return false;
        }
        self.indices.push(idx as u32);
        true
    }

    /// Appends without a membership check. Used by full rebuilds that visit
    /// every index once.
    #[inline]
    pub(crate) fn push_unchecked(&mut self, idx: usize) {
        self.indices.push(idx as u32);
    }

    /// Removes `idx`, keeping the order of the rest. Returns true if found.
    #[inline]
    pub fn remove(&mut self, idx: usize) -> bool {
        match self.indices.iter().position(|&i| i as usize == idx) {
            Some(pos) => {
                self.indices.remove(pos);
                true
            }
            None => false
        }
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.indices.iter().any(|&i| i as usize == idx)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Iterates indices in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().map(|&i| i as usize)
    }
}

impl Deref for IndexSet {
    type Target = [u32];

    #[inline]
    fn deref(&self) -> &[u32] {
        &self.indices
    }
}
