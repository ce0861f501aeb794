//! Which declared signals are currently drawn.

use std::collections::BTreeSet;

/// Set of visible signal indices into [`crate::document::Document::signals`].
///
/// Iteration is in ascending index order, which is declaration order, so
/// rows always stack in the order signals were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Empty selection; renders the grid only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every signal of a document with `count` signals, the state a view
    /// opens with.
    #[must_use]
    pub fn all(count: usize) -> Self {
        Self {
            indices: (0..count).collect(),
        }
    }

    /// Show `index`. Returns `true` if it was hidden.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Hide `index`. Returns `true` if it was shown.
    pub fn remove(&mut self, index: usize) -> bool {
        self.indices.remove(&index)
    }

    /// Flip visibility of `index`. Returns the new visibility.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Whether `index` is shown.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Hide everything.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Number of shown indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when nothing is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Shown indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}
