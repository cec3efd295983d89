//! Coordinate type for addressing rows within a sectioned model.
//!
//! An `IndexPath` locates a row by its section ordinal and its row ordinal
//! within that section. Paths are positions, not identities: they are
//! derived from the current section sequence, and a path obtained before
//! the sections were replaced may afterwards point at a different row (or
//! at nothing). Use identity keys for anything that must survive a
//! structure change.

/// A (section, row) coordinate within a [`TableModel`](crate::TableModel).
///
/// Both ordinals are 0-based. Paths order by section first, then row,
/// matching the scan order of the model.
///
/// # Example
///
/// ```
/// use strata_table::IndexPath;
///
/// let first = IndexPath::new(0, 0);
/// let later = IndexPath::new(1, 2);
/// assert!(first < later);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// The section ordinal within the model.
    pub section: usize,
    /// The row ordinal within the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates a path for the given section and row ordinals.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl std::fmt::Display for IndexPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_section_then_row() {
        assert!(IndexPath::new(0, 9) < IndexPath::new(1, 0));
        assert!(IndexPath::new(1, 0) < IndexPath::new(1, 1));
        assert_eq!(IndexPath::new(2, 3), IndexPath::new(2, 3));
    }

    #[test]
    fn display_format() {
        assert_eq!(IndexPath::new(1, 4).to_string(), "[1, 4]");
    }
}
