//! The sectioned table model and its derived coordinate indexes.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

use super::index::IndexPath;
use super::row::Row;
use super::section::Section;

/// The model backing a sectioned list view.
///
/// A `TableModel` owns an ordered sequence of [`Section`]s and derives two
/// key-to-coordinate maps from it: section key to section ordinal, and row
/// key to [`IndexPath`]. Both maps are rebuilt eagerly on every
/// [`set_sections`](Self::set_sections), so lookups never observe a stale
/// structure.
///
/// Row keys must be unique across the whole model, not just within their
/// section: the row coordinate index is a single flat map, and a later
/// duplicate silently overwrites the earlier entry (a `warn!` event is
/// emitted, but no error is raised). Use
/// [`try_with_sections`](Self::try_with_sections) to reject duplicates at
/// construction instead.
///
/// All methods take `&self`; interior state lives behind
/// [`parking_lot::RwLock`]s. The intended use is single-writer with
/// external serialization - one coordinating owner replaces sections and
/// toggles selection, while readers query coordinates and filtered views.
///
/// # Example
///
/// ```
/// use strata_table::{IndexPath, Row, Section, TableModel};
///
/// let row = |key: i32| Row::<i32, String>::new(key, 44.0, "cell", |r| r.to_string());
///
/// let model = TableModel::with_sections(vec![
///     Section::new(0, vec![row(10), row(11)]),
///     Section::new(1, vec![row(20)]),
/// ]);
///
/// assert_eq!(model.index_path_of(&20), Some(IndexPath::new(1, 0)));
/// assert_eq!(model.section_index_of(&1), Some(1));
/// assert_eq!(model.row_count(), 3);
/// ```
pub struct TableModel<K, C> {
    sections: RwLock<Vec<Section<K, C>>>,
    indexes: RwLock<Indexes<K>>,
}

/// Both derived coordinate maps, swapped as one unit so a reader never
/// observes maps from different generations.
struct Indexes<K> {
    sections: HashMap<K, usize>,
    rows: HashMap<K, IndexPath>,
}

impl<K, C> TableModel<K, C>
where
    K: Clone + Eq + Hash,
{
    /// Creates a model wrapping the given section sequence as-is.
    ///
    /// No merging, sorting, or key validation is performed; key uniqueness
    /// is the caller's responsibility. Duplicate row keys collapse in the
    /// coordinate index (last one scanned wins).
    pub fn with_sections(sections: Vec<Section<K, C>>) -> Self {
        let indexes = build_indexes(&sections);
        Self {
            sections: RwLock::new(sections),
            indexes: RwLock::new(indexes),
        }
    }

    /// Replaces the whole section sequence.
    ///
    /// Both coordinate indexes are rebuilt before the write lock is
    /// released, so no reader observes the new sections paired with the
    /// prior indexes.
    pub fn set_sections(&self, sections: Vec<Section<K, C>>) {
        let indexes = build_indexes(&sections);
        let mut guard = self.sections.write();
        *self.indexes.write() = indexes;
        *guard = sections;
        debug!(
            sections = guard.len(),
            rows = guard.iter().map(|s| s.rows().len()).sum::<usize>(),
            "replaced sections and rebuilt coordinate indexes"
        );
    }

    /// Returns read access to the ordered section sequence.
    ///
    /// The returned guard holds a read lock; drop it before calling any
    /// method that writes (such as [`set_sections`](Self::set_sections)).
    pub fn sections(&self) -> impl std::ops::Deref<Target = Vec<Section<K, C>>> + '_ {
        self.sections.read()
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.read().len()
    }

    /// Returns the total number of rows across all sections.
    pub fn row_count(&self) -> usize {
        self.sections.read().iter().map(|s| s.rows().len()).sum()
    }

    /// Returns `true` if the model has no rows.
    pub fn is_empty(&self) -> bool {
        self.sections.read().iter().all(|s| s.rows().is_empty())
    }

    /// Returns a snapshot of the section-key to section-ordinal map.
    pub fn section_indexes(&self) -> HashMap<K, usize> {
        self.indexes.read().sections.clone()
    }

    /// Returns a snapshot of the row-key to coordinate map, spanning all
    /// sections.
    pub fn row_index_paths(&self) -> HashMap<K, IndexPath> {
        self.indexes.read().rows.clone()
    }

    /// Returns snapshots of both coordinate maps, taken under a single
    /// lock acquisition.
    ///
    /// Use this instead of calling [`section_indexes`](Self::section_indexes)
    /// and [`row_index_paths`](Self::row_index_paths) back to back when a
    /// writer may be replacing sections concurrently: the pair is
    /// guaranteed to come from one generation of the structure.
    pub fn indexes(&self) -> (HashMap<K, usize>, HashMap<K, IndexPath>) {
        let guard = self.indexes.read();
        (guard.sections.clone(), guard.rows.clone())
    }

    /// Looks up the coordinate of the row with the given key.
    ///
    /// `None` means the key is absent from the current structure ("item no
    /// longer present"), not a fault.
    pub fn index_path_of(&self, key: &K) -> Option<IndexPath> {
        self.indexes.read().rows.get(key).copied()
    }

    /// Looks up the coordinate of the given row by its key.
    ///
    /// Key equality stands in for reference identity: any row carrying the
    /// same key resolves to the same coordinate.
    pub fn index_path_for_row(&self, row: &Row<K, C>) -> Option<IndexPath> {
        self.index_path_of(row.key())
    }

    /// Looks up the ordinal of the section with the given key.
    pub fn section_index_of(&self, key: &K) -> Option<usize> {
        self.indexes.read().sections.get(key).copied()
    }

    /// Returns a clone of the row at the given coordinate, if it exists.
    pub fn row_at(&self, path: IndexPath) -> Option<Row<K, C>> {
        self.sections
            .read()
            .get(path.section)?
            .rows()
            .get(path.row)
            .cloned()
    }

    /// Returns the key of the section at the given ordinal, if it exists.
    pub fn section_key_at(&self, index: usize) -> Option<K> {
        self.sections.read().get(index).map(|s| s.key().clone())
    }

    /// Returns every selected row, in section-then-row order.
    ///
    /// This view is derived by scanning on every call and is therefore
    /// always consistent with the current sections - toggling a row's
    /// selected flag is visible immediately, with no recompute step.
    pub fn selected_rows(&self) -> Vec<Row<K, C>> {
        self.sections
            .read()
            .iter()
            .flat_map(|section| section.rows().iter())
            .filter(|row| row.selected())
            .cloned()
            .collect()
    }

    /// Returns every row whose search text contains `query`
    /// case-insensitively, in section-then-row order.
    ///
    /// Rows without search text never match a non-empty query. An empty
    /// query matches every row: an incremental-search caller clears the
    /// query to show the unfiltered list. This is a pure read; no field of
    /// any source row is touched.
    pub fn rows_for_search_string(&self, query: &str) -> Vec<Row<K, C>> {
        let sections = self.sections.read();
        let matches: Vec<Row<K, C>> = if query.is_empty() {
            sections
                .iter()
                .flat_map(|section| section.rows().iter())
                .cloned()
                .collect()
        } else {
            let needle = query.to_lowercase();
            sections
                .iter()
                .flat_map(|section| section.rows().iter())
                .filter(|row| {
                    row.search_text()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect()
        };
        trace!(
            query_len = query.len(),
            matches = matches.len(),
            "filtered rows for search string"
        );
        matches
    }

    /// Applies `f` to the stored row with the given key.
    ///
    /// This is the write path into a stored row: flags, search text, and
    /// hooks can change, while the key and sizing/recycling pair are fixed
    /// at construction, so the coordinate indexes cannot go stale through
    /// it. Returns `None` if the key is absent.
    pub fn modify_row<F, R>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&mut Row<K, C>) -> R,
    {
        let path = self.index_path_of(key)?;
        let mut sections = self.sections.write();
        let row = sections.get_mut(path.section)?.rows_mut().get_mut(path.row)?;
        Some(f(row))
    }

    /// Sets the selected flag of the row with the given key.
    ///
    /// Returns `false` without changing anything if the key is absent or
    /// the row is not selectable.
    pub fn set_row_selected(&self, key: &K, selected: bool) -> bool {
        self.modify_row(key, |row| {
            if !row.selectable() {
                return false;
            }
            row.set_selected(selected);
            true
        })
        .unwrap_or(false)
    }
}

impl<K, C> TableModel<K, C>
where
    K: Clone + Eq + Hash + Default,
{
    /// Creates a model holding `rows` inside a single synthetic section
    /// keyed by `K::default()`.
    ///
    /// Used when section grouping is irrelevant to the caller. The default
    /// value of the key type is the fixed sentinel for that section.
    pub fn with_rows(rows: Vec<Row<K, C>>) -> Self {
        Self::with_sections(vec![Section::new(K::default(), rows)])
    }

    /// Wraps the result of
    /// [`rows_for_search_string`](Self::rows_for_search_string) in a new
    /// model, using the same single-section convenience as
    /// [`with_rows`](Self::with_rows).
    ///
    /// Filtering flattens structure: original section boundaries, headers,
    /// footers, and index titles are discarded. The source model is not
    /// mutated.
    pub fn model_for_search_string(&self, query: &str) -> Self {
        Self::with_rows(self.rows_for_search_string(query))
    }
}

impl<K, C> TableModel<K, C>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    /// Creates a model after validating key uniqueness.
    ///
    /// Rejects duplicate section keys and duplicate row keys (checked
    /// across all sections) with [`Error::DuplicateSectionKey`] /
    /// [`Error::DuplicateRowKey`] instead of silently overwriting index
    /// entries. The permissive [`with_sections`](Self::with_sections)
    /// remains the default path.
    pub fn try_with_sections(sections: Vec<Section<K, C>>) -> Result<Self> {
        let mut section_keys = HashSet::new();
        let mut row_keys = HashSet::new();
        for section in &sections {
            if !section_keys.insert(section.key().clone()) {
                return Err(Error::duplicate_section_key(section.key()));
            }
            for row in section.rows() {
                if !row_keys.insert(row.key().clone()) {
                    return Err(Error::duplicate_row_key(row.key()));
                }
            }
        }
        Ok(Self::with_sections(sections))
    }
}

/// Builds both coordinate maps in a single linear scan over sections in
/// order, then rows in order within each section.
///
/// Later-scanned duplicate keys overwrite earlier entries; that is a
/// documented hazard of the flat maps, so it is logged but never reported
/// as an error.
fn build_indexes<K, C>(sections: &[Section<K, C>]) -> Indexes<K>
where
    K: Clone + Eq + Hash,
{
    let mut indexes = Indexes {
        sections: HashMap::with_capacity(sections.len()),
        rows: HashMap::new(),
    };

    for (section_index, section) in sections.iter().enumerate() {
        if indexes
            .sections
            .insert(section.key().clone(), section_index)
            .is_some()
        {
            warn!(
                section = section_index,
                "duplicate section key overwrites earlier index entry"
            );
        }
        for (row_index, row) in section.rows().iter().enumerate() {
            let path = IndexPath::new(section_index, row_index);
            if indexes.rows.insert(row.key().clone(), path).is_some() {
                warn!(
                    section = path.section,
                    row = path.row,
                    "duplicate row key overwrites earlier index entry"
                );
            }
        }
    }

    indexes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: i32, search: &str) -> Row<i32, String> {
        Row::new(key, 44.0, "cell", |reuse_id| reuse_id.to_string()).with_search_text(search)
    }

    fn plain_row(key: i32) -> Row<i32, String> {
        Row::new(key, 44.0, "cell", |reuse_id| reuse_id.to_string())
    }

    /// The worked example: two sections, three rows, "ap" matches the
    /// rows whose text contains it regardless of case.
    fn fruit_model() -> TableModel<i32, String> {
        TableModel::with_sections(vec![
            Section::new(100, vec![row(1, "apple"), row(2, "banana")]),
            Section::new(200, vec![row(3, "Apricot")]),
        ])
    }

    #[test]
    fn model_is_send_and_sync() {
        fn check<T: Send + Sync>() {}
        check::<TableModel<i32, String>>();
    }

    #[test]
    fn row_index_paths_cover_every_row() {
        let model = fruit_model();
        let paths = model.row_index_paths();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[&1], IndexPath::new(0, 0));
        assert_eq!(paths[&2], IndexPath::new(0, 1));
        assert_eq!(paths[&3], IndexPath::new(1, 0));
    }

    #[test]
    fn section_indexes_cover_every_section() {
        let model = fruit_model();
        let indexes = model.section_indexes();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[&100], 0);
        assert_eq!(indexes[&200], 1);
    }

    #[test]
    fn indexes_match_a_manual_scan() {
        let model = fruit_model();
        let sections = model.sections();
        for (i, section) in sections.iter().enumerate() {
            assert_eq!(model.section_index_of(section.key()), Some(i));
            for (j, row) in section.rows().iter().enumerate() {
                assert_eq!(model.index_path_of(row.key()), Some(IndexPath::new(i, j)));
            }
        }
    }

    #[test]
    fn set_sections_rebuilds_indexes() {
        let model = fruit_model();
        assert_eq!(model.index_path_of(&3), Some(IndexPath::new(1, 0)));

        // Reverse the sections; every coordinate must reflect the new order.
        model.set_sections(vec![
            Section::new(200, vec![row(3, "Apricot")]),
            Section::new(100, vec![row(1, "apple"), row(2, "banana")]),
        ]);

        assert_eq!(model.index_path_of(&3), Some(IndexPath::new(0, 0)));
        assert_eq!(model.index_path_of(&1), Some(IndexPath::new(1, 0)));
        assert_eq!(model.section_index_of(&200), Some(0));
    }

    #[test]
    fn removed_row_is_not_found() {
        let model = fruit_model();
        assert!(model.index_path_of(&2).is_some());

        model.set_sections(vec![Section::new(100, vec![row(1, "apple")])]);
        assert_eq!(model.index_path_of(&2), None);
        assert_eq!(model.index_path_of(&3), None);
    }

    #[test]
    fn never_inserted_row_is_not_found() {
        let model = fruit_model();
        let stranger = row(99, "kiwi");
        assert_eq!(model.index_path_for_row(&stranger), None);
        assert_eq!(model.index_path_of(&99), None);
    }

    #[test]
    fn index_path_for_row_resolves_by_key() {
        let model = fruit_model();
        // A distinct Row value with an equal key resolves to the same spot.
        let twin = row(2, "completely different text");
        assert_eq!(model.index_path_for_row(&twin), Some(IndexPath::new(0, 1)));
    }

    #[test]
    fn duplicate_row_key_last_scanned_wins() {
        let model = TableModel::with_sections(vec![
            Section::new(100, vec![row(1, "first")]),
            Section::new(200, vec![row(1, "second")]),
        ]);
        // The flat map collapses on the duplicate; the later entry wins.
        assert_eq!(model.index_path_of(&1), Some(IndexPath::new(1, 0)));
        assert_eq!(model.row_index_paths().len(), 1);
    }

    #[test]
    fn try_with_sections_rejects_duplicate_row_keys() {
        let result = TableModel::try_with_sections(vec![
            Section::new(100, vec![row(1, "first")]),
            Section::new(200, vec![row(1, "second")]),
        ]);
        assert!(matches!(result, Err(Error::DuplicateRowKey { .. })));
    }

    #[test]
    fn try_with_sections_rejects_duplicate_section_keys() {
        let result = TableModel::try_with_sections(vec![
            Section::new(100, vec![row(1, "a")]),
            Section::new(100, vec![row(2, "b")]),
        ]);
        assert!(matches!(result, Err(Error::DuplicateSectionKey { .. })));
    }

    #[test]
    fn try_with_sections_accepts_unique_keys() {
        let model = TableModel::try_with_sections(vec![
            Section::new(100, vec![row(1, "a")]),
            Section::new(200, vec![row(2, "b")]),
        ])
        .unwrap();
        assert_eq!(model.row_count(), 2);
    }

    #[test]
    fn with_rows_wraps_a_single_sentinel_section() {
        let model = TableModel::with_rows(vec![plain_row(1), plain_row(2)]);
        assert_eq!(model.section_count(), 1);
        assert_eq!(model.section_key_at(0), Some(i32::default()));

        let sections = model.sections();
        let keys: Vec<i32> = sections[0].rows().iter().map(|r| *r.key()).collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn search_matches_case_insensitive_substring_in_order() {
        let model = fruit_model();
        let matches = model.rows_for_search_string("ap");
        let keys: Vec<i32> = matches.iter().map(|r| *r.key()).collect();
        // "apple" (0,0) then "Apricot" (1,0); section order is preserved.
        assert_eq!(keys, vec![1, 3]);

        let matches = model.rows_for_search_string("APRI");
        let keys: Vec<i32> = matches.iter().map(|r| *r.key()).collect();
        assert_eq!(keys, vec![3]);
    }

    #[test]
    fn search_without_text_never_matches_nonempty_query() {
        let model = TableModel::with_sections(vec![Section::new(
            100,
            vec![plain_row(1), row(2, "carrot")],
        )]);
        let keys: Vec<i32> = model
            .rows_for_search_string("r")
            .iter()
            .map(|r| *r.key())
            .collect();
        assert_eq!(keys, vec![2]);
    }

    #[test]
    fn empty_query_matches_every_row() {
        let model = TableModel::with_sections(vec![
            Section::new(100, vec![plain_row(1), row(2, "banana")]),
            Section::new(200, vec![row(3, "Apricot")]),
        ]);
        let keys: Vec<i32> = model
            .rows_for_search_string("")
            .iter()
            .map(|r| *r.key())
            .collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn search_no_matches_is_empty() {
        let model = fruit_model();
        assert!(model.rows_for_search_string("zucchini").is_empty());
    }

    #[test]
    fn filtering_never_mutates_the_source() {
        let model = fruit_model();
        model.set_row_selected(&1, true);

        let _ = model.rows_for_search_string("ap");
        let _ = model.model_for_search_string("ban");

        let sections = model.sections();
        assert!(sections[0].rows()[0].selected());
        assert!(!sections[0].rows()[1].selected());
        assert_eq!(sections[0].rows()[0].height(), 44.0);
        assert_eq!(sections[0].rows()[0].search_text(), Some("apple"));
    }

    #[test]
    fn model_for_search_string_flattens_structure() {
        let model = TableModel::with_sections(vec![
            Section::new(100, vec![row(1, "apple")]).with_index_title("A"),
            Section::new(200, vec![row(3, "Apricot")]).with_index_title("B"),
        ]);

        let filtered = model.model_for_search_string("ap");
        assert_eq!(filtered.section_count(), 1);
        assert_eq!(filtered.section_key_at(0), Some(i32::default()));

        let sections = filtered.sections();
        assert_eq!(sections[0].index_title(), None);
        assert!(sections[0].header().is_none());
        let keys: Vec<i32> = sections[0].rows().iter().map(|r| *r.key()).collect();
        assert_eq!(keys, vec![1, 3]);
    }

    #[test]
    fn selected_rows_derives_from_flags() {
        let model = fruit_model();
        assert!(model.selected_rows().is_empty());

        model.set_row_selected(&2, true);
        model.set_row_selected(&3, true);

        let keys: Vec<i32> = model.selected_rows().iter().map(|r| *r.key()).collect();
        assert_eq!(keys, vec![2, 3]); // section-then-row order

        model.set_row_selected(&2, false);
        let keys: Vec<i32> = model.selected_rows().iter().map(|r| *r.key()).collect();
        assert_eq!(keys, vec![3]);
    }

    #[test]
    fn selection_respects_selectable_flag() {
        let model = TableModel::with_sections(vec![Section::new(
            100,
            vec![plain_row(1).with_selectable(false), plain_row(2)],
        )]);

        assert!(!model.set_row_selected(&1, true));
        assert!(model.set_row_selected(&2, true));
        assert!(!model.set_row_selected(&99, true));

        let keys: Vec<i32> = model.selected_rows().iter().map(|r| *r.key()).collect();
        assert_eq!(keys, vec![2]);
    }

    #[test]
    fn selection_survives_into_filtered_rows() {
        let model = fruit_model();
        model.set_row_selected(&3, true);

        // Clones carry the flag snapshot.
        let matches = model.rows_for_search_string("apricot");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].selected());
    }

    #[test]
    fn modify_row_reaches_the_stored_row() {
        let model = fruit_model();
        let old = model.modify_row(&2, |row| {
            let old = row.search_text().map(str::to_owned);
            row.set_search_text("plantain");
            old
        });
        assert_eq!(old, Some(Some("banana".to_owned())));

        let keys: Vec<i32> = model
            .rows_for_search_string("plantain")
            .iter()
            .map(|r| *r.key())
            .collect();
        assert_eq!(keys, vec![2]);
        assert!(model.modify_row(&99, |_| ()).is_none());
    }

    #[test]
    fn counts_and_emptiness() {
        let model = fruit_model();
        assert_eq!(model.section_count(), 2);
        assert_eq!(model.row_count(), 3);
        assert!(!model.is_empty());

        model.set_sections(vec![Section::new(100, Vec::new())]);
        assert_eq!(model.section_count(), 1);
        assert_eq!(model.row_count(), 0);
        assert!(model.is_empty());
    }

    #[test]
    fn index_snapshot_pair_comes_from_one_generation() {
        use std::sync::Arc;
        use std::thread;

        let model = Arc::new(fruit_model());
        let writer = {
            let model = Arc::clone(&model);
            thread::spawn(move || {
                for _ in 0..500 {
                    model.set_sections(vec![
                        Section::new(100, vec![row(1, "apple"), row(2, "banana")]),
                        Section::new(200, vec![row(3, "Apricot")]),
                    ]);
                    model.set_sections(vec![Section::new(300, vec![row(5, "elderberry")])]);
                }
            })
        };

        // Both maps swap as one unit, so a combined snapshot always pairs
        // two sections with three rows or one section with one row.
        for _ in 0..500 {
            let (sections, rows) = model.indexes();
            match sections.len() {
                2 => assert_eq!(rows.len(), 3),
                1 => assert_eq!(rows.len(), 1),
                n => panic!("snapshot with {n} sections"),
            }
        }
        writer.join().unwrap();
    }

    #[test]
    fn rebuild_and_search_events_emit_under_a_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("strata_table=trace")
            .with_test_writer()
            .try_init();

        let model = fruit_model();
        // Rebuild with a duplicate key: exercises the debug! rebuild event
        // and the warn! overwrite event.
        model.set_sections(vec![Section::new(
            100,
            vec![row(1, "apple"), row(1, "duplicate")],
        )]);
        // Both search paths emit the trace! event, empty query included.
        assert_eq!(model.rows_for_search_string("").len(), 2);
        assert_eq!(model.rows_for_search_string("ap").len(), 1);
    }

    #[test]
    fn row_at_round_trips_with_the_index() {
        let model = fruit_model();
        let path = model.index_path_of(&3).unwrap();
        let found = model.row_at(path).unwrap();
        assert_eq!(*found.key(), 3);
        assert!(model.row_at(IndexPath::new(5, 0)).is_none());
        assert!(model.row_at(IndexPath::new(0, 9)).is_none());
    }
}
