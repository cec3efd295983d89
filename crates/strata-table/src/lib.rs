//! Strata Table - a presentation-agnostic model for sectioned, scrollable lists.
//!
//! This crate provides the data side of a table view: ordered sections of
//! rows, stable identity keys, derived key-to-coordinate indexes, selection
//! bookkeeping, and incremental-search filtering. It never touches pixels;
//! a rendering collaborator (list widget, TUI table, virtualized grid)
//! queries the model for structure and invokes the per-row behavior hooks
//! it stores.
//!
//! # Example
//!
//! ```
//! use strata_table::{IndexPath, Row, Section, TableModel};
//!
//! let fruit = |key: i32, text: &str| {
//!     Row::<i32, String>::new(key, 44.0, "fruit", |reuse_id| reuse_id.to_string())
//!         .with_search_text(text)
//! };
//!
//! let model = TableModel::with_sections(vec![
//!     Section::new(100, vec![fruit(1, "apple"), fruit(2, "banana")]),
//!     Section::new(200, vec![fruit(3, "Apricot")]),
//! ]);
//!
//! assert_eq!(model.index_path_of(&3), Some(IndexPath::new(1, 0)));
//!
//! let matches = model.rows_for_search_string("ap");
//! let keys: Vec<i32> = matches.iter().map(|r| *r.key()).collect();
//! assert_eq!(keys, vec![1, 3]);
//! ```

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    CellGenerator, CellUpdater, HeaderFooter, HeaderFooterGenerator, IndexPath, Row, Section,
    TableModel,
};
