//! Sectioned table model.
//!
//! This module provides the core types for describing a sectioned list
//! independently of any rendering technology:
//!
//! - [`IndexPath`]: a (section, row) coordinate within a model
//! - [`Row`]: a leaf entity with an identity key, sizing/recycling info,
//!   and opaque behavior hooks
//! - [`Section`]: an ordered group of rows under an identity key, with
//!   optional header, footer, and index title
//! - [`HeaderFooter`]: a height plus a content producer for a section
//!   header or footer
//! - [`TableModel`]: owns the section sequence, derives the two
//!   key-to-coordinate indexes, and implements search filtering and the
//!   selection view
//!
//! Identity keys are generic (`K: Clone + Eq + Hash`) and positional
//! coordinates are derived: callers address items by key, and the model
//! answers "where is it now" against the current section sequence.
//!
//! # Data flow
//!
//! ```text
//! ┌───────────┐  assemble   ┌────────────┐  key → coordinate   ┌──────────┐
//! │  caller   │────────────>│ TableModel │<────────────────────│   view   │
//! │ Rows/Secs │             │  + indexes │   hooks, heights    │ (extern) │
//! └───────────┘             └────────────┘────────────────────>└──────────┘
//! ```
//!
//! The model never invokes the hooks it stores; the rendering collaborator
//! does, when it realizes or recycles content instances.

mod index;
mod row;
mod section;
mod table_model;

pub use index::IndexPath;
pub use row::{CellGenerator, CellUpdater, Row};
pub use section::{HeaderFooter, HeaderFooterGenerator, Section};
pub use table_model::TableModel;
