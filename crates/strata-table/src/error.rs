//! Error types for strict model construction.
//!
//! The permissive constructors ([`TableModel::with_sections`] and friends)
//! never fail; absence on lookup is reported as `None`, not an error. The
//! only fallible surface is [`TableModel::try_with_sections`], which
//! rejects duplicate identity keys instead of letting a later entry
//! silently overwrite an earlier one.
//!
//! [`TableModel::with_sections`]: crate::TableModel::with_sections
//! [`TableModel::try_with_sections`]: crate::TableModel::try_with_sections

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building a model with key validation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two sections share the same identity key.
    #[error("duplicate section key {key}")]
    DuplicateSectionKey { key: String },

    /// Two rows share the same identity key. Row keys must be unique
    /// across the whole model, not just within one section, because the
    /// row coordinate index is a single flat map.
    #[error("duplicate row key {key} (row keys must be unique across the whole model)")]
    DuplicateRowKey { key: String },
}

impl Error {
    /// Create a duplicate-section-key error from the offending key.
    pub fn duplicate_section_key(key: &impl std::fmt::Debug) -> Self {
        Self::DuplicateSectionKey {
            key: format!("{key:?}"),
        }
    }

    /// Create a duplicate-row-key error from the offending key.
    pub fn duplicate_row_key(key: &impl std::fmt::Debug) -> Self {
        Self::DuplicateRowKey {
            key: format!("{key:?}"),
        }
    }
}
