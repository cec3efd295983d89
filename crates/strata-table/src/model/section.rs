//! Section entity and header/footer models.

use std::fmt;
use std::sync::Arc;

use super::row::Row;

/// Produces the content instance for a section header or footer.
///
/// Invoked by the rendering collaborator when the header or footer comes
/// into view; the model only stores it.
pub type HeaderFooterGenerator<C> = Arc<dyn Fn() -> C + Send + Sync>;

/// Model for a section header or footer: a height plus a content producer.
///
/// Immutable after construction.
pub struct HeaderFooter<C> {
    height: f32,
    generator: HeaderFooterGenerator<C>,
}

impl<C> HeaderFooter<C> {
    /// Creates a header/footer model with the given height and content
    /// producer.
    ///
    /// # Panics
    ///
    /// Panics if `height` is negative or not finite.
    pub fn new<F>(height: f32, generator: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        assert!(
            height >= 0.0 && height.is_finite(),
            "header/footer height must be a non-negative finite number, got {height}"
        );
        Self {
            height,
            generator: Arc::new(generator),
        }
    }

    /// Returns the height, consumed by layout.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the content producer.
    #[inline]
    pub fn generator(&self) -> &HeaderFooterGenerator<C> {
        &self.generator
    }
}

impl<C> Clone for HeaderFooter<C> {
    fn clone(&self) -> Self {
        Self {
            height: self.height,
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<C> fmt::Debug for HeaderFooter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderFooter")
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// An ordered group of rows under an identity key.
///
/// Section keys must be unique within one model. A section exclusively
/// owns its row sequence; rows are not shared across sections. The row
/// sequence always exists - it may be empty, but there is no "no rows"
/// state to construct.
///
/// # Example
///
/// ```
/// use strata_table::{HeaderFooter, Row, Section};
///
/// let section = Section::new(
///     "fruit",
///     vec![Row::<&str, String>::new("apple", 44.0, "basic", |r| r.to_string())],
/// )
/// .with_index_title("F")
/// .with_header(HeaderFooter::new(28.0, || String::from("Fruit")));
///
/// assert_eq!(section.rows().len(), 1);
/// assert_eq!(section.index_title(), Some("F"));
/// ```
pub struct Section<K, C> {
    key: K,
    rows: Vec<Row<K, C>>,
    index_title: Option<String>,
    header: Option<HeaderFooter<C>>,
    footer: Option<HeaderFooter<C>>,
}

impl<K, C> Section<K, C> {
    /// Creates a section with the given key and rows.
    ///
    /// An empty row sequence is allowed.
    pub fn new(key: K, rows: Vec<Row<K, C>>) -> Self {
        Self {
            key,
            rows,
            index_title: None,
            header: None,
            footer: None,
        }
    }

    /// Returns the identity key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the ordered row sequence.
    #[inline]
    pub fn rows(&self) -> &[Row<K, C>] {
        &self.rows
    }

    /// Returns mutable access to the row sequence, for assembly before
    /// the section is handed to a model. Once a model owns the section,
    /// go through the model so its indexes stay current.
    #[inline]
    pub fn rows_mut(&mut self) -> &mut Vec<Row<K, C>> {
        &mut self.rows
    }

    /// Replaces the row sequence.
    pub fn set_rows(&mut self, rows: Vec<Row<K, C>>) {
        self.rows = rows;
    }

    /// Returns the index title used by a scrubber, if any.
    #[inline]
    pub fn index_title(&self) -> Option<&str> {
        self.index_title.as_deref()
    }

    /// Returns the header model, if any.
    #[inline]
    pub fn header(&self) -> Option<&HeaderFooter<C>> {
        self.header.as_ref()
    }

    /// Returns the footer model, if any.
    #[inline]
    pub fn footer(&self) -> Option<&HeaderFooter<C>> {
        self.footer.as_ref()
    }

    /// Sets the index title.
    pub fn set_index_title(&mut self, title: impl Into<String>) {
        self.index_title = Some(title.into());
    }

    /// Sets the header model.
    pub fn set_header(&mut self, header: HeaderFooter<C>) {
        self.header = Some(header);
    }

    /// Sets the footer model.
    pub fn set_footer(&mut self, footer: HeaderFooter<C>) {
        self.footer = Some(footer);
    }

    /// Builder-style [`set_index_title`](Self::set_index_title).
    pub fn with_index_title(mut self, title: impl Into<String>) -> Self {
        self.set_index_title(title);
        self
    }

    /// Builder-style [`set_header`](Self::set_header).
    pub fn with_header(mut self, header: HeaderFooter<C>) -> Self {
        self.set_header(header);
        self
    }

    /// Builder-style [`set_footer`](Self::set_footer).
    pub fn with_footer(mut self, footer: HeaderFooter<C>) -> Self {
        self.set_footer(footer);
        self
    }
}

impl<K: Clone, C> Clone for Section<K, C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            rows: self.rows.clone(),
            index_title: self.index_title.clone(),
            header: self.header.clone(),
            footer: self.footer.clone(),
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Section<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("key", &self.key)
            .field("rows", &self.rows)
            .field("index_title", &self.index_title)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .finish()
    }
}
