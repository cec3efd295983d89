//! Row entity and its behavior hooks.
//!
//! A [`Row`] carries an identity key, the sizing and recycling information
//! the layout collaborator needs before any content is realized, an
//! optional free-text search field, and a set of opaque callables that the
//! rendering collaborator invokes on the row's behalf. The model stores
//! the callables by value and never calls them itself.

use std::fmt;
use std::sync::Arc;

/// Produces a fresh content instance for a row, given its reuse identifier.
///
/// The rendering collaborator calls this when no recycled instance with
/// that identifier is available. It may not be called for every row, and
/// the returned instance may later be recycled for other rows sharing the
/// same identifier.
pub type CellGenerator<C> = Arc<dyn Fn(&str) -> C + Send + Sync>;

/// Mutates a content instance on behalf of one row.
///
/// Used for the customizer (applied on creation, on recycling, and when
/// the model changes while the content is visible) and for the
/// tap/select/deselect/swipe-confirm notifications.
pub type CellUpdater<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// A single row of a sectioned table model.
///
/// `K` is the identity key type; `C` is the opaque content instance type
/// produced by the generator and consumed by the updaters. Keys must be
/// unique across the whole model (the row coordinate index is a single
/// flat map), and are used for lookup and transition matching, never for
/// ordering.
///
/// The identity/sizing/recycling triple is fixed at construction; flags,
/// search text, and hooks can be set afterwards, either through the
/// `with_*` builders or through plain setters.
///
/// # Example
///
/// ```
/// use strata_table::Row;
///
/// let row = Row::<&str, String>::new("settings", 44.0, "basic", |reuse_id| {
///     format!("cell:{reuse_id}")
/// })
/// .with_search_text("Settings")
/// .with_selectable(false);
///
/// assert_eq!(*row.key(), "settings");
/// assert!(!row.selectable());
/// ```
pub struct Row<K, C> {
    key: K,
    height: f32,
    reuse_identifier: String,
    search_text: Option<String>,
    selectable: bool,
    selected: bool,
    generator: CellGenerator<C>,
    customizer: Option<CellUpdater<C>>,
    on_tap: Option<CellUpdater<C>>,
    on_select: Option<CellUpdater<C>>,
    on_deselect: Option<CellUpdater<C>>,
    on_swipe_confirm: Option<CellUpdater<C>>,
}

impl<K, C> Row<K, C> {
    /// Creates a row with the given identity key, height, reuse
    /// identifier, and content generator.
    ///
    /// Defaults: selectable, not selected, no search text, no customizer,
    /// no notification hooks.
    ///
    /// # Panics
    ///
    /// Panics if `height` is negative or not finite.
    pub fn new<F>(key: K, height: f32, reuse_identifier: impl Into<String>, generator: F) -> Self
    where
        F: Fn(&str) -> C + Send + Sync + 'static,
    {
        assert!(
            height >= 0.0 && height.is_finite(),
            "row height must be a non-negative finite number, got {height}"
        );
        Self {
            key,
            height,
            reuse_identifier: reuse_identifier.into(),
            search_text: None,
            selectable: true,
            selected: false,
            generator: Arc::new(generator),
            customizer: None,
            on_tap: None,
            on_select: None,
            on_deselect: None,
            on_swipe_confirm: None,
        }
    }

    /// Returns the identity key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the row height, consumed by layout before any content is
    /// realized.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the reuse identifier grouping rows whose content instances
    /// are interchangeable before customization.
    #[inline]
    pub fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }

    /// Returns the free-text field used by search filtering, if any.
    #[inline]
    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    /// Returns whether this row can be selected.
    #[inline]
    pub fn selectable(&self) -> bool {
        self.selectable
    }

    /// Returns whether this row is currently selected.
    #[inline]
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Returns the content generator.
    #[inline]
    pub fn generator(&self) -> &CellGenerator<C> {
        &self.generator
    }

    /// Returns the customizer applied to content instances, if set.
    #[inline]
    pub fn customizer(&self) -> Option<&CellUpdater<C>> {
        self.customizer.as_ref()
    }

    /// Returns the tap notification hook, if set.
    #[inline]
    pub fn on_tap(&self) -> Option<&CellUpdater<C>> {
        self.on_tap.as_ref()
    }

    /// Returns the selection notification hook, if set.
    #[inline]
    pub fn on_select(&self) -> Option<&CellUpdater<C>> {
        self.on_select.as_ref()
    }

    /// Returns the deselection notification hook, if set.
    #[inline]
    pub fn on_deselect(&self) -> Option<&CellUpdater<C>> {
        self.on_deselect.as_ref()
    }

    /// Returns the swipe-confirmation hook, if set.
    #[inline]
    pub fn on_swipe_confirm(&self) -> Option<&CellUpdater<C>> {
        self.on_swipe_confirm.as_ref()
    }

    /// Sets the search text.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = Some(text.into());
    }

    /// Clears the search text; the row will no longer match any non-empty
    /// query.
    pub fn clear_search_text(&mut self) {
        self.search_text = None;
    }

    /// Sets whether this row can be selected.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Sets the selected flag.
    ///
    /// The model's selection view is derived by scanning, so the change is
    /// visible through [`TableModel::selected_rows`](crate::TableModel::selected_rows)
    /// without any recompute call.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Sets the customizer.
    pub fn set_customizer<F>(&mut self, customizer: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.customizer = Some(Arc::new(customizer));
    }

    /// Sets the tap notification hook.
    pub fn set_on_tap<F>(&mut self, hook: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.on_tap = Some(Arc::new(hook));
    }

    /// Sets the selection notification hook.
    pub fn set_on_select<F>(&mut self, hook: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(hook));
    }

    /// Sets the deselection notification hook.
    pub fn set_on_deselect<F>(&mut self, hook: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.on_deselect = Some(Arc::new(hook));
    }

    /// Sets the swipe-confirmation hook.
    pub fn set_on_swipe_confirm<F>(&mut self, hook: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.on_swipe_confirm = Some(Arc::new(hook));
    }

    /// Builder-style [`set_search_text`](Self::set_search_text).
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    /// Builder-style [`set_selectable`](Self::set_selectable).
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.set_selectable(selectable);
        self
    }

    /// Builder-style [`set_selected`](Self::set_selected).
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.set_selected(selected);
        self
    }

    /// Builder-style [`set_customizer`](Self::set_customizer).
    pub fn with_customizer<F>(mut self, customizer: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.set_customizer(customizer);
        self
    }

    /// Builder-style [`set_on_tap`](Self::set_on_tap).
    pub fn with_on_tap<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.set_on_tap(hook);
        self
    }

    /// Builder-style [`set_on_select`](Self::set_on_select).
    pub fn with_on_select<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.set_on_select(hook);
        self
    }

    /// Builder-style [`set_on_deselect`](Self::set_on_deselect).
    pub fn with_on_deselect<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.set_on_deselect(hook);
        self
    }

    /// Builder-style [`set_on_swipe_confirm`](Self::set_on_swipe_confirm).
    pub fn with_on_swipe_confirm<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.set_on_swipe_confirm(hook);
        self
    }
}

impl<K: Clone, C> Clone for Row<K, C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            height: self.height,
            reuse_identifier: self.reuse_identifier.clone(),
            search_text: self.search_text.clone(),
            selectable: self.selectable,
            selected: self.selected,
            generator: Arc::clone(&self.generator),
            customizer: self.customizer.clone(),
            on_tap: self.on_tap.clone(),
            on_select: self.on_select.clone(),
            on_deselect: self.on_deselect.clone(),
            on_swipe_confirm: self.on_swipe_confirm.clone(),
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Row<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("key", &self.key)
            .field("height", &self.height)
            .field("reuse_identifier", &self.reuse_identifier)
            .field("search_text", &self.search_text)
            .field("selectable", &self.selectable)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
