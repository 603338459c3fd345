use binroute_core::BinMarker;

/// Tracks which bin marker is selected.
///
/// At most one marker is selected at a time. Bin lists come from the host
/// and can go stale between render and click, so selecting an id that is
/// not in the current list clears the selection instead of failing.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the selected bin, if any
    selected_id: Option<String>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use binroute_editor::selection::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected bin.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Selects `id` if it names one of `bins`, otherwise clears the
    /// selection.
    ///
    /// # Returns
    ///
    /// The selection after the call.
    pub fn select(&mut self, id: &str, bins: &[BinMarker]) -> Option<&str> {
        if bins.iter().any(|bin| bin.id == id) {
            self.selected_id = Some(id.to_string());
        } else {
            tracing::debug!("Bin {} not in current list, clearing selection", id);
            self.selected_id = None;
        }
        self.selected_id()
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected_id = None;
    }
}
