//! Dialog view capability and an in-memory implementation.

use std::collections::HashMap;

use cookieconsent_core::ConsentCategory;

/// Observable state of the consent dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Hidden,
    VisibleSummary,
    VisiblePreferences,
}

/// Which of the two mutually exclusive panes the dialog presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Accept / reject / manage actions.
    #[default]
    Summary,
    /// Per-category checkboxes.
    Preferences,
}

/// What the manager needs from the dialog markup.
///
/// Adapters look their elements up themselves. An element that is missing
/// turns the corresponding call into a no-op; nothing here can fail.
pub trait DialogView {
    /// Make the dialog container visible.
    fn show(&mut self);

    fn hide(&mut self);

    /// Show the summary pane and hide the preferences pane.
    fn show_summary(&mut self);

    /// Show the preferences pane and hide the summary pane.
    fn show_preferences(&mut self);

    /// Let pointer events pass through the backdrop so the page stays usable;
    /// only the inner box keeps capturing them.
    fn make_non_blocking(&mut self);

    /// Checked state of the checkbox for `category`, `None` if it is missing.
    fn checkbox(&self, category: ConsentCategory) -> Option<bool>;
}

/// `DialogView` that just remembers what it was told.
#[derive(Debug, Clone, Default)]
pub struct MemoryDialog {
    pub visible: bool,
    pub pane: Pane,
    pub non_blocking: bool,
    checkboxes: HashMap<ConsentCategory, bool>,
}

impl MemoryDialog {
    /// A hidden dialog with both checkboxes present and unchecked.
    pub fn new() -> Self {
        let mut dialog = Self::default();
        for category in ConsentCategory::all() {
            dialog.checkboxes.insert(*category, false);
        }
        dialog
    }

    /// A hidden dialog with no checkbox elements at all.
    pub fn without_checkboxes() -> Self {
        Self::default()
    }

    pub fn set_checked(&mut self, category: ConsentCategory, checked: bool) {
        self.checkboxes.insert(category, checked);
    }

    pub fn remove_checkbox(&mut self, category: ConsentCategory) {
        self.checkboxes.remove(&category);
    }

    pub fn state(&self) -> DialogState {
        match (self.visible, self.pane) {
            (false, _) => DialogState::Hidden,
            (true, Pane::Summary) => DialogState::VisibleSummary,
            (true, Pane::Preferences) => DialogState::VisiblePreferences,
        }
    }
}

impl DialogView for MemoryDialog {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn show_summary(&mut self) {
        self.pane = Pane::Summary;
    }

    fn show_preferences(&mut self) {
        self.pane = Pane::Preferences;
    }

    fn make_non_blocking(&mut self) {
        self.non_blocking = true;
    }

    fn checkbox(&self, category: ConsentCategory) -> Option<bool> {
        self.checkboxes.get(&category).copied()
    }
}
