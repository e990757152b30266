//! Consent manager — dialog state machine and decision recording.

use tracing::{debug, info, warn};

use cookieconsent_core::{ConsentCategory, ConsentConfig, ConsentRecord};
use cookieconsent_store::ConsentStore;

use crate::analytics::FlagSink;
use crate::view::{DialogState, DialogView, Pane};

/// Drives the consent dialog and keeps the analytics opt-out flag in line
/// with the visitor's latest decision.
///
/// Built once per page and used from the UI thread. Visibility and the
/// active pane are tracked separately: hiding the dialog keeps the pane, so
/// showing it again reveals whichever pane was last open.
pub struct ConsentManager<S, V, F> {
    store: S,
    view: V,
    flags: F,
    config: ConsentConfig,
    /// Name of the flag that disables analytics when `true`.
    disable_flag: String,
    /// Last decision loaded or made; survives a failed write.
    record: Option<ConsentRecord>,
    visible: bool,
    pane: Pane,
}

impl<S, V, F> ConsentManager<S, V, F>
where
    S: ConsentStore,
    V: DialogView,
    F: FlagSink,
{
    pub fn new(config: ConsentConfig, store: S, view: V, flags: F) -> Self {
        Self {
            disable_flag: config.analytics_disable_flag(),
            store,
            view,
            flags,
            config,
            record: None,
            visible: false,
            pane: Pane::Summary,
        }
    }

    /// Create a manager with the default storage key and tracking ID.
    pub fn with_defaults(store: S, view: V, flags: F) -> Self {
        Self::new(ConsentConfig::default(), store, view, flags)
    }

    /// Page-load entry point.
    ///
    /// Shows the summary pane when no decision is stored, applies whatever
    /// decision is, and makes the dialog backdrop non-blocking.
    pub fn initialize(&mut self) {
        self.record = self.get_record();
        if self.record.is_none() {
            self.close_preferences();
            self.show_dialog();
        }
        self.apply_settings();
        self.view.make_non_blocking();

        info!(
            "ConsentManager initialized: stored decision={}, state={:?}",
            self.record.is_some(),
            self.state()
        );
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    /// Read the stored decision. Unreadable or malformed values count as none.
    pub fn get_record(&self) -> Option<ConsentRecord> {
        match self.store.get() {
            Ok(record) => record,
            Err(e) => {
                warn!("Ignoring unreadable cookie consent: {}", e);
                None
            }
        }
    }

    /// Persist `record` and apply it.
    ///
    /// A failed write is logged and otherwise ignored; the decision still
    /// takes effect for this page.
    pub fn set_record(&mut self, record: ConsentRecord) {
        match self.store.set(&record) {
            Ok(()) => info!(
                "Cookie consent saved: analytics={}, marketing={}",
                record.analytics, record.marketing
            ),
            Err(e) => warn!("Cookie consent could not be saved (storage blocked?): {}", e),
        }
        self.record = Some(record);
        self.apply_settings();
    }

    // ---------------------------------------------------------------
    // Decisions
    // ---------------------------------------------------------------

    pub fn accept_all(&mut self) {
        self.decide(ConsentRecord::accept_all());
    }

    pub fn reject_all(&mut self) {
        self.decide(ConsentRecord::reject_all());
    }

    /// Record the categories ticked in the preferences pane. A missing
    /// checkbox counts as unticked.
    pub fn save_preferences(&mut self) {
        let checked = |category| self.view.checkbox(category).unwrap_or(false);
        let record = ConsentRecord::new(
            checked(ConsentCategory::Analytics),
            checked(ConsentCategory::Marketing),
        );
        self.decide(record);
    }

    fn decide(&mut self, record: ConsentRecord) {
        self.set_record(record);
        self.hide_dialog();
    }

    /// Set the analytics opt-out flag from the current decision.
    ///
    /// Without a decision nothing is written, so the analytics library falls
    /// back to its own default.
    pub fn apply_settings(&self) {
        let Some(record) = &self.record else {
            return;
        };
        self.flags.set_flag(&self.disable_flag, !record.analytics);
    }

    // ---------------------------------------------------------------
    // Dialog
    // ---------------------------------------------------------------

    pub fn show_dialog(&mut self) {
        self.visible = true;
        self.view.show();
        debug!("Consent dialog shown: {:?}", self.state());
    }

    pub fn hide_dialog(&mut self) {
        self.visible = false;
        self.view.hide();
        debug!("Consent dialog hidden");
    }

    pub fn open_preferences(&mut self) {
        self.pane = Pane::Preferences;
        self.view.show_preferences();
    }

    pub fn close_preferences(&mut self) {
        self.pane = Pane::Summary;
        self.view.show_summary();
    }

    /// "Manage cookies" entry point: open straight into the preferences pane,
    /// whatever was decided before.
    pub fn show_settings(&mut self) {
        self.show_dialog();
        self.open_preferences();
    }

    pub fn state(&self) -> DialogState {
        match (self.visible, self.pane) {
            (false, _) => DialogState::Hidden,
            (true, Pane::Summary) => DialogState::VisibleSummary,
            (true, Pane::Preferences) => DialogState::VisiblePreferences,
        }
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// The decision currently in effect, which may not have been persisted.
    pub fn current(&self) -> Option<&ConsentRecord> {
        self.record.as_ref()
    }

    pub fn config(&self) -> &ConsentConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn flags(&self) -> &F {
        &self.flags
    }
}
