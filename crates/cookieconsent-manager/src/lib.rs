//! Cookie consent manager — first-visit dialog, consent decisions, and the
//! analytics opt-out flag they drive.
//!
//! The manager owns no page globals. It is handed a [`ConsentStore`] for the
//! persisted decision, a [`DialogView`] for the dialog markup, and a
//! [`FlagSink`] for the flag the analytics library reads at startup.

pub mod analytics;
pub mod manager;
pub mod view;

pub use analytics::{FlagRegistry, FlagSink};
pub use manager::ConsentManager;
pub use view::{DialogState, DialogView, MemoryDialog, Pane};

pub use cookieconsent_core::{ConsentCategory, ConsentConfig, ConsentRecord};
pub use cookieconsent_store::ConsentStore;
