//! Cookie consent core — consent records, configuration, error types.

pub mod config;
pub mod error;
pub mod record;

pub use config::ConsentConfig;
pub use error::{Error, Result};
pub use record::{ConsentCategory, ConsentRecord};
