//! Process-wide boolean flags read by third-party analytics code.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

/// A namespace of named boolean flags, like properties set on `window`.
///
/// The analytics library reads its opt-out flag once, when it initializes,
/// so writers must set it before that happens.
pub trait FlagSink {
    fn set_flag(&self, name: &str, value: bool);

    /// Current value, `None` if the flag was never set.
    fn flag(&self, name: &str) -> Option<bool>;
}

impl<F: FlagSink + ?Sized> FlagSink for &F {
    fn set_flag(&self, name: &str, value: bool) {
        (**self).set_flag(name, value)
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (**self).flag(name)
    }
}

impl<F: FlagSink + ?Sized> FlagSink for Arc<F> {
    fn set_flag(&self, name: &str, value: bool) {
        (**self).set_flag(name, value)
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (**self).flag(name)
    }
}

static GLOBAL_FLAGS: Lazy<FlagRegistry> = Lazy::new(FlagRegistry::new);

/// In-process flag table.
pub struct FlagRegistry {
    flags: RwLock<HashMap<String, bool>>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self {
            flags: RwLock::new(HashMap::new()),
        }
    }

    /// The registry shared by everything in this process.
    pub fn global() -> &'static FlagRegistry {
        &GLOBAL_FLAGS
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagSink for FlagRegistry {
    fn set_flag(&self, name: &str, value: bool) {
        self.flags.write().insert(name.to_string(), value);
        debug!("Flag {} = {}", name, value);
    }

    fn flag(&self, name: &str) -> Option<bool> {
        self.flags.read().get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flag_is_none() {
        let flags = FlagRegistry::new();
        assert_eq!(flags.flag("ga-disable-G-1"), None);
    }

    #[test]
    fn test_set_and_overwrite() {
        let flags = FlagRegistry::new();
        flags.set_flag("ga-disable-G-1", true);
        flags.set_flag("ga-disable-G-1", false);
        assert_eq!(flags.flag("ga-disable-G-1"), Some(false));
    }

    #[test]
    fn test_global_is_shared() {
        FlagRegistry::global().set_flag("test-global-shared", true);
        let sink: &dyn FlagSink = FlagRegistry::global();
        assert_eq!(sink.flag("test-global-shared"), Some(true));
    }
}
