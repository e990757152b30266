//! Key-value slot storage trait.

use std::sync::Arc;

use cookieconsent_core::Result;

/// String slots addressed by key, modelled on the browser's `localStorage`.
///
/// Values are raw strings; encoding is the caller's concern. Both operations
/// can fail: storage may be blocked outright or full.
pub trait KeyValueStorage {
    /// Read the value under `key`. `Ok(None)` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}
