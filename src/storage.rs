//! Translation storage: the `locale -> scope -> key -> translation` table.
//!
//! The [`Storage`] trait is the seam for alternative backends. The crate ships
//! [`MemoryStorage`], a nested in-memory map, and [`SharedStorage`], a
//! cloneable handle that lets several translators read and write one table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;

/// A table of translations keyed by `(locale, scope, key)`.
///
/// A missing level is never an error: looking up a key in an unknown scope
/// or locale returns `None`, and deleting a path that does not exist succeeds.
pub trait Storage {
    /// Get the translation stored for `key` in `scope` of `locale`.
    fn translation(&self, key: &str, scope: &str, locale: &str) -> Option<String>;

    /// Insert or replace a translation, creating the scope and locale on demand.
    fn set_translation(
        &mut self,
        translation: &str,
        key: &str,
        scope: &str,
        locale: &str,
    ) -> Result<()>;

    /// Remove a single translation.
    fn delete_translation(&mut self, key: &str, scope: &str, locale: &str) -> Result<()>;

    /// Remove every translation in `scope` of `locale`.
    fn delete_scope(&mut self, scope: &str, locale: &str) -> Result<()>;

    /// Remove every translation of `locale`.
    fn delete_locale(&mut self, locale: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn translation(&self, key: &str, scope: &str, locale: &str) -> Option<String> {
        (**self).translation(key, scope, locale)
    }

    fn set_translation(
        &mut self,
        translation: &str,
        key: &str,
        scope: &str,
        locale: &str,
    ) -> Result<()> {
        (**self).set_translation(translation, key, scope, locale)
    }

    fn delete_translation(&mut self, key: &str, scope: &str, locale: &str) -> Result<()> {
        (**self).delete_translation(key, scope, locale)
    }

    fn delete_scope(&mut self, scope: &str, locale: &str) -> Result<()> {
        (**self).delete_scope(scope, locale)
    }

    fn delete_locale(&mut self, locale: &str) -> Result<()> {
        (**self).delete_locale(locale)
    }
}

type ScopeTable = HashMap<String, String>;
type LocaleTable = HashMap<String, ScopeTable>;

/// The default storage: three nested hash maps.
///
/// Not synchronized. Wrap it in a [`SharedStorage`] to share it between owners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    locales: HashMap<String, LocaleTable>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored translations across all locales and scopes.
    pub fn len(&self) -> usize {
        self.locales
            .values()
            .flat_map(|scopes| scopes.values())
            .map(|keys| keys.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the locales that currently hold a scope.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Names of the scopes present in `locale` (empty if the locale is unknown).
    pub fn scopes<'a>(&'a self, locale: &str) -> impl Iterator<Item = &'a str> {
        self.locales
            .get(locale)
            .into_iter()
            .flat_map(|scopes| scopes.keys().map(String::as_str))
    }
}

impl Storage for MemoryStorage {
    fn translation(&self, key: &str, scope: &str, locale: &str) -> Option<String> {
        self.locales
            .get(locale)
            .and_then(|scopes| scopes.get(scope))
            .and_then(|keys| keys.get(key))
            .cloned()
    }

    fn set_translation(
        &mut self,
        translation: &str,
        key: &str,
        scope: &str,
        locale: &str,
    ) -> Result<()> {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .entry(scope.to_string())
            .or_default()
            .insert(key.to_string(), translation.to_string());
        Ok(())
    }

    fn delete_translation(&mut self, key: &str, scope: &str, locale: &str) -> Result<()> {
        if let Some(keys) = self
            .locales
            .get_mut(locale)
            .and_then(|scopes| scopes.get_mut(scope))
        {
            keys.remove(key);
        }
        Ok(())
    }

    fn delete_scope(&mut self, scope: &str, locale: &str) -> Result<()> {
        if let Some(scopes) = self.locales.get_mut(locale) {
            scopes.remove(scope);
        }
        Ok(())
    }

    fn delete_locale(&mut self, locale: &str) -> Result<()> {
        self.locales.remove(locale);
        Ok(())
    }
}

/// A cloneable handle to one storage shared by several owners.
///
/// Every clone reads and writes the same table, so a translator can be given
/// one clone while the caller keeps another to edit translations directly.
#[derive(Debug, Default)]
pub struct SharedStorage<S = MemoryStorage> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStorage<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage> SharedStorage<S> {
    /// Wrap `storage` so it can be shared.
    pub fn new(storage: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(storage)),
        }
    }

    /// Lock the underlying storage for direct access.
    ///
    /// A panic in another holder does not leave the table in a torn state
    /// (each write is a single map operation), so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Storage> Storage for SharedStorage<S> {
    fn translation(&self, key: &str, scope: &str, locale: &str) -> Option<String> {
        self.lock().translation(key, scope, locale)
    }

    fn set_translation(
        &mut self,
        translation: &str,
        key: &str,
        scope: &str,
        locale: &str,
    ) -> Result<()> {
        self.lock().set_translation(translation, key, scope, locale)
    }

    fn delete_translation(&mut self, key: &str, scope: &str, locale: &str) -> Result<()> {
        self.lock().delete_translation(key, scope, locale)
    }

    fn delete_scope(&mut self, scope: &str, locale: &str) -> Result<()> {
        self.lock().delete_scope(scope, locale)
    }

    fn delete_locale(&mut self, locale: &str) -> Result<()> {
        self.lock().delete_locale(locale)
    }
}
