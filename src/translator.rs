//! The translator: default scope and locale over a storage and a source.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::source::Source;
use crate::storage::{MemoryStorage, Storage};

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Scope used when nothing else is configured.
pub const DEFAULT_SCOPE: &str = "default";

/// A source the translator can keep and reload from.
pub type BoxedSource = Box<dyn Source + Send>;

/// Looks up translations in a [`Storage`] using a current scope and locale.
///
/// Several translators with different defaults can coexist; each owns its
/// storage (pass a [`SharedStorage`](crate::storage::SharedStorage) clone to
/// let them share one table).
///
/// # Example
/// ```
/// use scoped_i18n::{JsonSource, MemoryStorage, Translator};
///
/// let json = r#"{"ru": {"default": {"Hello.": "Привет."}}}"#;
/// let source = JsonSource::new(json.as_bytes());
/// let mut translator = Translator::new("default", "ru", Some(Box::new(source)), MemoryStorage::new());
/// translator.load().unwrap();
///
/// assert_eq!(translator.t("Hello."), "Привет.");
/// assert_eq!(translator.t("Goodbye."), "Goodbye.");
/// ```
pub struct Translator<S = MemoryStorage> {
    scope: String,
    locale: String,
    source: Option<BoxedSource>,
    storage: S,
}

impl<S: fmt::Debug> fmt::Debug for Translator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("scope", &self.scope)
            .field("locale", &self.locale)
            .field("has_source", &self.source.is_some())
            .field("storage", &self.storage)
            .finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE, DEFAULT_LOCALE, None, MemoryStorage::new())
    }
}

impl<S: Storage> Translator<S> {
    /// Create a translator with the given defaults, optional source and storage.
    pub fn new(
        scope: impl Into<String>,
        locale: impl Into<String>,
        source: Option<BoxedSource>,
        storage: S,
    ) -> Self {
        Self {
            scope: scope.into(),
            locale: locale.into(),
            source,
            storage,
        }
    }

    /// Translate `key` with the current scope and locale.
    ///
    /// Returns `key` itself when no translation exists.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, None, None)
    }

    /// Translate `key` in `scope`, using the current locale.
    ///
    /// An empty `scope` means the current scope.
    pub fn t_scoped(&self, key: &str, scope: &str) -> String {
        self.t_with(key, Some(scope), None)
    }

    /// Translate `key`, overriding scope and/or locale.
    ///
    /// `None` or an empty string for either override falls back to the
    /// translator's current value.
    pub fn t_with(&self, key: &str, scope: Option<&str>, locale: Option<&str>) -> String {
        let scope = resolve(scope, &self.scope);
        let locale = resolve(locale, &self.locale);

        match self.storage.translation(key, scope, locale) {
            Some(translation) => translation,
            None => {
                trace!(key, scope, locale, "No translation found, falling back to key");
                key.to_string()
            }
        }
    }

    /// Load translations from the translator's own source.
    ///
    /// Returns the number of translations written, or [`Error::NoSource`]
    /// when no source is bound.
    pub fn load(&mut self) -> Result<usize> {
        let source = self.source.as_mut().ok_or(Error::NoSource)?;
        debug!(locale = %self.locale, scope = %self.scope, "Loading translations from bound source");
        source.load_translations(&mut self.storage)
    }

    /// Load translations from `source` without making it the bound source.
    pub fn load_from<Src: Source + ?Sized>(&mut self, source: &mut Src) -> Result<usize> {
        debug!(locale = %self.locale, scope = %self.scope, "Loading translations from external source");
        source.load_translations(&mut self.storage)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = scope.into();
    }

    /// Bind (or, with `None`, unbind) the source used by [`Translator::load`].
    pub fn set_source(&mut self, source: Option<BoxedSource>) {
        self.source = source;
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage, e.g. to delete translations.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn resolve<'a>(requested: Option<&'a str>, current: &'a str) -> &'a str {
    match requested {
        Some(value) if !value.is_empty() => value,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{JsonSource, XmlSource};
    use crate::storage::SharedStorage;
    use proptest::prelude::*;
    use std::io::Cursor;

    const RU_JSON: &str = r#"{
        "ru": {
            "default": {"Hello.": "Привет.", "How are you?": "Как дела?"},
            "preved": {"Hello.": "Превед."}
        },
        "en": {
            "cat": {"Hello.": "hai thar"}
        }
    }"#;

    fn ru_source() -> BoxedSource {
        Box::new(JsonSource::seekable(Cursor::new(RU_JSON.as_bytes().to_vec())))
    }

    fn loaded_translator() -> Translator {
        let mut translator = Translator::new("default", "ru", Some(ru_source()), MemoryStorage::new());
        translator.load().unwrap();
        translator
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_default_translator() {
        let translator: Translator = Translator::default();
        assert_eq!(translator.locale(), "en");
        assert_eq!(translator.scope(), "default");
        assert!(!translator.has_source());
        assert!(translator.storage().is_empty());
    }

    #[test]
    fn test_unloaded_translator_returns_key() {
        let translator: Translator = Translator::default();
        assert_eq!(translator.t("anything"), "anything");
    }

    // ==================== Override Resolution Tests ====================

    #[test]
    fn test_t_uses_current_scope_and_locale() {
        let translator = loaded_translator();
        assert_eq!(translator.t("Hello."), "Привет.");
        assert_eq!(translator.t("How are you?"), "Как дела?");
    }

    #[test]
    fn test_empty_overrides_match_plain_t() {
        let translator = loaded_translator();
        assert_eq!(translator.t_with("Hello.", Some(""), Some("")), translator.t("Hello."));
        assert_eq!(translator.t_scoped("Hello.", ""), translator.t("Hello."));
        assert_eq!(translator.t_with("Hello.", None, None), translator.t("Hello."));
    }

    #[test]
    fn test_scope_override_keeps_current_locale() {
        let translator = loaded_translator();
        assert_eq!(translator.t_scoped("Hello.", "preved"), "Превед.");
        assert_eq!(translator.t_with("Hello.", Some("preved"), None), "Превед.");
    }

    #[test]
    fn test_full_override() {
        let translator = loaded_translator();
        assert_eq!(translator.t_with("Hello.", Some("cat"), Some("en")), "hai thar");
        // Scope exists only in "en"
        assert_eq!(translator.t_with("Hello.", Some("cat"), None), "Hello.");
    }

    #[test]
    fn test_locale_override_keeps_current_scope() {
        let mut translator = loaded_translator();
        translator.set_scope("cat");
        assert_eq!(translator.t_with("Hello.", Some(""), Some("en")), "hai thar");
        assert_eq!(translator.t_with("Hello.", None, Some("en")), "hai thar");
    }

    // ==================== Setter Tests ====================

    #[test]
    fn test_setters_take_effect_immediately() {
        let mut translator = Translator::new("nil", "nil", None, MemoryStorage::new());
        translator.set_source(Some(ru_source()));
        translator.set_locale("ru");
        translator.set_scope("default");
        translator.load().unwrap();

        assert_eq!(translator.t("Hello."), "Привет.");

        translator.set_scope("preved");
        assert_eq!(translator.t("Hello."), "Превед.");
    }

    #[test]
    fn test_unbinding_source() {
        let mut translator = loaded_translator();
        translator.set_source(None);
        assert!(!translator.has_source());
        assert!(matches!(translator.load(), Err(Error::NoSource)));
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_load_without_source() {
        let mut translator: Translator = Translator::default();
        assert!(matches!(translator.load(), Err(Error::NoSource)));
    }

    #[test]
    fn test_load_from_does_not_rebind_source() {
        let mut translator = Translator::new("default", "de", None, MemoryStorage::new());
        let mut source = XmlSource::new(
            r#"<locale name="de"><scope name="default"><translation key="Hello." value="Guten Tag."/></scope></locale>"#
                .as_bytes(),
        );

        assert_eq!(translator.load_from(&mut source).unwrap(), 1);
        assert!(!translator.has_source());
        assert_eq!(translator.t_scoped("Hello.", "default"), "Guten Tag.");
    }

    #[test]
    fn test_reload_restores_deleted_entries() {
        let mut translator = loaded_translator();

        translator.storage_mut().delete_translation("Hello.", "default", "ru").unwrap();
        assert_eq!(translator.t("Hello."), "Hello.");
        assert_eq!(translator.t("How are you?"), "Как дела?");

        translator.load().unwrap();
        translator.storage_mut().delete_scope("default", "ru").unwrap();
        assert_eq!(translator.t("Hello."), "Hello.");

        translator.load().unwrap();
        translator.storage_mut().delete_locale("ru").unwrap();
        assert_eq!(translator.t("Hello."), "Hello.");

        translator.load().unwrap();
        assert_eq!(translator.t("Hello."), "Привет.");
    }

    #[test]
    fn test_shared_storage_between_translators() {
        let storage = SharedStorage::new(MemoryStorage::new());
        let mut russian = Translator::new("default", "ru", Some(ru_source()), storage.clone());
        let english = Translator::new("cat", "en", None, storage.clone());

        russian.load().unwrap();

        assert_eq!(english.t("Hello."), "hai thar");
        storage.lock().delete_locale("en").unwrap();
        assert_eq!(english.t("Hello."), "Hello.");
        assert_eq!(russian.t("Hello."), "Привет.");
    }

    #[test]
    fn test_boxed_storage_backend() {
        let storage: Box<dyn Storage + Send> = Box::new(MemoryStorage::new());
        let mut translator = Translator::new("default", "ru", Some(ru_source()), storage);
        translator.load().unwrap();
        assert_eq!(translator.t("Hello."), "Привет.");
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_unknown_keys_fall_back_to_key(key in "\\PC{0,24}", scope in "[a-z]{0,6}", locale in "[a-z]{0,3}") {
            let translator: Translator = Translator::default();
            prop_assert_eq!(translator.t_with(&key, Some(scope.as_str()), Some(locale.as_str())), key);
        }
    }
}
