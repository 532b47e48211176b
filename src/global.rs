//! The process-wide default translator and its package-level forwarders.
//!
//! The default translator lives in a `OnceLock`. It is created lazily on
//! first use with locale `"en"`, scope `"default"`, no source and an empty
//! [`MemoryStorage`](crate::storage::MemoryStorage). An application that wants
//! different defaults installs its own instance once with [`init_default`]
//! before anything else touches it.
//!
//! Every forwarder takes the lock for the duration of one call, so the
//! functions here may be used from any thread.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::debug;

use crate::error::{Error, Result};
use crate::source::{JsonSource, Source, XmlSource};
use crate::translator::Translator;

/// Global translator instance (initialized lazily or by `init_default`)
static DEFAULT: OnceLock<Mutex<Translator>> = OnceLock::new();

/// Install `translator` as the process-wide default.
///
/// # Returns
/// * `Ok(())` if this call created the default translator
/// * `Err(Error::AlreadyInitialized)` if it already existed, either from an
///   earlier `init_default` or because a forwarder already used it
pub fn init_default(translator: Translator) -> Result<()> {
    DEFAULT
        .set(Mutex::new(translator))
        .map_err(|_| Error::AlreadyInitialized)?;
    debug!("Installed custom default translator");
    Ok(())
}

fn default_translator() -> MutexGuard<'static, Translator> {
    DEFAULT
        .get_or_init(|| Mutex::new(Translator::default()))
        .lock()
        // Translator state stays consistent even if a holder panicked
        .unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with exclusive access to the default translator.
///
/// Use this for anything the forwarders don't cover, such as deleting
/// translations from the default storage.
pub fn with_default<T>(f: impl FnOnce(&mut Translator) -> T) -> T {
    f(&mut default_translator())
}

/// Translate `key` with the default translator's scope and locale.
pub fn t(key: &str) -> String {
    default_translator().t(key)
}

/// Translate `key` in `scope` with the default translator's locale.
pub fn t_scoped(key: &str, scope: &str) -> String {
    default_translator().t_scoped(key, scope)
}

/// Translate `key` with optional scope/locale overrides (see [`Translator::t_with`]).
pub fn t_with(key: &str, scope: Option<&str>, locale: Option<&str>) -> String {
    default_translator().t_with(key, scope, locale)
}

pub fn set_locale(locale: impl Into<String>) {
    default_translator().set_locale(locale);
}

pub fn set_scope(scope: impl Into<String>) {
    default_translator().set_scope(scope);
}

/// Load a JSON translation file into the default storage.
pub fn load_json(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading JSON translation file");
    let mut source = JsonSource::open(path)?;
    load_from(&mut source)
}

/// Load an XML translation file into the default storage.
pub fn load_xml(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading XML translation file");
    let mut source = XmlSource::open(path)?;
    load_from(&mut source)
}

/// Load translations from any source into the default storage.
pub fn load_from<S: Source + ?Sized>(source: &mut S) -> Result<usize> {
    default_translator().load_from(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // The default translator is shared by every test in this binary, so each
    // test uses its own scope and restores the defaults it changes.

    #[test]
    #[serial]
    fn test_default_falls_back_to_key() {
        assert_eq!(t("nil"), "nil");
        assert_eq!(t_with("nil", Some("nowhere"), Some("xx")), "nil");
    }

    #[test]
    #[serial]
    fn test_default_starts_english() {
        with_default(|translator| {
            assert_eq!(translator.locale(), "en");
            assert_eq!(translator.scope(), "default");
        });
    }

    #[test]
    #[serial]
    fn test_load_from_and_setters() {
        let json = r#"{"en": {"global-unit": {"Hello.": "hai thar"}}}"#;
        let mut source = JsonSource::new(json.as_bytes());
        assert_eq!(load_from(&mut source).unwrap(), 1);

        assert_eq!(t_scoped("Hello.", "global-unit"), "hai thar");

        set_scope("global-unit");
        assert_eq!(t("Hello."), "hai thar");
        set_scope("default");
        assert_eq!(t("Hello."), "Hello.");
    }

    #[test]
    #[serial]
    fn test_init_after_use_is_rejected() {
        let _ = t("touch");
        let result = init_default(Translator::default());
        assert!(matches!(result, Err(Error::AlreadyInitialized)));
    }
}
