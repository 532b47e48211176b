//! Installing a custom default translator.
//!
//! Lives in its own test binary so nothing touches the default translator
//! before `init_default` runs.

use scoped_i18n::{Error, JsonSource, MemoryStorage, Translator};

#[test]
fn test_init_default_installs_translator_once() {
    let json = r#"{"ru": {"preved": {"Hello.": "Превед."}}}"#;
    let source = JsonSource::new(json.as_bytes());
    let mut translator = Translator::new("preved", "ru", Some(Box::new(source)), MemoryStorage::new());
    translator.load().expect("Should load translations");

    scoped_i18n::init_default(translator).expect("First init should succeed");
    assert_eq!(scoped_i18n::t("Hello."), "Превед.");

    let second = scoped_i18n::init_default(Translator::default());
    assert!(matches!(second, Err(Error::AlreadyInitialized)));
    assert_eq!(scoped_i18n::t("Hello."), "Превед.");
}
