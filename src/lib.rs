//! Scoped translation lookup.
//!
//! Translations live in a `locale -> scope -> key -> translation` table. A
//! [`Translator`] looks keys up with a current scope and locale and falls
//! back to the key itself when nothing is stored, so lookups never fail.
//! The table is filled from JSON or XML documents through a [`Source`].
//!
//! # Architecture
//!
//! - `storage`: the [`Storage`] trait and the in-memory [`MemoryStorage`]
//! - `source`: the [`Source`] trait with [`JsonSource`] and [`XmlSource`]
//! - `translator`: [`Translator`], the lookup front end
//! - `global`: a process-wide default translator behind package-level functions
//! - `config`: environment configuration for building a translator
//!
//! # Example
//!
//! ```
//! let json = r#"{"ru": {"default": {"Hello.": "Привет."}}}"#;
//! let mut source = scoped_i18n::JsonSource::new(json.as_bytes());
//! scoped_i18n::load_from(&mut source).unwrap();
//!
//! assert_eq!(scoped_i18n::t_with("Hello.", None, Some("ru")), "Привет.");
//! assert_eq!(scoped_i18n::t("Hello."), "Hello.");
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod source;
pub mod storage;
pub mod translator;

pub use error::{Error, Result};
pub use global::{
    init_default, load_from, load_json, load_xml, set_locale, set_scope, t, t_scoped, t_with,
    with_default,
};
pub use source::{JsonSource, Source, SourceFormat, XmlSource};
pub use storage::{MemoryStorage, SharedStorage, Storage};
pub use translator::{BoxedSource, Translator, DEFAULT_LOCALE, DEFAULT_SCOPE};
