use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading translations or managing the default translator.
///
/// Lookups never fail: a missing translation falls back to its key, so none
/// of these variants are produced by the read path.
#[derive(Error, Debug)]
pub enum Error {
    /// Opening, reading or rewinding an input stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON decoder rejected the document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The XML decoder rejected the document
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The XML document is well formed but not shaped like a translation file
    #[error("unexpected XML at byte {position}: {message}")]
    XmlShape { position: u64, message: String },

    /// A translation file whose extension maps to no known source
    #[error("unsupported translation file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// `load` was called on a translator with no bound source
    #[error("translator has no source to load from")]
    NoSource,

    /// A storage backend refused a write
    #[error("storage error: {0}")]
    Storage(String),

    /// The process-wide default translator was already set up
    #[error("default translator is already initialized")]
    AlreadyInitialized,
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(quick_xml::Error::InvalidAttr(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
