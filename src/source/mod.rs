//! Translation sources: loaders that parse a document into a [`Storage`].
//!
//! Every source reads its whole input into memory and parses it completely
//! before writing anything, so a malformed document leaves the storage
//! untouched. A storage backend that fails halfway through the writes leaves
//! the earlier writes in place; they are not rolled back.
//!
//! # Reloading
//!
//! Sources built with `new` read their stream once; calling
//! [`Source::load_translations`] again reads whatever is left of it. Sources
//! built with `seekable` rewind the stream to the start after every read, so
//! a later load re-parses the same content (e.g. to restore deleted entries).

mod json;
mod xml;

use std::fmt;
use std::io::{self, Read, Seek};
use std::path::Path;

use crate::error::Result;
use crate::storage::Storage;

pub use json::JsonSource;
pub use xml::XmlSource;

/// Something that can populate a [`Storage`] with translations.
pub trait Source {
    /// Load every translation found in the source into `storage`.
    ///
    /// Returns the number of translations written.
    fn load_translations(&mut self, storage: &mut dyn Storage) -> Result<usize>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn load_translations(&mut self, storage: &mut dyn Storage) -> Result<usize> {
        (**self).load_translations(storage)
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn load_translations(&mut self, storage: &mut dyn Storage) -> Result<usize> {
        (**self).load_translations(storage)
    }
}

/// Serialized formats a translation file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Xml,
}

impl SourceFormat {
    /// Infers the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

type Rewind<R> = fn(&mut R) -> io::Result<()>;

fn rewind_to_start<R: Seek>(reader: &mut R) -> io::Result<()> {
    reader.rewind()
}

/// The input stream shared by the concrete sources.
struct Input<R> {
    reader: R,
    rewind: Option<Rewind<R>>,
}

impl<R> fmt::Debug for Input<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("rewinds", &self.rewind.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: Read> Input<R> {
    fn once(reader: R) -> Self {
        Self {
            reader,
            rewind: None,
        }
    }

    fn into_inner(self) -> R {
        self.reader
    }

    /// Read the remaining stream and, for seekable inputs, rewind it.
    fn read_document(&mut self) -> Result<Vec<u8>> {
        let mut document = Vec::new();
        self.reader.read_to_end(&mut document)?;
        if let Some(rewind) = self.rewind {
            rewind(&mut self.reader)?;
        }
        Ok(document)
    }
}

impl<R: Read + Seek> Input<R> {
    fn rewinding(reader: R) -> Self {
        Self {
            reader,
            rewind: Some(rewind_to_start::<R>),
        }
    }
}
