use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{Input, Source};
use crate::error::Result;
use crate::storage::Storage;

/// `locale -> scope -> key -> translation`, exactly as written in the file.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct JsonDocument(HashMap<String, HashMap<String, HashMap<String, String>>>);

/// Loads translations from a JSON document shaped like
///
/// ```json
/// {
///   "ru": {
///     "default": { "Hello.": "Привет.", "How are you?": "Как дела?" },
///     "preved":  { "Hello.": "Превед." }
///   }
/// }
/// ```
///
/// Any other shape (arrays, non-string leaves, missing nesting) is rejected
/// with the `serde_json` error.
#[derive(Debug)]
pub struct JsonSource<R> {
    input: Input<R>,
}

impl<R: Read> JsonSource<R> {
    /// Read from a stream that is consumed by the first load.
    pub fn new(reader: R) -> Self {
        Self {
            input: Input::once(reader),
        }
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }
}

impl<R: Read + Seek> JsonSource<R> {
    /// Read from a seekable stream, rewinding it after every load.
    pub fn seekable(reader: R) -> Self {
        Self {
            input: Input::rewinding(reader),
        }
    }
}

impl JsonSource<File> {
    /// Open a JSON translation file. The file is rewound after every load.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::seekable(File::open(path)?))
    }
}

impl<R: Read> Source for JsonSource<R> {
    fn load_translations(&mut self, storage: &mut dyn Storage) -> Result<usize> {
        let document = self.input.read_document()?;
        let JsonDocument(locales) = serde_json::from_slice(&document)?;

        let mut written = 0;
        for (locale, scopes) in &locales {
            for (scope, translations) in scopes {
                for (key, value) in translations {
                    storage.set_translation(value, key, scope, locale)?;
                    written += 1;
                }
            }
        }

        debug!(locales = locales.len(), translations = written, "Loaded JSON translations");
        Ok(written)
    }
}
