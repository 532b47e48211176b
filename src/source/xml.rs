use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::{Input, Source};
use crate::error::{Error, Result};
use crate::storage::Storage;

/// Loads translations from an attribute-driven XML document:
///
/// ```xml
/// <locale name="de">
///   <scope name="default">
///     <translation key="Hello." value="Guten Tag." />
///   </scope>
///   <scope name="bavaria">
///     <translation key="Hello." value="Grüß Gott." />
///   </scope>
/// </locale>
/// ```
///
/// The document may hold a single `<locale>` root, several `<locale>`
/// siblings at the top level, or one wrapping element of any name (such as
/// `<translations>`) around the `<locale>` elements.
#[derive(Debug)]
pub struct XmlSource<R> {
    input: Input<R>,
}

impl<R: Read> XmlSource<R> {
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

impl<R: Read + Seek> XmlSource<R> {
    /// Read from a seekable stream, rewinding it after every load.
    pub fn seekable(reader: R) -> Self {
        Self {
            input: Input::rewinding(reader),
        }
    }
}

impl XmlSource<File> {
    /// Open an XML translation file. The file is rewound after every load.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::seekable(File::open(path)?))
    }
}

impl<R: Read> Source for XmlSource<R> {
    fn load_translations(&mut self, storage: &mut dyn Storage) -> Result<usize> {
        let document = self.input.read_document()?;
        let entries = parse_document(&document)?;

        for entry in &entries {
            storage.set_translation(&entry.value, &entry.key, &entry.scope, &entry.locale)?;
        }

        debug!(translations = entries.len(), "Loaded XML translations");
        Ok(entries.len())
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    locale: String,
    scope: String,
    key: String,
    value: String,
}

/// Where the reader currently is in the element tree.
#[derive(Debug)]
enum Level {
    Wrapper,
    Locale(String),
    Scope { locale: String, scope: String },
    Translation,
}

fn shape_error(reader: &Reader<&[u8]>, message: impl Into<String>) -> Error {
    Error::XmlShape {
        position: reader.buffer_position() as u64,
        message: message.into(),
    }
}

fn required_attribute(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
    name: &str,
) -> Result<String> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(attr.unescape_value()?.into_owned()),
        None => Err(shape_error(
            reader,
            format!(
                "<{}> is missing attribute `{}`",
                String::from_utf8_lossy(element.name().as_ref()),
                name
            ),
        )),
    }
}

/// Parse the whole document into entries without touching any storage.
fn parse_document(document: &[u8]) -> Result<Vec<Entry>> {
    let mut reader = Reader::from_reader(document);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Level> = Vec::new();
    let mut seen_root = false;
    let mut entries = Vec::new();

    loop {
        buf.clear();
        let (element, self_closing) = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => (e.into_owned(), false),
            Event::Empty(e) => (e.into_owned(), true),
            Event::End(_) => {
                stack.pop();
                continue;
            }
            Event::Text(_) | Event::CData(_) => {
                return Err(shape_error(&reader, "translation files carry no text content"));
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            _ => continue,
        };

        let at_top = stack.is_empty();
        let name = element.name();
        let level = match (stack.last(), name.as_ref()) {
            (None, b"locale") | (Some(Level::Wrapper), b"locale") => {
                Level::Locale(required_attribute(&reader, &element, "name")?)
            }
            (None, _) if !seen_root => Level::Wrapper,
            (Some(Level::Locale(locale)), b"scope") => Level::Scope {
                locale: locale.clone(),
                scope: required_attribute(&reader, &element, "name")?,
            },
            (Some(Level::Scope { locale, scope }), b"translation") => {
                entries.push(Entry {
                    locale: locale.clone(),
                    scope: scope.clone(),
                    key: required_attribute(&reader, &element, "key")?,
                    value: required_attribute(&reader, &element, "value")?,
                });
                Level::Translation
            }
            (parent, other) => {
                let inside = match parent {
                    None => "document root".to_string(),
                    Some(Level::Wrapper) => "wrapper element".to_string(),
                    Some(Level::Locale(locale)) => format!("<locale name=\"{}\">", locale),
                    Some(Level::Scope { scope, .. }) => format!("<scope name=\"{}\">", scope),
                    Some(Level::Translation) => "<translation>".to_string(),
                };
                return Err(shape_error(
                    &reader,
                    format!(
                        "unexpected element <{}> inside {}",
                        String::from_utf8_lossy(other),
                        inside
                    ),
                ));
            }
        };

        // Only one wrapper element per document
        if at_top {
            seen_root = true;
        }
        if !self_closing {
            stack.push(level);
        }
    }

    Ok(entries)
}
