use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::error::Error;
use crate::source::{JsonSource, Source, SourceFormat, XmlSource};
use crate::storage::MemoryStorage;
use crate::translator::{Translator, DEFAULT_LOCALE, DEFAULT_SCOPE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Lookup defaults
    pub locale: String,
    pub scope: String,

    // Translation files, loaded in order
    pub translation_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            translation_files: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            locale: std::env::var("I18N_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string()),
            scope: std::env::var("I18N_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string()),

            // Comma-separated list of .json / .xml files
            translation_files: match std::env::var("I18N_FILES") {
                Ok(files) => parse_file_list(&files),
                Err(std::env::VarError::NotPresent) => Vec::new(),
                Err(e) => return Err(e).context("I18N_FILES is not valid unicode"),
            },
        })
    }

    /// Build a translator with the configured defaults and load every
    /// configured translation file into it.
    pub fn translator(&self) -> Result<Translator> {
        let mut translator = Translator::new(&self.scope, &self.locale, None, MemoryStorage::new());

        for path in &self.translation_files {
            let format = SourceFormat::from_path(path)
                .ok_or_else(|| Error::UnsupportedFormat(path.clone()))?;
            let mut source: Box<dyn Source> = match format {
                SourceFormat::Json => Box::new(
                    JsonSource::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?,
                ),
                SourceFormat::Xml => Box::new(
                    XmlSource::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?,
                ),
            };

            let loaded = translator
                .load_from(&mut source)
                .with_context(|| format!("Failed to load translations from {}", path.display()))?;
            info!(
                "Loaded {} {} translations from {}",
                loaded,
                format.name(),
                path.display()
            );
        }

        Ok(translator)
    }
}

fn parse_file_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}
