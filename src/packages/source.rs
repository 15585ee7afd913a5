//! Backing documents for the version tables

#[cfg(test)]
use mockall::automock;

use std::path::PathBuf;

use tracing::debug;

use crate::packages::error::RegistryError;

/// A document supplying one source of table data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Packages included in a new Laravel application
    Core,
    /// Popular packages from the Laravel community
    Community,
    /// Paid first-party packages, merged into the community table
    Commercial,
    /// Most recent tag per Laravel series
    Tags,
}

impl Document {
    /// Returns the file name of the document
    pub fn file_name(&self) -> &'static str {
        match self {
            Document::Core => "laravel-core.json",
            Document::Community => "laravel-packages.json",
            Document::Commercial => "commercial.json",
            Document::Tags => "laravel-tags.json",
        }
    }
}

/// Trait for reading the raw contents of a document
#[cfg_attr(test, automock)]
pub trait TableSource: Send + Sync {
    /// Returns the JSON text of the document
    ///
    /// # Returns
    /// * `Ok(String)` - Raw document contents
    /// * `Err(RegistryError::DataSourceUnavailable)` - If the document cannot be read
    fn read(&self, document: Document) -> Result<String, RegistryError>;
}

/// Documents embedded in the binary at compile time
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl TableSource for BundledSource {
    fn read(&self, document: Document) -> Result<String, RegistryError> {
        let contents = match document {
            Document::Core => include_str!("../../data/laravel-core.json"),
            Document::Community => include_str!("../../data/laravel-packages.json"),
            Document::Commercial => include_str!("../../data/commercial.json"),
            Document::Tags => include_str!("../../data/laravel-tags.json"),
        };
        Ok(contents.to_string())
    }
}

/// Documents read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableSource for DirectorySource {
    fn read(&self, document: Document) -> Result<String, RegistryError> {
        let path = self.dir.join(document.file_name());
        debug!("Reading {:?}", path);

        std::fs::read_to_string(&path).map_err(|e| RegistryError::DataSourceUnavailable {
            document: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
