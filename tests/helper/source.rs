//! Table source test utilities

use std::collections::HashMap;
use std::path::Path;

use laravel_registry::packages::RegistryError;
use laravel_registry::packages::source::{BundledSource, Document, TableSource};

/// In-memory source, falling back to the bundled documents
#[derive(Default)]
pub struct StaticSource {
    documents: HashMap<Document, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document: Document, contents: &str) -> Self {
        self.documents.insert(document, contents.to_string());
        self
    }
}

impl TableSource for StaticSource {
    fn read(&self, document: Document) -> Result<String, RegistryError> {
        match self.documents.get(&document) {
            Some(contents) => Ok(contents.clone()),
            None => BundledSource.read(document),
        }
    }
}

/// Write the bundled documents into `dir`
pub fn write_bundled_documents(dir: &Path) {
    for document in [
        Document::Core,
        Document::Community,
        Document::Commercial,
        Document::Tags,
    ] {
        std::fs::write(
            dir.join(document.file_name()),
            BundledSource.read(document).unwrap(),
        )
        .unwrap();
    }
}
