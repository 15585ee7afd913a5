//! Lazily loaded version tables
//!
//! Each category is read from its source, parsed and merged the first time it is
//! requested, then kept for the lifetime of the store. Loading happens while the
//! cache lock is held, so concurrent first requests load a category once.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::packages::error::RegistryError;
use crate::packages::source::{Document, TableSource};
use crate::packages::table::{
    PackageSlice, TagTable, VersionTable, merge_tables, parse_table, parse_tags,
};

/// Logical group of packages with its own version table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Packages included in a new Laravel application
    Core,
    /// Community packages with commercial packages merged in
    Community,
}

impl Category {
    /// Returns the string representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Community => "community",
        }
    }

    /// Documents merged, in order, to build the category's table
    fn documents(&self) -> &'static [Document] {
        match self {
            Category::Core => &[Document::Core],
            Category::Community => &[Document::Community, Document::Commercial],
        }
    }
}

pub struct TableStore {
    source: Arc<dyn TableSource>,
    platform_versions: Vec<String>,
    tables: Mutex<HashMap<Category, Arc<VersionTable>>>,
    tags: Mutex<Option<Arc<TagTable>>>,
}

impl TableStore {
    /// Create a store accepting the given Laravel version keys
    pub fn new(source: Arc<dyn TableSource>, platform_versions: Vec<String>) -> Self {
        Self {
            source,
            platform_versions,
            tables: Mutex::new(HashMap::new()),
            tags: Mutex::new(None),
        }
    }

    pub fn verify_platform_version(&self, platform_version: &str) -> Result<(), RegistryError> {
        if self.platform_versions.iter().any(|v| v == platform_version) {
            Ok(())
        } else {
            Err(RegistryError::UnknownPlatformVersion(platform_version.to_string()))
        }
    }

    /// Returns the packages of a category for a Laravel version
    ///
    /// A version that is accepted but has no packages in the data yields an empty slice.
    pub fn table_for(
        &self,
        category: Category,
        platform_version: &str,
    ) -> Result<PackageSlice, RegistryError> {
        self.verify_platform_version(platform_version)?;

        let table = self.table(category)?;
        Ok(table.get(platform_version).cloned().unwrap_or_default())
    }

    /// Returns the whole table of a category, loading it on first use
    pub fn table(&self, category: Category) -> Result<Arc<VersionTable>, RegistryError> {
        let mut tables = lock(&self.tables)?;

        if let Some(table) = tables.get(&category) {
            debug!("Using cached {} table", category.as_str());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.load(category)?);
        tables.insert(category, Arc::clone(&table));
        Ok(table)
    }

    /// Returns the release tag table, loading it on first use
    pub fn tags(&self) -> Result<Arc<TagTable>, RegistryError> {
        let mut tags = lock(&self.tags)?;

        if let Some(table) = tags.as_ref() {
            return Ok(Arc::clone(table));
        }

        info!("Loading tag table");
        let document = Document::Tags;
        let contents = self.source.read(document)?;
        let table = Arc::new(parse_tags(document.file_name(), &contents)?);
        *tags = Some(Arc::clone(&table));
        Ok(table)
    }

    fn load(&self, category: Category) -> Result<VersionTable, RegistryError> {
        info!("Loading {} table", category.as_str());

        let mut merged = VersionTable::new();
        for document in category.documents() {
            let contents = self.source.read(*document)?;
            let table = parse_table(document.file_name(), &contents)?;
            merged = merge_tables(merged, table)?;
        }

        debug!(
            "Loaded {} table with {} Laravel versions",
            category.as_str(),
            merged.len()
        );
        Ok(merged)
    }
}

/// Acquire a cache lock with proper error handling
fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RegistryError> {
    mutex.lock().map_err(|_| RegistryError::LockPoisoned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::source::MockTableSource;
    use crate::packages::table::PackageEntry;

    const CORE: &str = r#"{
        "latest": {"php": {"type": "require", "constraint": "^8.2"}},
        "6.x": {"php": {"type": "require", "constraints": {"earliest": "^7.2", "latest": "^7.2|^8.0"}}}
    }"#;

    const COMMUNITY: &str = r#"{
        "latest": {"livewire/livewire": ["require", "^3.6"], "fideloper/proxy": false}
    }"#;

    const COMMERCIAL: &str = r#"{
        "latest": {"laravel/nova": {"type": "require", "constraint": "^5.4"}}
    }"#;

    fn versions() -> Vec<String> {
        vec!["latest".to_string(), "7.x".to_string(), "6.x".to_string()]
    }

    fn mock_source() -> MockTableSource {
        let mut source = MockTableSource::new();
        source
            .expect_read()
            .withf(|document| *document == Document::Core)
            .times(1)
            .returning(|_| Ok(CORE.to_string()));
        source
    }

    #[test]
    fn table_for_loads_category_once() {
        let store = TableStore::new(Arc::new(mock_source()), versions());

        let first = store.table_for(Category::Core, "latest").unwrap();
        let second = store.table_for(Category::Core, "6.x").unwrap();
        let third = store.table_for(Category::Core, "latest").unwrap();

        assert_eq!(first, third);
        assert_eq!(
            first["php"],
            PackageEntry::Resolved {
                requirement_type: "require".to_string(),
                constraint: "^8.2".to_string(),
            }
        );
        assert!(matches!(second["php"], PackageEntry::Range { .. }));
    }

    #[test]
    fn table_for_loads_once_across_threads() {
        let store = TableStore::new(Arc::new(mock_source()), versions());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let slice = store.table_for(Category::Core, "latest").unwrap();
                    assert_eq!(slice.len(), 1);
                });
            }
        });
    }

    #[test]
    fn table_for_rejects_unknown_platform_version_without_loading() {
        let store = TableStore::new(Arc::new(MockTableSource::new()), versions());

        let result = store.table_for(Category::Core, "5.x");

        assert!(matches!(
            result,
            Err(RegistryError::UnknownPlatformVersion(version)) if version == "5.x"
        ));
    }

    #[test]
    fn table_for_returns_empty_slice_for_accepted_version_without_data() {
        let store = TableStore::new(Arc::new(mock_source()), versions());

        let slice = store.table_for(Category::Core, "7.x").unwrap();

        assert!(slice.is_empty());
    }

    #[test]
    fn community_table_merges_commercial_document() {
        let mut source = MockTableSource::new();
        source
            .expect_read()
            .withf(|document| *document == Document::Community)
            .times(1)
            .returning(|_| Ok(COMMUNITY.to_string()));
        source
            .expect_read()
            .withf(|document| *document == Document::Commercial)
            .times(1)
            .returning(|_| Ok(COMMERCIAL.to_string()));
        let store = TableStore::new(Arc::new(source), versions());

        let slice = store.table_for(Category::Community, "latest").unwrap();

        assert_eq!(
            slice.keys().collect::<Vec<_>>(),
            vec!["livewire/livewire", "fideloper/proxy", "laravel/nova"]
        );
        assert!(slice["fideloper/proxy"].is_abandoned());
    }

    #[test]
    fn table_for_propagates_unavailable_source() {
        let mut source = MockTableSource::new();
        source.expect_read().returning(|document| {
            Err(RegistryError::DataSourceUnavailable {
                document: document.file_name().to_string(),
                reason: "No such file or directory".to_string(),
            })
        });
        let store = TableStore::new(Arc::new(source), versions());

        let result = store.table_for(Category::Core, "latest");

        assert!(matches!(
            result,
            Err(RegistryError::DataSourceUnavailable { document, .. })
                if document == "laravel-core.json"
        ));
    }

    #[test]
    fn tags_are_loaded_once() {
        let mut source = MockTableSource::new();
        source
            .expect_read()
            .withf(|document| *document == Document::Tags)
            .times(1)
            .returning(|_| Ok(r#"{"tags": {"latest": "v12.21.0"}}"#.to_string()));
        let store = TableStore::new(Arc::new(source), versions());

        assert_eq!(store.tags().unwrap()["latest"], "v12.21.0");
        assert_eq!(store.tags().unwrap()["latest"], "v12.21.0");
    }
}
