//! Public lookups over the version tables

use std::sync::Arc;

use tracing::debug;

use crate::config::RegistryConfig;
use crate::packages::error::RegistryError;
use crate::packages::framework;
use crate::packages::resolver::{abandoned_in, resolve_community, resolve_core};
use crate::packages::source::{BundledSource, DirectorySource, TableSource};
use crate::packages::store::{Category, TableStore};
use crate::packages::types::{Bound, LATEST, ResolvedPackages, Series};

/// Entry point for package constraint lookups
///
/// Owns the table store, so tables are loaded at most once per registry.
/// Construct one at startup and share it by reference.
pub struct PackageRegistry {
    store: TableStore,
    runtime_versions: Vec<String>,
}

impl PackageRegistry {
    /// Create a registry reading tables from `source`
    pub fn new(source: Arc<dyn TableSource>, config: &RegistryConfig) -> Self {
        Self {
            store: TableStore::new(source, config.platform_versions.clone()),
            runtime_versions: config.runtime_versions.clone(),
        }
    }

    /// Create a registry over the bundled tables with the default configuration
    pub fn bundled() -> Self {
        Self::new(Arc::new(BundledSource), &RegistryConfig::default())
    }

    /// Create a registry reading from the configured data directory, or the bundled tables
    pub fn from_config(config: &RegistryConfig) -> Self {
        let source: Arc<dyn TableSource> = match &config.data_dir {
            Some(dir) => {
                debug!("Using table documents from {:?}", dir);
                Arc::new(DirectorySource::new(dir))
            }
            None => Arc::new(BundledSource),
        };
        Self::new(source, config)
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Returns the type and constraint of packages included in a Laravel
    /// application for the given Laravel version
    pub fn core_packages_for(&self, laravel: &str) -> Result<ResolvedPackages, RegistryError> {
        let slice = self.store.table_for(Category::Core, laravel)?;
        resolve_core(laravel, &slice)
    }

    /// Returns the type and constraint of popular community packages for the
    /// given Laravel version, optional PHP version and bound
    pub fn community_packages_for(
        &self,
        laravel: &str,
        php: Option<&str>,
        bound: Bound,
    ) -> Result<ResolvedPackages, RegistryError> {
        self.store.verify_platform_version(laravel)?;
        self.verify_runtime_version(php)?;

        let slice = self.store.table_for(Category::Community, laravel)?;
        resolve_community(laravel, php, bound, &slice)
    }

    /// Returns packages marked as abandoned on Packagist
    ///
    /// Reads the `latest` slice even when `latest` is not an accepted lookup key.
    pub fn abandoned_packages(&self) -> Result<Vec<String>, RegistryError> {
        let table = self.store.table(Category::Community)?;
        Ok(table.get(LATEST).map(abandoned_in).unwrap_or_default())
    }

    /// Returns the latest tagged Laravel release for the series, or for the
    /// latest series when none is given
    pub fn tag_for_series(&self, series: Option<Series>) -> Result<String, RegistryError> {
        let series = series.unwrap_or_default();
        self.store
            .tags()?
            .get(series.as_str())
            .cloned()
            .ok_or_else(|| RegistryError::MissingTag(series.as_str().to_string()))
    }

    /// Returns the constraint used by the given Laravel version for the
    /// Symfony components it includes
    pub fn symfony_constraint_for(&self, laravel: &str) -> Result<&'static str, RegistryError> {
        self.store.verify_platform_version(laravel)?;
        framework::symfony_constraint_for(laravel)
    }

    /// Returns the names of all Illuminate components
    pub fn illuminate_packages() -> &'static [&'static str] {
        framework::illuminate_packages()
    }

    fn verify_runtime_version(&self, php: Option<&str>) -> Result<(), RegistryError> {
        match php {
            Some(version) if !self.runtime_versions.iter().any(|v| v == version) => {
                Err(RegistryError::UnknownRuntimeVersion(version.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::bundled()
    }
}
