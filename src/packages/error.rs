use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unexpected Laravel version: {0}")]
    UnknownPlatformVersion(String),

    #[error("Unexpected PHP version: {0}")]
    UnknownRuntimeVersion(String),

    #[error("Unexpected Laravel series ({0}), series must be: latest or prior")]
    UnknownSeries(String),

    #[error("Unexpected constraint bound ({0}), bound must be: earliest or latest")]
    UnknownBound(String),

    #[error("Data source {document} unavailable: {reason}")]
    DataSourceUnavailable { document: String, reason: String },

    #[error("No constraint for {package} on Laravel {platform_version} (PHP {})", .runtime.as_deref().unwrap_or("*"))]
    MissingConstraintData {
        package: String,
        platform_version: String,
        runtime: Option<String>,
    },

    #[error("Package {package} is defined by more than one source for Laravel {platform_version}")]
    ConflictingEntry {
        package: String,
        platform_version: String,
    },

    #[error("No tag recorded for Laravel series: {0}")]
    MissingTag(String),

    #[error("Table store lock poisoned")]
    LockPoisoned,
}
