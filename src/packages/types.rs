//! Common types for constraint lookups

use indexmap::IndexMap;
use serde::Serialize;

use crate::packages::error::RegistryError;

/// Laravel version key whose entries are already resolved to a single constraint
pub const LATEST: &str = "latest";

/// Wildcard PHP version key used when no runtime-specific constraint exists
pub const WILDCARD: &str = "*";

/// Which end of a constraint range to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bound {
    /// Oldest constraint the Laravel version accepts
    Earliest,
    /// Newest constraint the Laravel version accepts
    #[default]
    Latest,
}

impl Bound {
    /// Returns the string representation of the bound
    pub fn as_str(&self) -> &'static str {
        match self {
            Bound::Earliest => "earliest",
            Bound::Latest => "latest",
        }
    }
}

impl std::str::FromStr for Bound {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earliest" => Ok(Bound::Earliest),
            "latest" => Ok(Bound::Latest),
            _ => Err(RegistryError::UnknownBound(s.to_string())),
        }
    }
}

/// Laravel release series with a recorded tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Series {
    /// Current major release
    #[default]
    Latest,
    /// Major release before the current one
    Prior,
}

impl Series {
    /// Returns the string representation of the series
    pub fn as_str(&self) -> &'static str {
        match self {
            Series::Latest => "latest",
            Series::Prior => "prior",
        }
    }
}

impl std::str::FromStr for Series {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Series::Latest),
            "prior" => Ok(Series::Prior),
            _ => Err(RegistryError::UnknownSeries(s.to_string())),
        }
    }
}

/// Requirement type and constraint of a package for one lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPackage {
    /// Composer section the package belongs to (e.g., "require", "require-dev")
    #[serde(rename = "type")]
    pub requirement_type: String,
    /// Composer version constraint (e.g., "^8.2", "^7.2|^8.0")
    pub constraint: String,
}

impl ResolvedPackage {
    pub fn new(requirement_type: &str, constraint: &str) -> Self {
        Self {
            requirement_type: requirement_type.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Resolved packages keyed by package name, in table order
pub type ResolvedPackages = IndexMap<String, ResolvedPackage>;
