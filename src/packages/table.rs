//! Parsed version tables
//!
//! A table maps a Laravel version key to the packages curated for it. Entries
//! come in four shapes depending on the key and the document they were read from:
//!
//! | JSON                                                   | Entry                     |
//! |--------------------------------------------------------|---------------------------|
//! | `false`                                                | [`PackageEntry::Abandoned`]  |
//! | `{"type": t, "constraint": c}` or `[t, c]`             | [`PackageEntry::Resolved`]   |
//! | `{"type": t, "constraints": {"earliest": e, "latest": l}}` | [`PackageEntry::Range`]  |
//! | `[t, {"*": [e, l], "8.1": [e, l]}]`                    | [`PackageEntry::PerRuntime`] |

use indexmap::IndexMap;
use serde::Deserialize;

use crate::packages::error::RegistryError;
use crate::packages::types::Bound;

/// Earliest and latest constraint of a package for one PHP version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintPair {
    pub earliest: String,
    pub latest: String,
}

impl ConstraintPair {
    pub fn new(earliest: &str, latest: &str) -> Self {
        Self {
            earliest: earliest.to_string(),
            latest: latest.to_string(),
        }
    }

    /// Returns the constraint at the requested end of the pair
    pub fn pick(&self, bound: Bound) -> &str {
        match bound {
            Bound::Earliest => &self.earliest,
            Bound::Latest => &self.latest,
        }
    }
}

/// A package as curated for one Laravel version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub enum PackageEntry {
    /// Single constraint, used for the `latest` Laravel version
    Resolved {
        requirement_type: String,
        constraint: String,
    },
    /// Earliest and latest constraint regardless of PHP version
    Range {
        requirement_type: String,
        constraints: ConstraintPair,
    },
    /// Constraint pairs keyed by PHP version, with `*` as the fallback
    PerRuntime {
        requirement_type: String,
        constraints: IndexMap<String, ConstraintPair>,
    },
    /// Package no longer maintained upstream
    Abandoned,
}

impl PackageEntry {
    /// Returns the Composer section of the entry, or None if abandoned
    pub fn requirement_type(&self) -> Option<&str> {
        match self {
            PackageEntry::Resolved {
                requirement_type, ..
            }
            | PackageEntry::Range {
                requirement_type, ..
            }
            | PackageEntry::PerRuntime {
                requirement_type, ..
            } => Some(requirement_type),
            PackageEntry::Abandoned => None,
        }
    }

    pub fn is_abandoned(&self) -> bool {
        matches!(self, PackageEntry::Abandoned)
    }
}

/// Entry shapes as they appear in the documents
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Flag(bool),
    Pair(String, RawConstraints),
    Object {
        #[serde(rename = "type")]
        requirement_type: String,
        constraint: Option<String>,
        constraints: Option<RawConstraints>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConstraints {
    Single(String),
    Range { earliest: String, latest: String },
    PerRuntime(IndexMap<String, (String, String)>),
}

impl TryFrom<RawEntry> for PackageEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        match raw {
            RawEntry::Flag(false) => Ok(PackageEntry::Abandoned),
            RawEntry::Flag(true) => Err("`true` is not a package entry".to_string()),
            RawEntry::Pair(requirement_type, constraints) => {
                Ok(from_constraints(requirement_type, constraints))
            }
            RawEntry::Object {
                requirement_type,
                constraint,
                constraints,
            } => match (constraint, constraints) {
                (Some(constraint), None) => Ok(PackageEntry::Resolved {
                    requirement_type,
                    constraint,
                }),
                (None, Some(constraints)) => Ok(from_constraints(requirement_type, constraints)),
                (Some(_), Some(_)) => Err(format!(
                    "{requirement_type} entry has both `constraint` and `constraints`"
                )),
                (None, None) => Err(format!(
                    "{requirement_type} entry has neither `constraint` nor `constraints`"
                )),
            },
        }
    }
}

fn from_constraints(requirement_type: String, constraints: RawConstraints) -> PackageEntry {
    match constraints {
        RawConstraints::Single(constraint) => PackageEntry::Resolved {
            requirement_type,
            constraint,
        },
        RawConstraints::Range { earliest, latest } => PackageEntry::Range {
            requirement_type,
            constraints: ConstraintPair { earliest, latest },
        },
        RawConstraints::PerRuntime(pairs) => PackageEntry::PerRuntime {
            requirement_type,
            constraints: pairs
                .into_iter()
                .map(|(runtime, (earliest, latest))| (runtime, ConstraintPair { earliest, latest }))
                .collect(),
        },
    }
}

/// Packages curated for one Laravel version, keyed by package name
pub type PackageSlice = IndexMap<String, PackageEntry>;

/// Package slices keyed by Laravel version
pub type VersionTable = IndexMap<String, PackageSlice>;

/// Release tags keyed by series name
pub type TagTable = IndexMap<String, String>;

#[derive(Deserialize)]
struct TagDocument {
    #[serde(default)]
    tags: TagTable,
}

/// Parse a version table document
pub fn parse_table(document: &str, contents: &str) -> Result<VersionTable, RegistryError> {
    serde_json::from_str(contents).map_err(|e| RegistryError::DataSourceUnavailable {
        document: document.to_string(),
        reason: e.to_string(),
    })
}

/// Parse the release tag document (`{"tags": {"latest": ..., "prior": ...}}`)
pub fn parse_tags(document: &str, contents: &str) -> Result<TagTable, RegistryError> {
    serde_json::from_str::<TagDocument>(contents)
        .map(|parsed| parsed.tags)
        .map_err(|e| RegistryError::DataSourceUnavailable {
            document: document.to_string(),
            reason: e.to_string(),
        })
}

/// Union `overlay` into `base`, keyed by Laravel version then package name
///
/// Sources are expected to curate disjoint packages; a package defined by both
/// for the same Laravel version is reported as [`RegistryError::ConflictingEntry`].
pub fn merge_tables(
    mut base: VersionTable,
    overlay: VersionTable,
) -> Result<VersionTable, RegistryError> {
    for (platform_version, packages) in overlay {
        let slice = base.entry(platform_version.clone()).or_default();

        for (name, entry) in packages {
            if slice.contains_key(&name) {
                return Err(RegistryError::ConflictingEntry {
                    package: name,
                    platform_version,
                });
            }
            slice.insert(name, entry);
        }
    }

    Ok(base)
}
