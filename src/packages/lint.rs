//! Data integrity checks over the curated tables
//!
//! Issues are advisory: lookups still succeed where the data allows it.

use serde::Serialize;
use tracing::warn;

use crate::packages::constraint::floor_version;
use crate::packages::error::RegistryError;
use crate::packages::registry::PackageRegistry;
use crate::packages::store::Category;
use crate::packages::table::{ConstraintPair, PackageEntry, VersionTable};
use crate::packages::types::{LATEST, WILDCARD};

/// Kind of problem found in a table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintKind {
    /// Per-runtime entry without a `*` pair, so lookups without a matching PHP version fail
    MissingWildcard,
    /// Latest constraint floors below the earliest one
    BoundsInverted { earliest: String, latest: String },
    /// Single constraint where a range is expected
    MissingRange { constraint: String },
    /// Abandoned sentinel outside the `latest` table
    AbandonedOutsideLatest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    pub category: &'static str,
    pub platform_version: String,
    pub package: String,
    /// PHP version key of the offending pair, if any
    pub runtime: Option<String>,
    pub kind: LintKind,
}

/// Check the core and community tables of a registry
pub fn lint(registry: &PackageRegistry) -> Result<Vec<LintIssue>, RegistryError> {
    let mut issues = Vec::new();

    for category in [Category::Core, Category::Community] {
        let table = registry.store().table(category)?;
        issues.extend(lint_table(category, &table));
    }

    for issue in &issues {
        warn!(
            "{} {} on Laravel {}: {:?}",
            issue.category, issue.package, issue.platform_version, issue.kind
        );
    }

    Ok(issues)
}

/// Check every non-latest slice of a table
pub fn lint_table(category: Category, table: &VersionTable) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    for (platform_version, slice) in table {
        if platform_version == LATEST {
            continue;
        }

        for (package, entry) in slice {
            let issue = |runtime: Option<&str>, kind: LintKind| LintIssue {
                category: category.as_str(),
                platform_version: platform_version.clone(),
                package: package.clone(),
                runtime: runtime.map(str::to_string),
                kind,
            };

            match entry {
                PackageEntry::Range { constraints, .. } => {
                    if let Some(kind) = inverted(constraints) {
                        issues.push(issue(None, kind));
                    }
                }
                PackageEntry::PerRuntime { constraints, .. } => {
                    if !constraints.contains_key(WILDCARD) {
                        issues.push(issue(None, LintKind::MissingWildcard));
                    }
                    for (runtime, pair) in constraints {
                        if let Some(kind) = inverted(pair) {
                            issues.push(issue(Some(runtime.as_str()), kind));
                        }
                    }
                }
                PackageEntry::Resolved { constraint, .. } => {
                    issues.push(issue(
                        None,
                        LintKind::MissingRange {
                            constraint: constraint.clone(),
                        },
                    ));
                }
                PackageEntry::Abandoned => {
                    issues.push(issue(None, LintKind::AbandonedOutsideLatest));
                }
            }
        }
    }

    issues
}

fn inverted(pair: &ConstraintPair) -> Option<LintKind> {
    let earliest = floor_version(&pair.earliest)?;
    let latest = floor_version(&pair.latest)?;

    (latest < earliest).then(|| LintKind::BoundsInverted {
        earliest: pair.earliest.clone(),
        latest: pair.latest.clone(),
    })
}
