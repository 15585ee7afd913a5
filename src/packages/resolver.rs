//! Reduction of a table slice into resolved constraints
//!
//! The `latest` Laravel version is curated at the tip of development, where a
//! package has one current constraint rather than a range. Its entries are passed
//! through as-is (minus abandoned packages). Every other version is curated as a
//! range, optionally per PHP version, and is reduced by picking one end of it.
//! An entry that cannot be reduced fails the whole lookup.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::packages::error::RegistryError;
use crate::packages::table::{ConstraintPair, PackageEntry, PackageSlice};
use crate::packages::types::{Bound, LATEST, ResolvedPackage, ResolvedPackages, WILDCARD};

/// Resolve core packages for a Laravel version
///
/// Core packages always resolve to the latest end of their range.
pub fn resolve_core(
    platform_version: &str,
    slice: &PackageSlice,
) -> Result<ResolvedPackages, RegistryError> {
    resolve(platform_version, None, Bound::Latest, slice)
}

/// Resolve community packages for a Laravel version, PHP version and bound
///
/// For non-latest versions the constraint pair of `runtime` is used when the entry
/// defines one, otherwise the `*` pair.
pub fn resolve_community(
    platform_version: &str,
    runtime: Option<&str>,
    bound: Bound,
    slice: &PackageSlice,
) -> Result<ResolvedPackages, RegistryError> {
    resolve(platform_version, runtime, bound, slice)
}

/// Names of the abandoned packages in a slice, in table order
pub fn abandoned_in(slice: &PackageSlice) -> Vec<String> {
    slice
        .iter()
        .filter(|(_, entry)| entry.is_abandoned())
        .map(|(name, _)| name.clone())
        .collect()
}

fn resolve(
    platform_version: &str,
    runtime: Option<&str>,
    bound: Bound,
    slice: &PackageSlice,
) -> Result<ResolvedPackages, RegistryError> {
    debug!(
        "Resolving {} packages for Laravel {} (PHP {}, {})",
        slice.len(),
        platform_version,
        runtime.unwrap_or(WILDCARD),
        bound.as_str()
    );

    let mut resolved = ResolvedPackages::with_capacity(slice.len());

    for (name, entry) in slice {
        let package = if platform_version == LATEST {
            passthrough(name, entry)?
        } else {
            Some(pluck(name, entry, platform_version, runtime, bound)?)
        };

        if let Some(package) = package {
            resolved.insert(name.clone(), package);
        }
    }

    Ok(resolved)
}

/// Entry of the `latest` version, which must already be resolved
fn passthrough(name: &str, entry: &PackageEntry) -> Result<Option<ResolvedPackage>, RegistryError> {
    match entry {
        PackageEntry::Resolved {
            requirement_type,
            constraint,
        } => Ok(Some(ResolvedPackage::new(requirement_type, constraint))),
        PackageEntry::Abandoned => {
            debug!("Skipping abandoned package {}", name);
            Ok(None)
        }
        PackageEntry::Range { .. } | PackageEntry::PerRuntime { .. } => {
            Err(RegistryError::MissingConstraintData {
                package: name.to_string(),
                platform_version: LATEST.to_string(),
                runtime: None,
            })
        }
    }
}

/// One end of the range curated for a non-latest version
///
/// Only ranges resolve here. A bare constraint or the abandoned sentinel under a
/// versioned key is missing its range and fails.
fn pluck(
    name: &str,
    entry: &PackageEntry,
    platform_version: &str,
    runtime: Option<&str>,
    bound: Bound,
) -> Result<ResolvedPackage, RegistryError> {
    let missing = || RegistryError::MissingConstraintData {
        package: name.to_string(),
        platform_version: platform_version.to_string(),
        runtime: runtime.map(str::to_string),
    };

    let (requirement_type, constraint) = match entry {
        PackageEntry::Range {
            requirement_type,
            constraints,
        } => (requirement_type, constraints.pick(bound)),
        PackageEntry::PerRuntime {
            requirement_type,
            constraints,
        } => {
            let pair = pair_for_runtime(constraints, runtime).ok_or_else(|| {
                warn!(
                    "{} on Laravel {} has no constraint for PHP {} and no wildcard",
                    name,
                    platform_version,
                    runtime.unwrap_or(WILDCARD)
                );
                missing()
            })?;
            (requirement_type, pair.pick(bound))
        }
        PackageEntry::Resolved { .. } | PackageEntry::Abandoned => {
            warn!(
                "{} on Laravel {} has no constraint range",
                name, platform_version
            );
            return Err(missing());
        }
    };

    Ok(ResolvedPackage::new(requirement_type, constraint))
}

/// Constraint pair for a PHP version, falling back to the wildcard pair
pub fn pair_for_runtime<'a>(
    constraints: &'a IndexMap<String, ConstraintPair>,
    runtime: Option<&str>,
) -> Option<&'a ConstraintPair> {
    runtime
        .and_then(|runtime| constraints.get(runtime))
        .or_else(|| constraints.get(WILDCARD))
}
