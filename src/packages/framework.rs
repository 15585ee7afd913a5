//! Symfony constraints and Illuminate component names
//!
//! Both are maintained by hand rather than loaded from a document.

use crate::packages::error::RegistryError;

/// Constraint used for the Symfony components bundled with each Laravel version
const SYMFONY_CONSTRAINTS: &[(&str, &str)] = &[
    ("latest", "^7.0"),
    ("12.x", "^7.2"),
    ("11.x", "^7.0"),
    ("10.x", "^6.2"),
    ("9.x", "^6.0"),
    ("8.x", "^5.4"),
    ("7.x", "^5.0"),
    ("6.x", "^4.3.4"),
];

/// Components split out of `laravel/framework`
const ILLUMINATE_PACKAGES: &[&str] = &[
    "illuminate/auth",
    "illuminate/broadcasting",
    "illuminate/bus",
    "illuminate/cache",
    "illuminate/config",
    "illuminate/console",
    "illuminate/container",
    "illuminate/contracts",
    "illuminate/cookie",
    "illuminate/database",
    "illuminate/encryption",
    "illuminate/events",
    "illuminate/filesystem",
    "illuminate/hashing",
    "illuminate/http",
    "illuminate/log",
    "illuminate/mail",
    "illuminate/notifications",
    "illuminate/pagination",
    "illuminate/pipeline",
    "illuminate/queue",
    "illuminate/redis",
    "illuminate/routing",
    "illuminate/session",
    "illuminate/support",
    "illuminate/testing",
    "illuminate/translation",
    "illuminate/validation",
    "illuminate/view",
];

/// Returns the Symfony constraint for a Laravel version
pub fn symfony_constraint_for(platform_version: &str) -> Result<&'static str, RegistryError> {
    SYMFONY_CONSTRAINTS
        .iter()
        .find(|(version, _)| *version == platform_version)
        .map(|(_, constraint)| *constraint)
        .ok_or_else(|| RegistryError::UnknownPlatformVersion(platform_version.to_string()))
}

pub fn illuminate_packages() -> &'static [&'static str] {
    ILLUMINATE_PACKAGES
}
