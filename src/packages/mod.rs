//! Version constraint lookup for Laravel projects
//!
//! This module resolves the requirement type and version constraint of core and
//! community packages for a Laravel version, an optional PHP version, and a bound
//! (earliest or latest acceptable constraint).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ TableSource │────▶│ TableStore  │◀────│  Registry   │
//! │ (documents) │     │ (load once) │     │  (facade)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Bundled   │     │    Table    │     │  Resolver   │
//! │ / Directory │     │(parse,merge)│     │(pluck bound)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Backing documents, embedded or read from a directory
//! - [`table`]: Parsed version tables and the community/commercial merge
//! - [`store`]: Lazily loaded, cached tables per category
//! - [`resolver`]: Reduction of a table slice into resolved constraints
//! - [`registry`]: Public facade validating Laravel and PHP versions
//! - [`framework`]: Symfony constraints and Illuminate component names
//! - [`constraint`]: Floor version of a Composer constraint
//! - [`lint`]: Data integrity checks over the loaded tables
//! - [`error`]: Error type for lookups and loading
//! - [`types`]: Bound, series and resolved package types

pub mod constraint;
pub mod error;
pub mod framework;
pub mod lint;
pub mod registry;
pub mod resolver;
pub mod source;
pub mod store;
pub mod table;
pub mod types;

pub use error::RegistryError;
pub use registry::PackageRegistry;
pub use types::{Bound, ResolvedPackage, ResolvedPackages, Series};
