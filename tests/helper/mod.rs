//! Shared test utilities

pub mod source;

pub use source::{StaticSource, write_bundled_documents};
