//! Resolve package identifiers to their source repository and the release
//! page of a given version.

pub mod config;
pub mod error;
pub mod extractor;
pub mod http;
pub mod normalize;
pub mod observer;
pub mod package;
pub mod probe;
pub mod registry;
pub mod release;
pub mod resolver;
pub mod scrape;
pub mod vcs;

pub use error::RegistryError;
pub use package::{Ecosystem, PackageIdentifier};
pub use resolver::{ResolutionResult, SourceResolver};
