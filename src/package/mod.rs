//! Package identifiers: the input of every resolution

pub mod purl;
pub mod types;

pub use types::{Ecosystem, LATEST, PackageIdentifier};
