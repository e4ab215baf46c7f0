//! Package URL (`pkg:type/namespace/name@version`) parsing

use std::str::FromStr;

use packageurl::PackageUrl;

use crate::error::IdentifierError;
use crate::package::types::{Ecosystem, LATEST, PackageIdentifier};

impl FromStr for PackageIdentifier {
    type Err = IdentifierError;

    /// Parse a package URL. Qualifiers and subpath are ignored; a missing
    /// version means [`LATEST`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let purl = PackageUrl::from_str(s.trim())
            .map_err(|e| IdentifierError::Malformed(format!("{}: {}", s, e)))?;
        let ecosystem = purl.ty().parse::<Ecosystem>()?;

        PackageIdentifier::new(
            ecosystem,
            purl.namespace().map(str::to_string),
            purl.name(),
            purl.version().unwrap_or(LATEST),
        )
    }
}
