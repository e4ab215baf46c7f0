//! Common types for package identifiers

use std::fmt;

use serde::Serialize;

use crate::error::IdentifierError;

/// Version marker that asks the registry for its current version
pub const LATEST: &str = "latest";

/// Package ecosystem, one per supported registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// PyPI (pypi.org)
    Pypi,
    /// npm registry (registry.npmjs.org)
    Npm,
    /// crates.io
    Cargo,
    /// Maven Central (repo1.maven.org)
    Maven,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 4] = [
        Ecosystem::Pypi,
        Ecosystem::Npm,
        Ecosystem::Cargo,
        Ecosystem::Maven,
    ];

    /// Returns the string representation of the ecosystem
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Pypi => "pypi",
            Ecosystem::Npm => "npm",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Maven => "maven",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pypi" => Ok(Ecosystem::Pypi),
            "npm" => Ok(Ecosystem::Npm),
            "cargo" => Ok(Ecosystem::Cargo),
            "maven" => Ok(Ecosystem::Maven),
            other => Err(IdentifierError::UnsupportedType(other.to_string())),
        }
    }
}

/// A package version within an ecosystem
///
/// Immutable once built: `with_version` returns a new identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdentifier {
    ecosystem: Ecosystem,
    /// npm scope (`@types`) or Maven groupId (`org.apache.commons`)
    namespace: Option<String>,
    name: String,
    version: String,
}

impl PackageIdentifier {
    pub fn new(
        ecosystem: Ecosystem,
        namespace: Option<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let name = name.into();
        let version = version.into();
        let namespace = namespace.filter(|ns| !ns.is_empty());

        if name.trim().is_empty() {
            return Err(IdentifierError::EmptyName);
        }
        if version.trim().is_empty() {
            return Err(IdentifierError::EmptyVersion);
        }
        if ecosystem == Ecosystem::Maven && namespace.is_none() {
            return Err(IdentifierError::MissingNamespace(ecosystem));
        }

        Ok(Self {
            ecosystem,
            namespace,
            name,
            version,
        })
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_latest(&self) -> bool {
        self.version == LATEST
    }

    /// Name as the registry knows it (`@scope/name` for scoped npm packages)
    pub fn registry_name(&self) -> String {
        match (self.ecosystem, &self.namespace) {
            (Ecosystem::Npm, Some(scope)) => {
                let scope = scope.strip_prefix('@').unwrap_or(scope);
                format!("@{}/{}", scope, self.name)
            }
            _ => self.name.clone(),
        }
    }

    /// Returns a copy pinned to a concrete version
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::new(
            self.ecosystem,
            self.namespace.clone(),
            self.name.clone(),
            version,
        )
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(
                f,
                "{}/{}/{}@{}",
                self.ecosystem, ns, self.name, self.version
            ),
            None => write!(f, "{}/{}@{}", self.ecosystem, self.name, self.version),
        }
    }
}
