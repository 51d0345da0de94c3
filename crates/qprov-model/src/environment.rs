//! Software environment snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A software package dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name (lowercase by convention).
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Package URL in CycloneDX purl format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
}

impl Package {
    /// Create a new package entry.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            purl: None,
        }
    }

    /// Set the package URL.
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// The purl, falling back to a pypi-style locator.
    pub fn purl_or_default(&self) -> String {
        self.purl
            .clone()
            .unwrap_or_else(|| format!("pkg:pypi/{}@{}", self.name, self.version))
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// Quantum SDKs recognized for [`Environment::quantum_sdk`], in priority order.
const SDK_PRIORITY: &[&str] = &["qiskit", "cirq", "pennylane", "braket"];

/// Complete software environment snapshot.
///
/// Package names are unique within one environment: [`Environment::with_package`]
/// replaces any existing entry with the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Interpreter version of the host program (e.g. "3.11.12").
    pub interpreter: String,
    /// OS and architecture string.
    pub platform: String,
    /// Captured package versions, in insertion order.
    #[serde(default)]
    pub packages: Vec<Package>,
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl Environment {
    /// Create a new environment snapshot taken now.
    pub fn new(interpreter: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            platform: platform.into(),
            packages: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add a package, replacing any existing entry with the same name.
    pub fn with_package(mut self, package: Package) -> Self {
        self.push_package(package);
        self
    }

    /// Add a package in place, replacing any existing entry with the same name.
    pub fn push_package(&mut self, package: Package) {
        if let Some(existing) = self.packages.iter_mut().find(|p| p.name == package.name) {
            *existing = package;
        } else {
            self.packages.push(package);
        }
    }

    /// Primary quantum SDK detected, as "name==version".
    pub fn quantum_sdk(&self) -> Option<String> {
        for sdk in SDK_PRIORITY {
            if let Some(pkg) = self.packages.iter().find(|p| p.name.starts_with(sdk)) {
                return Some(pkg.to_string());
            }
        }
        None
    }
}
