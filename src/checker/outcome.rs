//! Outcome types produced by the reconciliation engine.
//!
//! A [`ReconciliationOutcome`] is built once per check and never mutated.
//! It serializes to the JSON report with camelCase keys and `null` for
//! absent values.

use serde::{Deserialize, Serialize};

use super::source::DeclarationSource;

/// Tri-state verdict of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Majors match.
    Pass,
    /// Majors differ.
    Fail,
    /// The comparison could not be made.
    Warning,
}

impl CheckStatus {
    /// Process exit code for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warning => 2,
        }
    }

    /// Short uppercase label used in the text report.
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Warning => "WARN",
        }
    }
}

/// One side of the comparison: the raw declared value and its major.
///
/// `major` is always `None` when `raw` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReadingFields")]
pub struct VersionReading {
    raw: Option<String>,
    major: Option<u64>,
}

impl VersionReading {
    /// A reading for a value that was not declared.
    pub fn absent() -> Self {
        Self::default()
    }

    /// A reading for a declared value, whether or not it parsed.
    pub fn declared(raw: impl Into<String>, major: Option<u64>) -> Self {
        Self {
            raw: Some(raw.into()),
            major,
        }
    }

    /// The value as written in its source.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The normalized major version, if the raw value parsed.
    pub fn major(&self) -> Option<u64> {
        self.major
    }

    /// Whether a value was declared at all.
    pub fn is_declared(&self) -> bool {
        self.raw.is_some()
    }
}

#[derive(Deserialize)]
struct ReadingFields {
    raw: Option<String>,
    major: Option<u64>,
}

impl TryFrom<ReadingFields> for VersionReading {
    type Error = String;

    fn try_from(fields: ReadingFields) -> Result<Self, Self::Error> {
        match (fields.raw, fields.major) {
            (None, Some(major)) => Err(format!("major {major} given without a raw value")),
            (raw, major) => Ok(Self { raw, major }),
        }
    }
}

/// Manifest section that declared the type package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencySection {
    #[serde(rename = "dependencies")]
    Dependencies,
    #[serde(rename = "devDependencies")]
    DevDependencies,
}

impl DependencySection {
    /// The manifest key for this section.
    pub fn key(self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
        }
    }
}

/// The type-package side of the comparison, with where it was found.
///
/// `location` is diagnostic only and never influences the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypesReading {
    #[serde(flatten)]
    reading: VersionReading,
    location: Option<DependencySection>,
}

impl TypesReading {
    /// Not declared in any dependency section.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Declared in `location` as `raw`.
    pub fn declared(
        raw: impl Into<String>,
        major: Option<u64>,
        location: DependencySection,
    ) -> Self {
        Self {
            reading: VersionReading::declared(raw, major),
            location: Some(location),
        }
    }

    /// The raw specifier.
    pub fn raw(&self) -> Option<&str> {
        self.reading.raw()
    }

    /// The specifier's major version.
    pub fn major(&self) -> Option<u64> {
        self.reading.major()
    }

    /// The section the specifier came from.
    pub fn location(&self) -> Option<DependencySection> {
        self.location
    }
}

/// Result of reconciling one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutcome {
    /// Verdict.
    pub status: CheckStatus,
    /// Where the runtime version was read from.
    pub source: DeclarationSource,
    /// Declared runtime version.
    pub runtime_version: VersionReading,
    /// Declared type-package specifier.
    pub type_package_version: TypesReading,
    /// Human-readable explanation.
    pub message: String,
    /// Suggested remediation.
    pub fix: Option<String>,
}
