//! Reconciliation of `@types/node` against the declared Node.js version.
//!
//! [`reconcile`] reads the manifest, resolves both sides of the
//! comparison, and classifies them into a [`ReconciliationOutcome`]. It
//! never returns an error: unreadable manifests, missing fields, and
//! unparseable values all become [`CheckStatus::Warning`] outcomes.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use check_node_types::checker::{reconcile, CheckStatus, DeclarationSource};
//!
//! let outcome = reconcile(Path::new("package.json"), DeclarationSource::Engines);
//! if outcome.status == CheckStatus::Fail {
//!     println!("{}", outcome.fix.unwrap_or_default());
//! }
//! ```

pub mod manifest;
pub mod outcome;
pub mod source;

pub use manifest::{
    load_manifest, manifest_path_for, resolve_type_package_version, MANIFEST_FILE, TYPES_PACKAGE,
};
pub use outcome::{
    CheckStatus, DependencySection, ReconciliationOutcome, TypesReading, VersionReading,
};
pub use source::{resolve_runtime_version, DeclarationSource};

use std::path::Path;

use tracing::debug;

/// Install command pinning the type package to `major`.
pub fn install_command(major: u64) -> String {
    format!("npm install -D {TYPES_PACKAGE}@^{major}")
}

/// Check the manifest at `manifest_path` using `source` for the runtime
/// version.
pub fn reconcile(manifest_path: &Path, source: DeclarationSource) -> ReconciliationOutcome {
    debug!(path = %manifest_path.display(), %source, "reconciling");

    let manifest = match load_manifest(manifest_path) {
        Ok(manifest) => manifest,
        Err(err) => {
            debug!(error = %err, "manifest unusable");
            return ReconciliationOutcome {
                status: CheckStatus::Warning,
                source,
                runtime_version: VersionReading::absent(),
                type_package_version: TypesReading::absent(),
                message: format!("Could not read or parse {}", manifest_path.display()),
                fix: None,
            };
        }
    };

    let runtime = source.resolve_loaded(manifest_path, &manifest);
    let types = resolve_type_package_version(&manifest);
    debug!(
        runtime = ?runtime.raw(),
        runtime_major = ?runtime.major(),
        types = ?types.raw(),
        types_major = ?types.major(),
        location = ?types.location(),
        "resolved declarations"
    );

    classify(source, runtime, types)
}

/// Apply the decision table to resolved readings. First matching row wins.
pub fn classify(
    source: DeclarationSource,
    runtime: VersionReading,
    types: TypesReading,
) -> ReconciliationOutcome {
    use CheckStatus::{Fail, Pass, Warning};

    let label = source.label();
    let (status, message, fix) = match (
        runtime.raw(),
        runtime.major(),
        types.raw(),
        types.major(),
    ) {
        (None, _, None, _) => (
            Warning,
            format!("Neither {label} nor {TYPES_PACKAGE} found."),
            None,
        ),
        (None, _, Some(_), _) => (
            Warning,
            format!("No {label} found. Cannot verify {TYPES_PACKAGE} compatibility."),
            source.declaration_hint(),
        ),
        (Some(_), runtime_major, None, _) => (
            Warning,
            format!("{TYPES_PACKAGE} is not installed. Cannot verify compatibility."),
            runtime_major.map(install_command),
        ),
        (Some(raw), None, Some(_), _) => (
            Warning,
            format!("Could not parse version from {label}: \"{raw}\""),
            None,
        ),
        (Some(_), Some(_), Some(raw), None) => (
            Warning,
            format!("Could not parse major version from {TYPES_PACKAGE}: \"{raw}\""),
            None,
        ),
        (Some(_), Some(runtime_major), Some(_), Some(types_major))
            if runtime_major == types_major =>
        {
            (
                Pass,
                format!(
                    "{TYPES_PACKAGE} major ({types_major}) matches {label} major ({runtime_major})."
                ),
                None,
            )
        }
        (Some(_), Some(runtime_major), Some(_), Some(types_major)) => (
            Fail,
            format!(
                "{TYPES_PACKAGE} major ({types_major}) does not match {label} major ({runtime_major})."
            ),
            Some(install_command(runtime_major)),
        ),
    };

    debug!(?status, "classified");
    ReconciliationOutcome {
        status,
        source,
        runtime_version: runtime,
        type_package_version: types,
        message,
        fix,
    }
}
