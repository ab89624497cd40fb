//! package.json access.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::trace;

use super::outcome::{DependencySection, TypesReading};
use crate::error::{CheckError, Result};
use crate::version::major_of_specifier;

/// The Node.js type-definitions package.
pub const TYPES_PACKAGE: &str = "@types/node";

/// Manifest file name looked up inside a directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Sections searched for [`TYPES_PACKAGE`], highest precedence first.
const TYPES_SECTIONS: [DependencySection; 2] = [
    DependencySection::DevDependencies,
    DependencySection::Dependencies,
];

/// Resolve a user-supplied path to a manifest file.
///
/// A directory resolves to the `package.json` inside it; anything else is
/// taken as the manifest path itself.
pub fn manifest_path_for(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Read and parse the manifest at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or is
/// `null`. Other non-object values load fine and simply declare nothing.
pub fn load_manifest(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| CheckError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: Value =
        serde_json::from_str(&content).map_err(|source| CheckError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    if manifest.is_null() {
        return Err(CheckError::ManifestNull {
            path: path.to_path_buf(),
        });
    }

    trace!(path = %path.display(), "manifest loaded");
    Ok(manifest)
}

/// A non-empty string at `manifest[section][key]`.
///
/// Missing keys, non-string values, and empty strings all count as not
/// declared.
pub fn string_field<'a>(manifest: &'a Value, section: &str, key: &str) -> Option<&'a str> {
    manifest
        .get(section)?
        .get(key)?
        .as_str()
        .filter(|value| !value.is_empty())
}

/// Find the [`TYPES_PACKAGE`] specifier.
///
/// `devDependencies` wins over `dependencies` when both declare it.
pub fn resolve_type_package_version(manifest: &Value) -> TypesReading {
    TYPES_SECTIONS
        .into_iter()
        .find_map(|section| {
            string_field(manifest, section.key(), TYPES_PACKAGE)
                .map(|raw| TypesReading::declared(raw, major_of_specifier(raw), section))
        })
        .unwrap_or_else(TypesReading::absent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn finds_types_in_dev_dependencies() {
        let manifest = json!({ "devDependencies": { "@types/node": "^20.11.0" } });
        let reading = resolve_type_package_version(&manifest);
        assert_eq!(reading.raw(), Some("^20.11.0"));
        assert_eq!(reading.major(), Some(20));
        assert_eq!(reading.location(), Some(DependencySection::DevDependencies));
    }

    #[test]
    fn finds_types_in_dependencies() {
        let manifest = json!({ "dependencies": { "@types/node": "~18.19.0" } });
        let reading = resolve_type_package_version(&manifest);
        assert_eq!(reading.major(), Some(18));
        assert_eq!(reading.location(), Some(DependencySection::Dependencies));
    }

    #[test]
    fn dev_dependencies_take_precedence() {
        let manifest = json!({
            "dependencies": { "@types/node": "^22.0.0" },
            "devDependencies": { "@types/node": "^20.0.0" }
        });
        let reading = resolve_type_package_version(&manifest);
        assert_eq!(reading.raw(), Some("^20.0.0"));
        assert_eq!(reading.location(), Some(DependencySection::DevDependencies));
    }

    #[test]
    fn empty_dev_entry_falls_through() {
        let manifest = json!({
            "dependencies": { "@types/node": "^22.0.0" },
            "devDependencies": { "@types/node": "" }
        });
        let reading = resolve_type_package_version(&manifest);
        assert_eq!(reading.location(), Some(DependencySection::Dependencies));
    }

    #[test]
    fn missing_types_is_absent() {
        let manifest = json!({ "devDependencies": { "typescript": "^5.4.0" } });
        assert_eq!(resolve_type_package_version(&manifest), TypesReading::absent());
    }

    #[test]
    fn unconstrained_types_has_no_major() {
        let manifest = json!({ "devDependencies": { "@types/node": "latest" } });
        let reading = resolve_type_package_version(&manifest);
        assert_eq!(reading.raw(), Some("latest"));
        assert_eq!(reading.major(), None);
    }

    #[test]
    fn string_field_ignores_non_strings() {
        let manifest = json!({ "engines": { "node": 20 }, "volta": "nope" });
        assert_eq!(string_field(&manifest, "engines", "node"), None);
        assert_eq!(string_field(&manifest, "volta", "node"), None);
        assert_eq!(string_field(&manifest, "missing", "node"), None);
    }

    #[test]
    fn load_manifest_reports_missing_file() {
        let err = load_manifest(Path::new("/nonexistent/package.json")).unwrap_err();
        assert!(matches!(err, CheckError::ManifestRead { .. }));
    }

    #[test]
    fn load_manifest_reports_bad_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, "{ \"name\": ").unwrap();
        assert!(matches!(
            load_manifest(&path).unwrap_err(),
            CheckError::ManifestParse { .. }
        ));
    }

    #[test]
    fn load_manifest_rejects_null() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, "null").unwrap();
        assert!(matches!(
            load_manifest(&path).unwrap_err(),
            CheckError::ManifestNull { .. }
        ));
    }

    #[test]
    fn load_manifest_accepts_non_object_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        for content in ["[1, 2, 3]", "\"s\"", "42"] {
            fs::write(&path, content).unwrap();
            let manifest = load_manifest(&path).unwrap();
            assert_eq!(resolve_type_package_version(&manifest), TypesReading::absent());
        }
    }

    #[test]
    fn directory_resolves_to_package_json() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            manifest_path_for(temp.path()),
            temp.path().join("package.json")
        );
        let file = temp.path().join("custom.json");
        assert_eq!(manifest_path_for(&file), file);
    }
}
