//! Runtime-version declaration sources.
//!
//! Every source yields the same [`VersionReading`], but they differ in
//! where the text lives and how it is normalized:
//!
//! | Source         | Storage                 | Normalization   |
//! |----------------|-------------------------|-----------------|
//! | `engines`      | `engines.node` field    | range minimum   |
//! | `volta`        | `volta.node` field      | exact specifier |
//! | `nvmrc`        | sibling `.nvmrc`        | exact specifier |
//! | `node-version` | sibling `.node-version` | exact specifier |

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::manifest::{load_manifest, string_field};
use super::outcome::VersionReading;
use crate::version::{major_of_specifier, min_major_of_range};

/// Where the project's Node.js version is declared.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationSource {
    /// `engines.node` in package.json
    #[default]
    Engines,
    /// `volta.node` in package.json
    Volta,
    /// `.nvmrc` next to package.json
    Nvmrc,
    /// `.node-version` next to package.json
    NodeVersion,
}

impl DeclarationSource {
    /// Every source, in selector order.
    pub const ALL: [DeclarationSource; 4] = [
        DeclarationSource::Engines,
        DeclarationSource::Volta,
        DeclarationSource::Nvmrc,
        DeclarationSource::NodeVersion,
    ];

    /// Name used in messages and reports.
    pub fn label(self) -> &'static str {
        match self {
            DeclarationSource::Engines => "engines.node",
            DeclarationSource::Volta => "volta.node",
            DeclarationSource::Nvmrc => ".nvmrc",
            DeclarationSource::NodeVersion => ".node-version",
        }
    }

    /// Selector value accepted on the command line.
    pub fn selector(self) -> &'static str {
        match self {
            DeclarationSource::Engines => "engines",
            DeclarationSource::Volta => "volta",
            DeclarationSource::Nvmrc => "nvmrc",
            DeclarationSource::NodeVersion => "node-version",
        }
    }

    /// Sibling file read by file-based sources.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            DeclarationSource::Nvmrc => Some(".nvmrc"),
            DeclarationSource::NodeVersion => Some(".node-version"),
            DeclarationSource::Engines | DeclarationSource::Volta => None,
        }
    }

    /// Snippet suggested when this source declares nothing.
    pub fn declaration_hint(self) -> Option<String> {
        match self {
            DeclarationSource::Engines => {
                Some(r#"Add "engines": { "node": ">=XX" } to your package.json."#.to_string())
            }
            _ => None,
        }
    }

    /// Read this source for the manifest at `manifest_path`.
    ///
    /// Never fails: a manifest or sibling file that cannot be read yields
    /// an absent reading.
    pub fn resolve(self, manifest_path: &Path) -> VersionReading {
        match self.file_name() {
            Some(file_name) => read_version_file(manifest_path, file_name),
            None => match load_manifest(manifest_path) {
                Ok(manifest) => self.resolve_in_manifest(&manifest),
                Err(err) => {
                    debug!(error = %err, "manifest unavailable for {}", self.label());
                    VersionReading::absent()
                }
            },
        }
    }

    /// Read this source given an already-parsed manifest.
    pub(crate) fn resolve_loaded(self, manifest_path: &Path, manifest: &Value) -> VersionReading {
        match self.file_name() {
            Some(file_name) => read_version_file(manifest_path, file_name),
            None => self.resolve_in_manifest(manifest),
        }
    }

    fn resolve_in_manifest(self, manifest: &Value) -> VersionReading {
        let raw = match self {
            DeclarationSource::Engines => string_field(manifest, "engines", "node"),
            DeclarationSource::Volta => string_field(manifest, "volta", "node"),
            DeclarationSource::Nvmrc | DeclarationSource::NodeVersion => None,
        };

        // engines declares a minimum, volta pins an exact version.
        match (self, raw) {
            (_, None) => VersionReading::absent(),
            (DeclarationSource::Engines, Some(raw)) => {
                VersionReading::declared(raw, min_major_of_range(raw))
            }
            (_, Some(raw)) => VersionReading::declared(raw, major_of_specifier(raw)),
        }
    }
}

impl fmt::Display for DeclarationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Read the runtime version declared by `source` for the manifest at
/// `manifest_path`.
pub fn resolve_runtime_version(manifest_path: &Path, source: DeclarationSource) -> VersionReading {
    source.resolve(manifest_path)
}

/// Read a one-token version file that sits next to the manifest.
fn read_version_file(manifest_path: &Path, file_name: &str) -> VersionReading {
    let dir = manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let path = dir.join(file_name);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "version file unreadable");
            return VersionReading::absent();
        }
    };

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return VersionReading::absent();
    }

    let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
    VersionReading::declared(trimmed, major_of_specifier(stripped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project(manifest: &str, files: &[(&str, &str)]) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let manifest_path = temp.path().join("package.json");
        fs::write(&manifest_path, manifest).unwrap();
        for (name, content) in files {
            fs::write(temp.path().join(name), content).unwrap();
        }
        (temp, manifest_path)
    }

    #[test]
    fn labels_and_selectors() {
        assert_eq!(DeclarationSource::Engines.label(), "engines.node");
        assert_eq!(DeclarationSource::Volta.label(), "volta.node");
        assert_eq!(DeclarationSource::Nvmrc.label(), ".nvmrc");
        assert_eq!(DeclarationSource::NodeVersion.label(), ".node-version");
        assert_eq!(DeclarationSource::NodeVersion.to_string(), "node-version");
    }

    #[test]
    fn default_source_is_engines() {
        assert_eq!(DeclarationSource::default(), DeclarationSource::Engines);
    }

    #[test]
    fn selectors_match_clap_names() {
        use clap::ValueEnum;
        for source in DeclarationSource::ALL {
            let value = source.to_possible_value().unwrap();
            assert_eq!(value.get_name(), source.selector());
        }
    }

    #[test]
    fn engines_uses_range_minimum() {
        let (_temp, path) = project(r#"{ "engines": { "node": ">=18 <22" } }"#, &[]);
        let reading = resolve_runtime_version(&path, DeclarationSource::Engines);
        assert_eq!(reading.raw(), Some(">=18 <22"));
        assert_eq!(reading.major(), Some(18));
    }

    #[test]
    fn volta_uses_specifier() {
        let (_temp, path) = project(r#"{ "volta": { "node": "20.11.1" } }"#, &[]);
        let reading = resolve_runtime_version(&path, DeclarationSource::Volta);
        assert_eq!(reading.raw(), Some("20.11.1"));
        assert_eq!(reading.major(), Some(20));
    }

    #[test]
    fn missing_field_is_absent() {
        let (_temp, path) = project(r#"{ "name": "demo" }"#, &[]);
        assert_eq!(
            resolve_runtime_version(&path, DeclarationSource::Engines),
            VersionReading::absent()
        );
        assert_eq!(
            resolve_runtime_version(&path, DeclarationSource::Volta),
            VersionReading::absent()
        );
    }

    #[test]
    fn non_string_field_is_absent() {
        let (_temp, path) = project(r#"{ "engines": { "node": 20 } }"#, &[]);
        assert!(!resolve_runtime_version(&path, DeclarationSource::Engines).is_declared());
    }

    #[test]
    fn malformed_manifest_is_absent() {
        let (_temp, path) = project("{ not json", &[]);
        assert_eq!(
            resolve_runtime_version(&path, DeclarationSource::Engines),
            VersionReading::absent()
        );
    }

    #[test]
    fn nvmrc_strips_leading_v() {
        let (_temp, path) = project("{}", &[(".nvmrc", "v20.11.0\n")]);
        let reading = resolve_runtime_version(&path, DeclarationSource::Nvmrc);
        assert_eq!(reading.raw(), Some("v20.11.0"));
        assert_eq!(reading.major(), Some(20));
    }

    #[test]
    fn node_version_file_is_read() {
        let (_temp, path) = project("{}", &[(".node-version", "22\n")]);
        let reading = resolve_runtime_version(&path, DeclarationSource::NodeVersion);
        assert_eq!(reading.raw(), Some("22"));
        assert_eq!(reading.major(), Some(22));
    }

    #[test]
    fn empty_version_file_is_absent() {
        let (_temp, path) = project("{}", &[(".nvmrc", "  \n")]);
        assert!(!resolve_runtime_version(&path, DeclarationSource::Nvmrc).is_declared());
    }

    #[test]
    fn missing_version_file_is_absent() {
        let (_temp, path) = project("{}", &[]);
        assert!(!resolve_runtime_version(&path, DeclarationSource::NodeVersion).is_declared());
    }

    #[test]
    fn alias_in_version_file_has_no_major() {
        let (_temp, path) = project("{}", &[(".nvmrc", "lts/iron")]);
        let reading = resolve_runtime_version(&path, DeclarationSource::Nvmrc);
        assert_eq!(reading.raw(), Some("lts/iron"));
        assert_eq!(reading.major(), None);
    }

    #[test]
    fn version_file_does_not_need_a_readable_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".nvmrc"), "18").unwrap();
        let path = temp.path().join("package.json");
        assert_eq!(
            resolve_runtime_version(&path, DeclarationSource::Nvmrc).major(),
            Some(18)
        );
    }

    #[test]
    fn only_engines_has_declaration_hint() {
        assert!(DeclarationSource::Engines.declaration_hint().is_some());
        assert!(DeclarationSource::Volta.declaration_hint().is_none());
        assert!(DeclarationSource::Nvmrc.declaration_hint().is_none());
    }
}
