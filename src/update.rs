//! Best-effort release check
//!
//! Compares the embedded manifest version against the latest published
//! release. Version strings are opaque tokens; any mismatch is reported as
//! an update. The check never fails hard — every error degrades to "nothing
//! to report" with a logged diagnostic, because the feature is advisory.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default release endpoint queried for the latest version.
pub const RELEASE_ENDPOINT: &str = "https://api.github.com/repos/hotshell/hotshell/releases/latest";

/// Build-time application manifest.
const MANIFEST: &str = include_str!("../manifest.json");

#[derive(Debug, thiserror::Error)]
enum UpdateError {
    #[error("manifest: {0}")]
    Manifest(String),

    #[error("http: {0}")]
    Http(String),
}

/// An available update, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub current_version: String,
    pub latest_version: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    info: ManifestInfo,
}

#[derive(Debug, Deserialize)]
struct ManifestInfo {
    #[serde(rename = "productVersion")]
    product_version: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Release {
    name: Option<String>,
    tag_name: String,
    html_url: String,
}

/// Checks the release endpoint against the embedded manifest version.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    endpoint: String,
    manifest: String,
}

impl Default for UpdateChecker {
    fn default() -> Self {
        Self::new(RELEASE_ENDPOINT)
    }
}

impl UpdateChecker {
    /// Create a checker against a specific release endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            manifest: MANIFEST.to_string(),
        }
    }

    #[cfg(test)]
    fn with_manifest(endpoint: impl Into<String>, manifest: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            manifest: manifest.into(),
        }
    }

    /// Report an available update, or `None`.
    ///
    /// "No update available" and "check failed" are indistinguishable to
    /// callers on purpose.
    pub fn check_for_update(&self) -> Option<UpdateInfo> {
        match self.try_check() {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, "update check failed");
                None
            }
        }
    }

    fn try_check(&self) -> Result<Option<UpdateInfo>, UpdateError> {
        let current = manifest_version(&self.manifest)?;
        let release = fetch_release(&self.endpoint)?;
        Ok(outcome(current, release))
    }
}

fn manifest_version(raw: &str) -> Result<String, UpdateError> {
    serde_json::from_str::<Manifest>(raw)
        .map(|manifest| manifest.info.product_version)
        .map_err(|err| UpdateError::Manifest(err.to_string()))
}

fn fetch_release(url: &str) -> Result<Release, UpdateError> {
    let response = ureq::get(url)
        .set("User-Agent", "hotshell-updater")
        .set("Accept", "application/vnd.github+json")
        .call()
        .map_err(|err| UpdateError::Http(err.to_string()))?;
    response
        .into_json::<Release>()
        .map_err(|err| UpdateError::Http(err.to_string()))
}

fn outcome(current: String, release: Release) -> Option<UpdateInfo> {
    if release.tag_name == current {
        return None;
    }
    Some(UpdateInfo {
        name: release.name.clone().unwrap_or_else(|| release.tag_name.clone()),
        url: release.html_url,
        latest_version: release.tag_name,
        current_version: current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str) -> Release {
        Release {
            name: Some(format!("Release {tag}")),
            tag_name: tag.to_string(),
            html_url: format!("https://example.invalid/releases/{tag}"),
        }
    }

    #[test]
    fn test_embedded_manifest_parses() {
        let version = manifest_version(MANIFEST).unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_equal_versions_mean_no_update() {
        assert_eq!(outcome("1.2.0".to_string(), release("1.2.0")), None);
    }

    #[test]
    fn test_different_version_reports_update() {
        let info = outcome("1.2.0".to_string(), release("1.3.0")).unwrap();
        assert_eq!(info.current_version, "1.2.0");
        assert_eq!(info.latest_version, "1.3.0");
        assert_eq!(info.name, "Release 1.3.0");
    }

    #[test]
    fn test_versions_are_opaque_tokens() {
        // Even a "downgrade" counts as different, by design
        assert!(outcome("2.0.0".to_string(), release("1.0.0")).is_some());
    }

    #[test]
    fn test_missing_release_name_falls_back_to_tag() {
        let release = Release {
            name: None,
            tag_name: "v9".to_string(),
            html_url: "https://example.invalid/v9".to_string(),
        };
        let info = outcome("v1".to_string(), release).unwrap();
        assert_eq!(info.name, "v9");
    }

    #[test]
    fn test_malformed_manifest_degrades_to_none() {
        let checker = UpdateChecker::with_manifest("http://127.0.0.1:1", "not json");
        assert_eq!(checker.check_for_update(), None);
    }

    #[test]
    fn test_unreachable_endpoint_degrades_to_none() {
        // Nothing listens on this port; the failure must stay internal
        let checker = UpdateChecker::new("http://127.0.0.1:1/releases/latest");
        assert_eq!(checker.check_for_update(), None);
    }

    #[test]
    fn test_release_shape_parses() {
        let json = r#"
        {
          "name": "hotshell 0.2.0",
          "tag_name": "0.2.0",
          "html_url": "https://example.invalid/releases/0.2.0",
          "prerelease": false
        }"#;
        let parsed: Release = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tag_name, "0.2.0");
        assert_eq!(parsed.name.as_deref(), Some("hotshell 0.2.0"));
    }

    #[test]
    fn test_update_info_serializes_camel_case() {
        let info = UpdateInfo {
            current_version: "1.0.0".to_string(),
            latest_version: "1.1.0".to_string(),
            name: "x".to_string(),
            url: "y".to_string(),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("currentVersion"));
        assert!(json.contains("latestVersion"));
    }
}
