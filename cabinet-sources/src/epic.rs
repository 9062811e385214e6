//! Epic Games Launcher scanner: one JSON `.item` manifest per installed
//! game in the launcher's application-data folder.

use std::path::{Path, PathBuf};

use cabinet_core::{GameEntry, LaunchMechanism};
use serde::Deserialize;

use crate::source::{dedup_first_wins, GameSource};

/// Detects games installed through the Epic Games Launcher.
pub struct EpicScanner {
    manifest_dirs: Vec<PathBuf>,
}

impl EpicScanner {
    pub fn new() -> Self {
        Self::with_manifest_dirs(default_manifest_dirs())
    }

    /// Override the candidate manifest directories (tests, nonstandard
    /// installs).
    pub fn with_manifest_dirs(manifest_dirs: Vec<PathBuf>) -> Self {
        Self { manifest_dirs }
    }

    fn manifest_dir(&self) -> Option<&Path> {
        self.manifest_dirs
            .iter()
            .map(PathBuf::as_path)
            .find(|dir| dir.is_dir())
    }
}

impl Default for EpicScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSource for EpicScanner {
    fn source_name(&self) -> &'static str {
        "epic"
    }

    fn is_available(&self) -> bool {
        self.manifest_dir().is_some()
    }

    fn detect_installed(&self) -> Vec<GameEntry> {
        let Some(dir) = self.manifest_dir() else {
            return Vec::new();
        };

        let read_dir = match std::fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(err) => {
                log::warn!("failed to scan Epic manifests {}: {err}", dir.display());
                return Vec::new();
            }
        };

        let mut manifests: Vec<PathBuf> = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("item"))
            })
            .collect();
        manifests.sort();

        let mut entries = Vec::new();
        for path in manifests {
            if let Some(entry) = parse_manifest_file(&path) {
                entries.push(entry);
            }
        }
        dedup_first_wins(entries)
    }
}

/// Shape of an Epic `.item` manifest, reduced to the fields the catalog
/// cares about.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ItemManifest {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    app_name: Option<String>,
    #[serde(default)]
    install_location: Option<String>,
    #[serde(default)]
    launch_executable: Option<String>,
}

fn parse_manifest_file(path: &Path) -> Option<GameEntry> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            log::warn!("failed to read manifest {}: {err}", path.display());
            return None;
        }
    };

    let manifest: ItemManifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(err) => {
            log::warn!("failed to parse manifest {}: {err}", path.display());
            return None;
        }
    };

    let (Some(display_name), Some(app_name)) = (&manifest.display_name, &manifest.app_name) else {
        log::debug!(
            "manifest {} has no DisplayName or AppName, skipping",
            path.display()
        );
        return None;
    };
    if display_name.is_empty() || app_name.is_empty() {
        log::debug!(
            "manifest {} has no DisplayName or AppName, skipping",
            path.display()
        );
        return None;
    }

    let mut entry = GameEntry::new(format!("epic_{app_name}"), display_name.as_str());
    entry.platform = "Epic Games".to_string();
    entry.launch_mechanism = LaunchMechanism::Epic;
    entry.launcher_native_id = app_name.clone();

    match (&manifest.install_location, &manifest.launch_executable) {
        (Some(location), Some(executable)) if !location.is_empty() && !executable.is_empty() => {
            let full = Path::new(location).join(executable);
            if full.is_file() {
                entry.executable_path = full.to_string_lossy().into_owned();
            }
        }
        (Some(location), _) if !location.is_empty() => {
            entry.executable_path = location.clone();
        }
        _ => {}
    }

    Some(entry)
}

fn default_manifest_dirs() -> Vec<PathBuf> {
    let mut bases = vec![PathBuf::from(r"C:\ProgramData")];
    if let Some(data) = dirs::data_dir() {
        bases.push(data);
    }
    bases
        .into_iter()
        .map(|base| {
            base.join("Epic")
                .join("EpicGamesLauncher")
                .join("Data")
                .join("Manifests")
        })
        .collect()
}
