//! Steam scanner: install-root discovery, library-folder enumeration,
//! and app-manifest parsing.

use std::path::{Path, PathBuf};

use cabinet_core::{GameEntry, LaunchMechanism};

use crate::kv::KeyValueView;
use crate::ledger::{self, AppManifest};
use crate::source::{dedup_first_wins, GameSource};

const STEAM_KEY: &str = r"Software\Valve\Steam";

/// Detects games installed through Steam.
///
/// The install root comes from the key/value view (`SteamPath`) with a
/// conventional-path fallback; a root counts only if it has a
/// `steamapps` directory. Every library folder listed in
/// `libraryfolders.vdf` is scanned for `appmanifest_*.acf` descriptors.
pub struct SteamScanner {
    kv: Box<dyn KeyValueView>,
    candidate_roots: Vec<PathBuf>,
}

impl SteamScanner {
    pub fn new(kv: Box<dyn KeyValueView>) -> Self {
        Self::with_roots(kv, default_roots())
    }

    /// Override the conventional install-path list (tests, portable
    /// installs).
    pub fn with_roots(kv: Box<dyn KeyValueView>, candidate_roots: Vec<PathBuf>) -> Self {
        Self {
            kv,
            candidate_roots,
        }
    }

    fn install_root(&self) -> Option<PathBuf> {
        if let Some(path) = self.kv.string_value(STEAM_KEY, "SteamPath") {
            let path = PathBuf::from(path);
            if path.join("steamapps").is_dir() {
                return Some(path);
            }
        }
        self.candidate_roots
            .iter()
            .find(|root| root.join("steamapps").is_dir())
            .cloned()
    }

    /// The root's own `steamapps` plus every ledger-listed library whose
    /// `steamapps` directory exists, deduplicated in listing order.
    fn library_folders(&self, root: &Path) -> Vec<PathBuf> {
        let mut folders = vec![root.join("steamapps")];

        let ledger_path = root.join("steamapps").join("libraryfolders.vdf");
        match std::fs::read_to_string(&ledger_path) {
            Ok(content) => {
                for path in ledger::parse_library_paths(&content) {
                    let steamapps = PathBuf::from(path).join("steamapps");
                    if steamapps.is_dir() && !folders.contains(&steamapps) {
                        folders.push(steamapps);
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                log::warn!("failed to read {}: {err}", ledger_path.display());
            }
        }

        folders
    }
}

impl GameSource for SteamScanner {
    fn source_name(&self) -> &'static str {
        "steam"
    }

    fn is_available(&self) -> bool {
        self.install_root().is_some()
    }

    fn detect_installed(&self) -> Vec<GameEntry> {
        let Some(root) = self.install_root() else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for folder in self.library_folders(&root) {
            scan_library_folder(&folder, &mut entries);
        }
        dedup_first_wins(entries)
    }
}

fn scan_library_folder(folder: &Path, entries: &mut Vec<GameEntry>) {
    let read_dir = match std::fs::read_dir(folder) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            log::warn!("failed to scan library folder {}: {err}", folder.display());
            return;
        }
    };

    let mut manifests: Vec<PathBuf> = read_dir
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_app_manifest(path))
        .collect();
    manifests.sort();

    for path in manifests {
        match std::fs::read_to_string(&path) {
            Ok(content) => match ledger::parse_app_manifest(&content) {
                Some(manifest) => entries.push(entry_from_manifest(folder, &manifest)),
                None => {
                    log::warn!("manifest {} has no appid or name, skipping", path.display());
                }
            },
            Err(err) => {
                log::warn!("failed to read manifest {}: {err}", path.display());
            }
        }
    }
}

fn is_app_manifest(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("appmanifest_") && name.ends_with(".acf"))
}

fn entry_from_manifest(library_folder: &Path, manifest: &AppManifest) -> GameEntry {
    let mut entry = GameEntry::new(
        format!("steam_{}", manifest.app_id),
        manifest.name.as_str(),
    );
    entry.platform = "Steam".to_string();
    entry.launch_mechanism = LaunchMechanism::Steam;
    entry.launcher_native_id = manifest.app_id.clone();

    if !manifest.install_dir.is_empty() {
        let install = library_folder.join("common").join(&manifest.install_dir);
        if install.is_dir() {
            entry.executable_path = install.to_string_lossy().into_owned();
        }
    }

    entry
}

fn default_roots() -> Vec<PathBuf> {
    let mut roots = vec![
        PathBuf::from(r"C:\Program Files (x86)\Steam"),
        PathBuf::from(r"C:\Program Files\Steam"),
    ];
    if let Some(data) = dirs::data_dir() {
        roots.push(data.join("Steam"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".steam").join("steam"));
    }
    roots
}
