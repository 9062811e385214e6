//! GOG Galaxy scanner: games are registered in a registry-like store
//! rather than manifest files.

use std::path::{Path, PathBuf};

use cabinet_core::{GameEntry, LaunchMechanism};

use crate::kv::KeyValueView;
use crate::source::{dedup_first_wins, GameSource};

const CLIENT_KEY: &str = r"Software\GOG.com\GalaxyClient\paths";

/// Detects games registered by GOG Galaxy.
///
/// Both the native games key and the 32-bit `WOW6432Node` mirror are
/// enumerated; a game present in both views collapses to one entry by
/// its derived id (first view wins).
pub struct GogScanner {
    kv: Box<dyn KeyValueView>,
    games_keys: Vec<String>,
    candidate_roots: Vec<PathBuf>,
}

impl GogScanner {
    pub fn new(kv: Box<dyn KeyValueView>) -> Self {
        Self {
            kv,
            games_keys: vec![
                r"Software\GOG.com\Games".to_string(),
                r"Software\WOW6432Node\GOG.com\Games".to_string(),
            ],
            candidate_roots: vec![
                PathBuf::from(r"C:\Program Files (x86)\GOG Galaxy"),
                PathBuf::from(r"C:\Program Files\GOG Galaxy"),
            ],
        }
    }

    fn client_root(&self) -> Option<PathBuf> {
        if let Some(path) = self.kv.string_value(CLIENT_KEY, "client") {
            let path = PathBuf::from(path);
            if path.is_dir() {
                return Some(path);
            }
        }
        self.candidate_roots
            .iter()
            .find(|root| root.is_dir())
            .cloned()
    }
}

impl GameSource for GogScanner {
    fn source_name(&self) -> &'static str {
        "gog"
    }

    fn is_available(&self) -> bool {
        self.client_root().is_some()
            || self
                .games_keys
                .iter()
                .any(|key| !self.kv.subkeys(key).is_empty())
    }

    fn detect_installed(&self) -> Vec<GameEntry> {
        let mut entries = Vec::new();

        for games_key in &self.games_keys {
            for subkey in self.kv.subkeys(games_key) {
                match parse_game_key(self.kv.as_ref(), games_key, &subkey) {
                    Some(entry) => entries.push(entry),
                    None => {
                        log::warn!("GOG game key {subkey} has no gameName, skipping");
                    }
                }
            }
        }

        dedup_first_wins(entries)
    }
}

fn parse_game_key(kv: &dyn KeyValueView, games_key: &str, game_id: &str) -> Option<GameEntry> {
    let key = format!("{games_key}\\{game_id}");
    let name = kv.string_value(&key, "gameName")?;
    let path = kv.string_value(&key, "path");
    let exe_path = kv.string_value(&key, "exePath");

    let mut entry = GameEntry::new(format!("gog_{game_id}"), name);
    entry.platform = "GOG".to_string();
    entry.launch_mechanism = LaunchMechanism::Gog;
    entry.launcher_native_id = game_id.to_string();

    // The full executable is preferred but only when it actually exists;
    // otherwise the install directory alone still lets the dispatcher
    // fall back to the Galaxy URI.
    match (&path, &exe_path) {
        (Some(path), Some(exe_path)) => {
            let full = Path::new(path).join(exe_path);
            if full.is_file() {
                entry.executable_path = full.to_string_lossy().into_owned();
            }
        }
        (Some(path), None) => {
            entry.executable_path = path.clone();
        }
        _ => {}
    }

    Some(entry)
}
