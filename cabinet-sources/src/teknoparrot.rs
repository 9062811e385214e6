//! TeknoParrot scanner: profile-driven arcade games.
//!
//! The frontend keeps one `GameProfiles/<name>.xml` descriptor per game
//! and a `Roms/<name>/` folder holding the game itself. ROM folders
//! without a descriptor get a minimal one generated during the scan, so
//! a freshly dropped-in game shows up in the library without manual
//! setup.

use std::path::{Path, PathBuf};

use cabinet_core::{ArcadeGameKind, GameEntry, LaunchMechanism};

use crate::profile::{parse_profile, write_profile, GameProfile};
use crate::source::{dedup_first_wins, GameSource};

pub struct TeknoParrotScanner {
    root: PathBuf,
}

impl TeknoParrotScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The conventional install location.
    pub fn default_install() -> Self {
        Self::new(r"C:\TeknoParrot")
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("GameProfiles")
    }

    fn roms_dir(&self) -> PathBuf {
        self.root.join("Roms")
    }

    /// Secondary mode: sweep an arbitrary folder for game executables,
    /// classify each by filename, and emit one extended profile per
    /// executable into `profiles_out`. Returns the corresponding
    /// entries.
    pub fn scan_executables(&self, folder: &Path, profiles_out: &Path) -> Vec<GameEntry> {
        if let Err(err) = std::fs::create_dir_all(profiles_out) {
            log::warn!(
                "failed to create profile folder {}: {err}",
                profiles_out.display()
            );
            return Vec::new();
        }

        let mut executables = Vec::new();
        collect_executables(folder, &mut executables);

        let mut entries = Vec::new();
        for exe in executables {
            let Some(stem) = exe.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let kind = classify_kind(stem);

            let mut profile = GameProfile::generated(
                stem,
                exe.to_string_lossy().into_owned(),
                exe.parent().map(|dir| dir.to_string_lossy().into_owned()),
            );
            profile.kind = Some(kind);

            let profile_path = profiles_out.join(format!("{stem}.xml"));
            if let Err(err) = write_profile(&profile, &profile_path) {
                log::warn!(
                    "failed to write profile {}: {err}",
                    profile_path.display()
                );
                continue;
            }

            entries.push(entry_from_profile(&profile, &profile_path));
        }

        dedup_first_wins(entries)
    }

    /// Generate a minimal profile for every ROM folder that lacks one.
    fn generate_missing_profiles(&self) {
        let profiles_dir = self.profiles_dir();

        for rom_folder in sorted_subdirs(&self.roms_dir()) {
            let Some(name) = rom_folder.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let profile_path = profiles_dir.join(format!("{name}.xml"));
            if profile_path.exists() {
                continue;
            }

            let Some(exe) = first_executable(&rom_folder) else {
                log::warn!(
                    "no executable found in {}, skipping profile generation",
                    rom_folder.display()
                );
                continue;
            };

            log::debug!("generating profile for {name}");
            let profile = GameProfile::generated(
                name,
                exe.to_string_lossy().into_owned(),
                Some(rom_folder.to_string_lossy().into_owned()),
            );
            if let Err(err) = write_profile(&profile, &profile_path) {
                log::warn!(
                    "failed to write profile {}: {err}",
                    profile_path.display()
                );
            }
        }
    }
}

impl GameSource for TeknoParrotScanner {
    fn source_name(&self) -> &'static str {
        "teknoparrot"
    }

    fn is_available(&self) -> bool {
        self.root.is_dir() && self.profiles_dir().is_dir() && self.roms_dir().is_dir()
    }

    fn detect_installed(&self) -> Vec<GameEntry> {
        if !self.is_available() {
            return Vec::new();
        }

        self.generate_missing_profiles();

        let mut entries = Vec::new();
        for profile_path in sorted_profiles(&self.profiles_dir()) {
            match parse_profile(&profile_path) {
                Ok(profile) if profile.is_valid() => {
                    entries.push(entry_from_profile(&profile, &profile_path));
                }
                Ok(_) => {
                    log::warn!(
                        "profile {} failed validation, skipping",
                        profile_path.display()
                    );
                }
                Err(err) => {
                    log::warn!("failed to parse profile {}: {err}", profile_path.display());
                }
            }
        }
        dedup_first_wins(entries)
    }
}

fn entry_from_profile(profile: &GameProfile, profile_path: &Path) -> GameEntry {
    let stem = profile_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| profile.game_name.clone());

    let mut entry = GameEntry::new(format!("tp_{stem}"), profile.game_name.as_str());
    entry.platform = "Arcade (TeknoParrot)".to_string();
    entry.launch_mechanism = LaunchMechanism::TeknoParrot;
    entry.executable_path = profile.game_path.clone();
    entry.rom_path = profile.rom_path.clone().unwrap_or_default();
    entry.is_arcade = true;
    entry.arcade_profile_path = profile_path.to_string_lossy().into_owned();
    entry.arcade_kind = profile.kind.unwrap_or_default();
    entry
}

/// Classify a game by keywords in its executable or folder name.
pub fn classify_kind(name: &str) -> ArcadeGameKind {
    const RACING: &[&str] = &[
        "race", "racing", "rally", "drift", "kart", "daytona", "outrun", "speed", "wangan",
    ];
    const SHOOTING: &[&str] = &[
        "gun", "shoot", "shot", "hunt", "sniper", "strike", "invad",
    ];
    const FIGHTING: &[&str] = &["fight", "versus", "brawl", "combat", "tekken"];
    const SPORTS: &[&str] = &[
        "soccer", "football", "basket", "tennis", "golf", "hockey", "baseball", "bowl",
    ];

    let lowered = name.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if matches(RACING) {
        ArcadeGameKind::Racing
    } else if matches(SHOOTING) {
        ArcadeGameKind::Shooting
    } else if matches(FIGHTING) {
        ArcadeGameKind::Fighting
    } else if matches(SPORTS) {
        ArcadeGameKind::Sports
    } else {
        ArcadeGameKind::Other
    }
}

fn sorted_subdirs(folder: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = std::fs::read_dir(folder) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = read_dir
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn sorted_profiles(folder: &Path) -> Vec<PathBuf> {
    let Ok(read_dir) = std::fs::read_dir(folder) else {
        return Vec::new();
    };
    let mut profiles: Vec<PathBuf> = read_dir
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    profiles.sort();
    profiles
}

/// First `.exe` inside a folder: files at each level win over
/// subfolders, both visited in sorted order for determinism.
fn first_executable(folder: &Path) -> Option<PathBuf> {
    let mut found = Vec::new();
    collect_executables(folder, &mut found);
    found.into_iter().next()
}

fn collect_executables(folder: &Path, found: &mut Vec<PathBuf>) {
    let Ok(read_dir) = std::fs::read_dir(folder) else {
        return;
    };
    let mut paths: Vec<PathBuf> = read_dir.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in &paths {
        if path.is_file() && is_executable(path) {
            found.push(path.clone());
        }
    }
    for path in &paths {
        if path.is_dir() {
            collect_executables(path, found);
        }
    }
}

fn is_executable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_filename_keywords() {
        assert_eq!(classify_kind("SpeedRacerDeluxe"), ArcadeGameKind::Racing);
        assert_eq!(classify_kind("house_of_guns"), ArcadeGameKind::Shooting);
        assert_eq!(classify_kind("StreetFighterV"), ArcadeGameKind::Fighting);
        assert_eq!(classify_kind("WorldSoccer2020"), ArcadeGameKind::Sports);
        assert_eq!(classify_kind("PuzzleBobble"), ArcadeGameKind::Other);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_kind("DAYTONA3"), ArcadeGameKind::Racing);
    }
}
