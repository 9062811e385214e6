use std::fs;
use std::path::Path;

use cabinet_core::{ArcadeGameKind, GameEntry, LaunchMechanism};
use cabinet_sources::*;

// ── Steam ───────────────────────────────────────────────────────────────────

fn write_steam_manifest(library: &Path, app_id: &str, name: &str, install_dir: &str) {
    let content = format!(
        "\"AppState\"\n{{\n\t\"appid\"\t\t\"{app_id}\"\n\t\"name\"\t\t\"{name}\"\n\t\"installdir\"\t\t\"{install_dir}\"\n}}\n"
    );
    fs::write(
        library.join(format!("appmanifest_{app_id}.acf")),
        content,
    )
    .unwrap();
}

#[test]
fn steam_scans_all_library_folders() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("steam");
    let main_library = root.join("steamapps");
    fs::create_dir_all(&main_library).unwrap();

    let second = dir.path().join("second-library");
    let second_library = second.join("steamapps");
    fs::create_dir_all(&second_library).unwrap();

    let ledger = format!(
        "\"libraryfolders\"\n{{\n\t\"0\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n\t\"1\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n}}\n",
        root.display(),
        second.display()
    );
    fs::write(main_library.join("libraryfolders.vdf"), ledger).unwrap();

    write_steam_manifest(&main_library, "400", "Portal", "Portal");
    fs::create_dir_all(main_library.join("common").join("Portal")).unwrap();
    write_steam_manifest(&second_library, "620", "Portal 2", "Portal 2");

    let scanner = SteamScanner::with_roots(Box::new(EmptyKeyValueView), vec![root.clone()]);
    assert!(scanner.is_available());

    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 2);

    let portal = entries.iter().find(|e| e.id == "steam_400").unwrap();
    assert_eq!(portal.title, "Portal");
    assert_eq!(portal.platform, "Steam");
    assert_eq!(portal.launch_mechanism, LaunchMechanism::Steam);
    assert_eq!(portal.launcher_native_id, "400");
    assert!(portal.executable_path.ends_with("Portal"));

    // Portal 2's install dir was never created under common/, so only
    // the native id is recorded.
    let portal2 = entries.iter().find(|e| e.id == "steam_620").unwrap();
    assert_eq!(portal2.executable_path, "");
}

#[test]
fn steam_root_from_key_value_view() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("steam");
    fs::create_dir_all(root.join("steamapps")).unwrap();
    write_steam_manifest(&root.join("steamapps"), "10", "Counter-Strike", "");

    let kv = StaticKeyValueView::new().with_value(
        r"Software\Valve\Steam",
        "SteamPath",
        root.to_string_lossy(),
    );
    let scanner = SteamScanner::with_roots(Box::new(kv), Vec::new());

    assert!(scanner.is_available());
    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Counter-Strike");
}

#[test]
fn steam_duplicate_app_ids_collapse() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("steam");
    let main_library = root.join("steamapps");
    fs::create_dir_all(&main_library).unwrap();

    let second = dir.path().join("mirror");
    let second_library = second.join("steamapps");
    fs::create_dir_all(&second_library).unwrap();

    let ledger = format!(
        "\"libraryfolders\"\n{{\n\t\"0\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n}}\n",
        second.display()
    );
    fs::write(main_library.join("libraryfolders.vdf"), ledger).unwrap();

    write_steam_manifest(&main_library, "400", "Portal", "");
    write_steam_manifest(&second_library, "400", "Portal (copy)", "");

    let scanner = SteamScanner::with_roots(Box::new(EmptyKeyValueView), vec![root]);
    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Portal");
}

#[test]
fn steam_manifest_without_name_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("steam");
    let library = root.join("steamapps");
    fs::create_dir_all(&library).unwrap();

    fs::write(
        library.join("appmanifest_777.acf"),
        "\"AppState\"\n{\n\t\"appid\"\t\t\"777\"\n}\n",
    )
    .unwrap();
    write_steam_manifest(&library, "400", "Portal", "");

    let scanner = SteamScanner::with_roots(Box::new(EmptyKeyValueView), vec![root]);
    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "steam_400");
}

#[test]
fn steam_unavailable_without_root() {
    let scanner = SteamScanner::with_roots(Box::new(EmptyKeyValueView), Vec::new());
    assert!(!scanner.is_available());
    assert!(scanner.detect_installed().is_empty());
}

// ── GOG ─────────────────────────────────────────────────────────────────────

#[test]
fn gog_mirrored_keys_collapse_to_one_entry() {
    let kv = StaticKeyValueView::new()
        .with_value(
            r"Software\GOG.com\Games\1207658924",
            "gameName",
            "Cuphead",
        )
        .with_value(
            r"Software\WOW6432Node\GOG.com\Games\1207658924",
            "gameName",
            "Cuphead",
        )
        .with_value(
            r"Software\WOW6432Node\GOG.com\Games\1423049311",
            "gameName",
            "The Witcher 3",
        );

    let scanner = GogScanner::new(Box::new(kv));
    assert!(scanner.is_available());

    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 2);

    let cuphead = entries.iter().find(|e| e.id == "gog_1207658924").unwrap();
    assert_eq!(cuphead.title, "Cuphead");
    assert_eq!(cuphead.platform, "GOG");
    assert_eq!(cuphead.launch_mechanism, LaunchMechanism::Gog);
    assert_eq!(cuphead.launcher_native_id, "1207658924");
    assert!(entries.iter().any(|e| e.id == "gog_1423049311"));
}

#[test]
fn gog_key_without_name_is_dropped() {
    let kv = StaticKeyValueView::new()
        .with_value(r"Software\GOG.com\Games\111", "path", r"C:\Games\Mystery")
        .with_value(r"Software\GOG.com\Games\222", "gameName", "Known Game");

    let scanner = GogScanner::new(Box::new(kv));
    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "gog_222");
}

#[test]
fn gog_resolves_executable_when_it_exists() {
    let dir = tempfile::tempdir().unwrap();
    let install = dir.path().join("Cuphead");
    fs::create_dir_all(&install).unwrap();
    fs::write(install.join("Cuphead.exe"), b"").unwrap();

    let kv = StaticKeyValueView::new()
        .with_value(r"Software\GOG.com\Games\1", "gameName", "Cuphead")
        .with_value(
            r"Software\GOG.com\Games\1",
            "path",
            install.to_string_lossy(),
        )
        .with_value(r"Software\GOG.com\Games\1", "exePath", "Cuphead.exe");

    let scanner = GogScanner::new(Box::new(kv));
    let entries = scanner.detect_installed();
    assert!(entries[0].executable_path.ends_with("Cuphead.exe"));
}

#[test]
fn gog_falls_back_to_install_path_without_exe_path() {
    let kv = StaticKeyValueView::new()
        .with_value(r"Software\GOG.com\Games\1", "gameName", "Cuphead")
        .with_value(r"Software\GOG.com\Games\1", "path", r"C:\Games\Cuphead");

    let scanner = GogScanner::new(Box::new(kv));
    let entries = scanner.detect_installed();
    assert_eq!(entries[0].executable_path, r"C:\Games\Cuphead");
}

#[test]
fn gog_unavailable_with_empty_view() {
    let scanner = GogScanner::new(Box::new(EmptyKeyValueView));
    assert!(!scanner.is_available());
    assert!(scanner.detect_installed().is_empty());
}

// ── Epic ────────────────────────────────────────────────────────────────────

#[test]
fn epic_scans_manifest_directory() {
    let dir = tempfile::tempdir().unwrap();
    let manifests = dir.path().join("Manifests");
    fs::create_dir_all(&manifests).unwrap();

    fs::write(
        manifests.join("a.item"),
        r#"{"DisplayName": "Rocket League", "AppName": "Sugar"}"#,
    )
    .unwrap();
    fs::write(
        manifests.join("b.item"),
        r#"{"DisplayName": "No App Name"}"#,
    )
    .unwrap();
    fs::write(manifests.join("c.item"), "{broken").unwrap();
    // Same AppName again: first manifest wins.
    fs::write(
        manifests.join("d.item"),
        r#"{"DisplayName": "Rocket League (dup)", "AppName": "Sugar"}"#,
    )
    .unwrap();

    let scanner = EpicScanner::with_manifest_dirs(vec![manifests]);
    assert!(scanner.is_available());

    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "epic_Sugar");
    assert_eq!(entries[0].title, "Rocket League");
    assert_eq!(entries[0].launch_mechanism, LaunchMechanism::Epic);
}

#[test]
fn epic_unavailable_without_manifest_dir() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = EpicScanner::with_manifest_dirs(vec![dir.path().join("missing")]);
    assert!(!scanner.is_available());
    assert!(scanner.detect_installed().is_empty());
}

// ── TeknoParrot ─────────────────────────────────────────────────────────────

fn teknoparrot_root(dir: &Path) -> std::path::PathBuf {
    let root = dir.join("TeknoParrot");
    fs::create_dir_all(root.join("GameProfiles")).unwrap();
    fs::create_dir_all(root.join("Roms")).unwrap();
    root
}

#[test]
fn teknoparrot_requires_all_three_folders() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("TeknoParrot");
    fs::create_dir_all(root.join("GameProfiles")).unwrap();
    // No Roms folder.
    let scanner = TeknoParrotScanner::new(&root);
    assert!(!scanner.is_available());
    assert!(scanner.detect_installed().is_empty());
}

#[test]
fn teknoparrot_generates_profile_for_new_rom_folder() {
    let dir = tempfile::tempdir().unwrap();
    let root = teknoparrot_root(dir.path());
    let rom_folder = root.join("Roms").join("SpeedKing");
    fs::create_dir_all(&rom_folder).unwrap();
    fs::write(rom_folder.join("game.exe"), b"").unwrap();

    let scanner = TeknoParrotScanner::new(&root);
    assert!(scanner.is_available());

    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.id, "tp_SpeedKing");
    assert_eq!(entry.title, "SpeedKing");
    assert_eq!(entry.platform, "Arcade (TeknoParrot)");
    assert_eq!(entry.launch_mechanism, LaunchMechanism::TeknoParrot);
    assert!(entry.is_arcade);
    assert!(entry.executable_path.ends_with("game.exe"));
    assert!(entry.arcade_profile_path.ends_with("SpeedKing.xml"));

    let profile_path = root.join("GameProfiles").join("SpeedKing.xml");
    assert!(profile_path.exists());
    let profile = parse_profile(&profile_path).unwrap();
    assert!(profile.is_valid());
    assert_eq!(profile.game_name, "SpeedKing");
}

#[test]
fn teknoparrot_rom_folder_without_executable_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let root = teknoparrot_root(dir.path());
    let rom_folder = root.join("Roms").join("DataOnly");
    fs::create_dir_all(&rom_folder).unwrap();
    fs::write(rom_folder.join("readme.txt"), b"nothing to run").unwrap();

    let scanner = TeknoParrotScanner::new(&root);
    let entries = scanner.detect_installed();

    assert!(entries.is_empty());
    assert!(!root.join("GameProfiles").join("DataOnly.xml").exists());
}

#[test]
fn teknoparrot_keeps_existing_profile() {
    let dir = tempfile::tempdir().unwrap();
    let root = teknoparrot_root(dir.path());
    let rom_folder = root.join("Roms").join("SegaRally");
    fs::create_dir_all(&rom_folder).unwrap();
    fs::write(rom_folder.join("rally.exe"), b"").unwrap();

    let mut profile = GameProfile::generated("Sega Rally 3", "/custom/path/rally.exe", None);
    profile.kind = Some(ArcadeGameKind::Racing);
    let profile_path = root.join("GameProfiles").join("SegaRally.xml");
    write_profile(&profile, &profile_path).unwrap();

    let scanner = TeknoParrotScanner::new(&root);
    let entries = scanner.detect_installed();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Sega Rally 3");
    assert_eq!(entries[0].executable_path, "/custom/path/rally.exe");
    assert_eq!(entries[0].arcade_kind, ArcadeGameKind::Racing);
}

#[test]
fn teknoparrot_drops_foreign_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let root = teknoparrot_root(dir.path());

    fs::write(
        root.join("GameProfiles").join("Foreign.xml"),
        r#"<GameProfile>
  <GameName>Foreign Game</GameName>
  <GamePath>C:\foreign\game.exe</GamePath>
  <Launcher>SomeOtherFrontend</Launcher>
</GameProfile>"#,
    )
    .unwrap();
    fs::write(root.join("GameProfiles").join("Garbage.xml"), "<not-xml").unwrap();

    let scanner = TeknoParrotScanner::new(&root);
    assert!(scanner.detect_installed().is_empty());
}

#[test]
fn teknoparrot_parses_orphan_profiles_too() {
    // A profile with no matching ROM folder is still a valid entry.
    let dir = tempfile::tempdir().unwrap();
    let root = teknoparrot_root(dir.path());

    let profile = GameProfile::generated("Elsewhere", "/mnt/arcade/elsewhere.exe", None);
    write_profile(&profile, &root.join("GameProfiles").join("Elsewhere.xml")).unwrap();

    let scanner = TeknoParrotScanner::new(&root);
    let entries = scanner.detect_installed();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "tp_Elsewhere");
}

#[test]
fn executable_sweep_classifies_and_emits_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let root = teknoparrot_root(dir.path());
    let sweep = dir.path().join("sweep");
    fs::create_dir_all(&sweep).unwrap();
    fs::write(sweep.join("SpeedRacer.exe"), b"").unwrap();
    fs::write(sweep.join("DuckHunter.exe"), b"").unwrap();
    fs::write(sweep.join("notes.txt"), b"").unwrap();

    let profiles_out = dir.path().join("generated-profiles");
    let scanner = TeknoParrotScanner::new(&root);
    let entries = scanner.scan_executables(&sweep, &profiles_out);

    assert_eq!(entries.len(), 2);

    let racer = entries.iter().find(|e| e.id == "tp_SpeedRacer").unwrap();
    assert_eq!(racer.arcade_kind, ArcadeGameKind::Racing);
    let hunter = entries.iter().find(|e| e.id == "tp_DuckHunter").unwrap();
    assert_eq!(hunter.arcade_kind, ArcadeGameKind::Shooting);

    let racer_profile = parse_profile(&profiles_out.join("SpeedRacer.xml")).unwrap();
    assert_eq!(racer_profile.kind, Some(ArcadeGameKind::Racing));
    assert!(racer_profile.is_valid());
}

// ── Aggregation ─────────────────────────────────────────────────────────────

struct FixedSource {
    name: &'static str,
    available: bool,
    entries: Vec<GameEntry>,
}

impl GameSource for FixedSource {
    fn source_name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn detect_installed(&self) -> Vec<GameEntry> {
        self.entries.clone()
    }
}

#[test]
fn scan_all_collects_and_summarizes() {
    let first = FixedSource {
        name: "first",
        available: true,
        entries: vec![GameEntry::new("a_1", "One"), GameEntry::new("a_2", "Two")],
    };
    let second = FixedSource {
        name: "second",
        available: false,
        entries: vec![GameEntry::new("b_1", "Never scanned")],
    };

    let (entries, summaries) = scan_all([&first as &dyn GameSource, &second as &dyn GameSource]);

    assert_eq!(entries.len(), 2);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].source, "first");
    assert_eq!(summaries[0].entries, 2);
    assert!(!summaries[1].available);
    assert_eq!(summaries[1].entries, 0);
}
