//! TeknoParrot `GameProfile` descriptor documents.
//!
//! One XML file per game, living in the frontend's `GameProfiles`
//! folder. The scanner both reads pre-existing profiles and generates
//! minimal ones for ROM folders that lack them:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <GameProfile>
//!   <GameName>SegaRacingClassic</GameName>
//!   <GamePath>C:\TeknoParrot\Roms\SegaRacingClassic\game.exe</GamePath>
//!   <Launcher>TeknoParrot</Launcher>
//!   <InputProfile>Default</InputProfile>
//!   <RomPath>C:\TeknoParrot\Roms\SegaRacingClassic</RomPath>
//!   <InputConfig Kind="Racing">...</InputConfig>
//! </GameProfile>
//! ```
//!
//! `InputConfig` only appears in profiles generated by the executable
//! sweep, which knows the detected game kind.

use std::path::Path;

use cabinet_core::ArcadeGameKind;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// The launcher discriminant every valid profile must carry.
pub const LAUNCHER_NAME: &str = "TeknoParrot";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document's root element is not `GameProfile`.
    #[error("Not a game profile document: {0}")]
    NotAProfile(String),
}

/// An in-memory `GameProfile` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameProfile {
    pub game_name: String,
    pub game_path: String,
    pub launcher: String,
    pub input_profile: String,
    pub rom_path: Option<String>,
    /// Present in extended (sweep-generated) profiles.
    pub kind: Option<ArcadeGameKind>,
}

impl GameProfile {
    /// A minimal generated profile for an auto-detected game.
    pub fn generated(
        game_name: impl Into<String>,
        game_path: impl Into<String>,
        rom_path: Option<String>,
    ) -> Self {
        Self {
            game_name: game_name.into(),
            game_path: game_path.into(),
            launcher: LAUNCHER_NAME.to_string(),
            input_profile: "Default".to_string(),
            rom_path,
            kind: None,
        }
    }

    /// Whether the profile satisfies the scanner's acceptance rules:
    /// it belongs to this frontend and names both a game and a path.
    pub fn is_valid(&self) -> bool {
        self.launcher == LAUNCHER_NAME && !self.game_name.is_empty() && !self.game_path.is_empty()
    }
}

/// Parse a profile document from a file.
pub fn parse_profile(path: &Path) -> Result<GameProfile, ProfileError> {
    let content = std::fs::read_to_string(path)?;
    parse_profile_str(&content)
}

/// Parse a profile document from its XML text.
pub fn parse_profile_str(content: &str) -> Result<GameProfile, ProfileError> {
    let mut xml = Reader::from_str(content);
    xml.config_mut().trim_text(true);

    let mut profile = GameProfile::default();
    let mut saw_root = false;
    let mut current_tag = String::new();

    loop {
        match xml.read_event()? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !saw_root {
                    if tag_name != "GameProfile" {
                        return Err(ProfileError::NotAProfile(tag_name));
                    }
                    saw_root = true;
                    continue;
                }
                if tag_name == "InputConfig" {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == b"Kind" {
                            let value = String::from_utf8_lossy(&attr.value).to_string();
                            profile.kind = kind_from_label(&value);
                        }
                    }
                }
                current_tag = tag_name;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                match current_tag.as_str() {
                    "GameName" => profile.game_name = text,
                    "GamePath" => profile.game_path = text,
                    "Launcher" => profile.launcher = text,
                    "InputProfile" => profile.input_profile = text,
                    "RomPath" => profile.rom_path = Some(text),
                    _ => {}
                }
            }
            Event::End(_) => current_tag.clear(),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ProfileError::NotAProfile("<empty document>".to_string()));
    }

    Ok(profile)
}

/// Write a profile document, overwriting any existing file.
pub fn write_profile(profile: &GameProfile, path: &Path) -> Result<(), ProfileError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("GameProfile")))?;

    write_text_element(&mut writer, "GameName", &profile.game_name)?;
    write_text_element(&mut writer, "GamePath", &profile.game_path)?;
    write_text_element(&mut writer, "Launcher", &profile.launcher)?;
    write_text_element(&mut writer, "InputProfile", &profile.input_profile)?;
    if let Some(rom_path) = &profile.rom_path {
        write_text_element(&mut writer, "RomPath", rom_path)?;
    }
    if let Some(kind) = profile.kind {
        let mut config = BytesStart::new("InputConfig");
        config.push_attribute(("Kind", kind.label()));
        writer.write_event(Event::Start(config))?;
        for (action, binding) in default_bindings(kind) {
            write_text_element(&mut writer, action, binding)?;
        }
        writer.write_event(Event::End(BytesEnd::new("InputConfig")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("GameProfile")))?;

    std::fs::write(path, writer.into_inner())?;
    Ok(())
}

/// Check a profile file and list its problems, empty when clean.
///
/// A light sanity pass for the frontend's profile editor; the scanner's
/// own drop rules only use [`GameProfile::is_valid`].
pub fn validate_profile(path: &Path) -> Result<Vec<String>, ProfileError> {
    let profile = parse_profile(path)?;
    let mut problems = Vec::new();

    if profile.game_name.is_empty() {
        problems.push("GameName is missing or empty".to_string());
    }
    if profile.game_path.is_empty() {
        problems.push("GamePath is missing or empty".to_string());
    } else if !Path::new(&profile.game_path).exists() {
        problems.push(format!("GamePath does not exist: {}", profile.game_path));
    }
    if profile.launcher != LAUNCHER_NAME {
        problems.push(format!(
            "Launcher is '{}', expected '{LAUNCHER_NAME}'",
            profile.launcher
        ));
    }
    if let Some(rom_path) = &profile.rom_path {
        if !Path::new(rom_path).exists() {
            problems.push(format!("RomPath does not exist: {rom_path}"));
        }
    }

    Ok(problems)
}

/// Default input bindings written into extended profiles, per detected
/// game kind.
fn default_bindings(kind: ArcadeGameKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ArcadeGameKind::Racing => &[
            ("Steering", "Axis0"),
            ("Throttle", "Axis1"),
            ("Brake", "Axis2"),
        ],
        ArcadeGameKind::Shooting => &[
            ("AimX", "MouseX"),
            ("AimY", "MouseY"),
            ("Trigger", "MouseLeft"),
        ],
        ArcadeGameKind::Fighting => &[
            ("Punch", "Button0"),
            ("Kick", "Button1"),
            ("Guard", "Button2"),
        ],
        ArcadeGameKind::Sports => &[("Move", "Stick0"), ("Action", "Button0")],
        ArcadeGameKind::None | ArcadeGameKind::Other => {
            &[("Start", "Button9"), ("Coin", "Button8")]
        }
    }
}

fn kind_from_label(label: &str) -> Option<ArcadeGameKind> {
    match label {
        "Racing" => Some(ArcadeGameKind::Racing),
        "Shooting" => Some(ArcadeGameKind::Shooting),
        "Fighting" => Some(ArcadeGameKind::Fighting),
        "Sports" => Some(ArcadeGameKind::Sports),
        "Other" => Some(ArcadeGameKind::Other),
        _ => None,
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), ProfileError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
