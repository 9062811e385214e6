//! The canonical library entry and its enumerations.
//!
//! A [`GameEntry`] is one row of the catalog: scanners produce them,
//! the store persists them whole, and the dispatcher reads them back to
//! decide how a launch request turns into an external invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a library entry gets started.
///
/// This is the discriminant of the dispatch table: each variant maps to
/// exactly one invocation protocol. The set is closed — adding a source
/// means adding a variant, a scanner, and a dispatch arm together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchMechanism {
    /// Spawn an emulator executable with the ROM path as first argument.
    Emulator,
    /// Hand off to the Steam client via `steam://rungameid/`.
    Steam,
    /// Hand off to GOG Galaxy via `goggalaxy://openGameView/`.
    Gog,
    /// Hand off to the Epic launcher via `com.epicgames.launcher://`.
    Epic,
    /// Spawn the TeknoParrot frontend with a `--profile=` argument.
    TeknoParrot,
    /// Spawn the game executable directly.
    Standalone,
}

impl LaunchMechanism {
    /// Fixed integer code used in the persistence layer.
    pub const fn code(self) -> i64 {
        match self {
            LaunchMechanism::Emulator => 0,
            LaunchMechanism::Steam => 1,
            LaunchMechanism::Gog => 2,
            LaunchMechanism::Epic => 3,
            LaunchMechanism::TeknoParrot => 4,
            LaunchMechanism::Standalone => 5,
        }
    }

    /// Decode a persisted code. `None` for codes no release ever wrote.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(LaunchMechanism::Emulator),
            1 => Some(LaunchMechanism::Steam),
            2 => Some(LaunchMechanism::Gog),
            3 => Some(LaunchMechanism::Epic),
            4 => Some(LaunchMechanism::TeknoParrot),
            5 => Some(LaunchMechanism::Standalone),
            _ => None,
        }
    }
}

/// How far the player has gotten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Mastered,
}

impl CompletionStatus {
    pub const fn code(self) -> i64 {
        match self {
            CompletionStatus::NotStarted => 0,
            CompletionStatus::InProgress => 1,
            CompletionStatus::Completed => 2,
            CompletionStatus::Mastered => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CompletionStatus::NotStarted),
            1 => Some(CompletionStatus::InProgress),
            2 => Some(CompletionStatus::Completed),
            3 => Some(CompletionStatus::Mastered),
            _ => None,
        }
    }
}

/// Category an arcade game was classified into during a scan.
///
/// Drives the default input-configuration block written into generated
/// TeknoParrot profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcadeGameKind {
    #[default]
    None,
    Racing,
    Shooting,
    Fighting,
    Sports,
    Other,
}

impl ArcadeGameKind {
    pub const fn code(self) -> i64 {
        match self {
            ArcadeGameKind::None => 0,
            ArcadeGameKind::Racing => 1,
            ArcadeGameKind::Shooting => 2,
            ArcadeGameKind::Fighting => 3,
            ArcadeGameKind::Sports => 4,
            ArcadeGameKind::Other => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ArcadeGameKind::None),
            1 => Some(ArcadeGameKind::Racing),
            2 => Some(ArcadeGameKind::Shooting),
            3 => Some(ArcadeGameKind::Fighting),
            4 => Some(ArcadeGameKind::Sports),
            5 => Some(ArcadeGameKind::Other),
            _ => None,
        }
    }

    /// Label used in generated profile documents.
    pub const fn label(self) -> &'static str {
        match self {
            ArcadeGameKind::None => "None",
            ArcadeGameKind::Racing => "Racing",
            ArcadeGameKind::Shooting => "Shooting",
            ArcadeGameKind::Fighting => "Fighting",
            ArcadeGameKind::Sports => "Sports",
            ArcadeGameKind::Other => "Other",
        }
    }
}

/// One game in the library.
///
/// Path and id fields are plain strings with empty meaning "unset";
/// whether a path is actually resolvable is checked at launch time, not
/// at ingestion. The catalog store owns the durable copy — any `Vec` of
/// these held by a frontend is a disposable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    /// Catalog key: `"{source}_{native_id}"` for scanned entries, a
    /// generated UUID for manual ones.
    pub id: String,
    pub title: String,
    pub platform: String,
    pub publisher: String,
    pub developer: String,
    pub genre: String,
    pub description: String,
    pub release_year: Option<i32>,

    pub executable_path: String,
    pub rom_path: String,

    // Media asset references. The library never fetches or creates
    // these, it only stores what a collaborator hands it.
    pub box_art_path: String,
    pub cart_art_path: String,
    pub logo_path: String,
    pub fan_art_path: String,
    pub video_preview_path: String,
    pub theme_path: String,

    pub player_count: i32,
    pub is_favorite: bool,
    pub play_time_hours: f64,
    pub last_played: Option<DateTime<Utc>>,
    pub times_played: i64,
    pub completion_status: CompletionStatus,

    pub launch_mechanism: LaunchMechanism,
    /// Configured emulator this entry prefers, when `Emulator`.
    pub emulator_id: String,
    /// The id the owning storefront knows this game by.
    pub launcher_native_id: String,
    pub command_line_args: String,

    pub tags: Vec<String>,
    pub collections: Vec<String>,

    pub is_arcade: bool,
    pub arcade_profile_path: String,
    pub arcade_kind: ArcadeGameKind,
}

impl GameEntry {
    /// A fresh entry with the given id and title and everything else at
    /// its default.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            platform: String::new(),
            publisher: String::new(),
            developer: String::new(),
            genre: String::new(),
            description: String::new(),
            release_year: None,
            executable_path: String::new(),
            rom_path: String::new(),
            box_art_path: String::new(),
            cart_art_path: String::new(),
            logo_path: String::new(),
            fan_art_path: String::new(),
            video_preview_path: String::new(),
            theme_path: String::new(),
            player_count: 1,
            is_favorite: false,
            play_time_hours: 0.0,
            last_played: None,
            times_played: 0,
            completion_status: CompletionStatus::NotStarted,
            launch_mechanism: LaunchMechanism::Standalone,
            emulator_id: String::new(),
            launcher_native_id: String::new(),
            command_line_args: String::new(),
            tags: Vec::new(),
            collections: Vec::new(),
            is_arcade: false,
            arcade_profile_path: String::new(),
            arcade_kind: ArcadeGameKind::None,
        }
    }

    /// A manually added entry, keyed by a freshly generated UUID rather
    /// than a source-derived id.
    pub fn new_manual(title: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), title)
    }

    /// Derived, never stored.
    pub fn is_multiplayer(&self) -> bool {
        self.player_count > 1
    }
}
