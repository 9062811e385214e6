//! The dispatch table: one protocol per launch mechanism.

use std::io;
use std::path::{Path, PathBuf};

use cabinet_core::{GameEntry, LaunchMechanism};
use cabinet_db::{operations, queries, OperationError};
use chrono::Utc;
use rusqlite::Connection;
use thiserror::Error;

use crate::spawn::ProcessSpawner;

/// Dispatcher configuration threaded through construction instead of
/// ambient global state.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Candidate locations of the TeknoParrot frontend executable,
    /// checked in order.
    pub frontend_paths: Vec<PathBuf>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        let mut frontend_paths = vec![
            PathBuf::from(r"C:\TeknoParrot\TeknoParrotUi.exe"),
            PathBuf::from(r"C:\Program Files\TeknoParrot\TeknoParrotUi.exe"),
            PathBuf::from(r"C:\Program Files (x86)\TeknoParrot\TeknoParrotUi.exe"),
        ];
        if let Some(home) = dirs::home_dir() {
            frontend_paths.push(home.join("TeknoParrot").join("TeknoParrotUi.exe"));
        }
        Self { frontend_paths }
    }
}

/// Why a launch attempt failed. Displayable to the user as-is.
#[derive(Debug, Error)]
pub enum LaunchFailure {
    /// A precondition field of the entry's mechanism is unset.
    #[error("required field '{field}' is not set")]
    MissingField { field: &'static str },

    /// A precondition path is set but does not exist on disk.
    #[error("{what} not found: {path}")]
    PathNotFound { what: &'static str, path: String },

    /// No TeknoParrot frontend executable at any configured location.
    #[error("TeknoParrot frontend executable not found")]
    FrontendNotFound,

    /// No catalog entry with the requested id.
    #[error("no library entry with id '{id}'")]
    UnknownEntry { id: String },

    /// The process spawn itself failed.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The URI hand-off to the storefront client failed.
    #[error("failed to open '{uri}': {source}")]
    UriHandoff {
        uri: String,
        #[source]
        source: io::Error,
    },
}

/// Outcome of one launch attempt.
#[derive(Debug)]
pub struct LaunchReport {
    pub launched: bool,
    pub failure: Option<LaunchFailure>,
}

impl LaunchReport {
    fn success() -> Self {
        Self {
            launched: true,
            failure: None,
        }
    }

    fn failed(failure: LaunchFailure) -> Self {
        Self {
            launched: false,
            failure: Some(failure),
        }
    }
}

/// Launch a game by catalog id.
///
/// `Err` is reserved for persistence failures (lookup or statistics
/// write-back); every launch-path problem comes back inside the report.
pub fn launch_by_id(
    conn: &Connection,
    id: &str,
    spawner: &dyn ProcessSpawner,
    options: &LaunchOptions,
) -> Result<LaunchReport, OperationError> {
    match queries::get_game(conn, id)? {
        Some(entry) => launch(conn, &entry, spawner, options),
        None => Ok(LaunchReport::failed(LaunchFailure::UnknownEntry {
            id: id.to_string(),
        })),
    }
}

/// Launch an already-resolved entry.
///
/// Statistics (`times_played`, `last_played`) are written back after
/// every attempt, success or failure.
pub fn launch(
    conn: &Connection,
    entry: &GameEntry,
    spawner: &dyn ProcessSpawner,
    options: &LaunchOptions,
) -> Result<LaunchReport, OperationError> {
    let outcome = dispatch(entry, spawner, options);

    let mut updated = entry.clone();
    updated.times_played += 1;
    updated.last_played = Some(Utc::now());
    operations::upsert_game(conn, &updated)?;

    match outcome {
        Ok(()) => {
            log::debug!("launched {} ({})", entry.title, entry.id);
            Ok(LaunchReport::success())
        }
        Err(failure) => {
            log::warn!("failed to launch {} ({}): {failure}", entry.title, entry.id);
            Ok(LaunchReport::failed(failure))
        }
    }
}

fn dispatch(
    entry: &GameEntry,
    spawner: &dyn ProcessSpawner,
    options: &LaunchOptions,
) -> Result<(), LaunchFailure> {
    match entry.launch_mechanism {
        LaunchMechanism::Emulator => launch_emulator(entry, spawner),
        LaunchMechanism::Steam => {
            launch_storefront(entry, spawner, |id| format!("steam://rungameid/{id}"))
        }
        LaunchMechanism::Gog => {
            launch_storefront(entry, spawner, |id| format!("goggalaxy://openGameView/{id}"))
        }
        LaunchMechanism::Epic => launch_storefront(entry, spawner, |id| {
            format!("com.epicgames.launcher://apps/{id}?action=launch")
        }),
        LaunchMechanism::TeknoParrot => launch_teknoparrot(entry, spawner, options),
        LaunchMechanism::Standalone => launch_standalone(entry, spawner),
    }
}

fn launch_emulator(entry: &GameEntry, spawner: &dyn ProcessSpawner) -> Result<(), LaunchFailure> {
    if entry.executable_path.is_empty() {
        return Err(LaunchFailure::MissingField {
            field: "executable_path",
        });
    }
    if entry.rom_path.is_empty() {
        return Err(LaunchFailure::MissingField { field: "rom_path" });
    }

    let exe = Path::new(&entry.executable_path);
    if !exe.is_file() {
        return Err(LaunchFailure::PathNotFound {
            what: "emulator executable",
            path: entry.executable_path.clone(),
        });
    }
    if !Path::new(&entry.rom_path).is_file() {
        return Err(LaunchFailure::PathNotFound {
            what: "ROM file",
            path: entry.rom_path.clone(),
        });
    }

    let mut args = vec![entry.rom_path.clone()];
    args.extend(split_args(&entry.command_line_args));
    spawn_program(spawner, exe, &args, exe.parent())
}

/// Storefront protocol: URI hand-off when the native id is known,
/// direct spawn of the recorded executable otherwise.
fn launch_storefront(
    entry: &GameEntry,
    spawner: &dyn ProcessSpawner,
    uri_for: fn(&str) -> String,
) -> Result<(), LaunchFailure> {
    if !entry.launcher_native_id.is_empty() {
        let uri = uri_for(&entry.launcher_native_id);
        return spawner
            .open_uri(&uri)
            .map_err(|source| LaunchFailure::UriHandoff { uri, source });
    }

    if entry.executable_path.is_empty() {
        return Err(LaunchFailure::MissingField {
            field: "launcher_native_id or executable_path",
        });
    }
    let exe = Path::new(&entry.executable_path);
    if !exe.is_file() {
        return Err(LaunchFailure::PathNotFound {
            what: "executable",
            path: entry.executable_path.clone(),
        });
    }
    spawn_program(spawner, exe, &split_args(&entry.command_line_args), exe.parent())
}

fn launch_teknoparrot(
    entry: &GameEntry,
    spawner: &dyn ProcessSpawner,
    options: &LaunchOptions,
) -> Result<(), LaunchFailure> {
    if entry.arcade_profile_path.is_empty() {
        return Err(LaunchFailure::MissingField {
            field: "arcade_profile_path",
        });
    }
    if !Path::new(&entry.arcade_profile_path).is_file() {
        return Err(LaunchFailure::PathNotFound {
            what: "game profile",
            path: entry.arcade_profile_path.clone(),
        });
    }

    let frontend = options
        .frontend_paths
        .iter()
        .find(|path| path.is_file())
        .ok_or(LaunchFailure::FrontendNotFound)?;

    let mut args = vec![format!("--profile={}", entry.arcade_profile_path)];
    args.extend(split_args(&entry.command_line_args));
    spawn_program(spawner, frontend, &args, frontend.parent())
}

fn launch_standalone(entry: &GameEntry, spawner: &dyn ProcessSpawner) -> Result<(), LaunchFailure> {
    if entry.executable_path.is_empty() {
        return Err(LaunchFailure::MissingField {
            field: "executable_path",
        });
    }
    let exe = Path::new(&entry.executable_path);
    if !exe.is_file() {
        return Err(LaunchFailure::PathNotFound {
            what: "executable",
            path: entry.executable_path.clone(),
        });
    }
    spawn_program(spawner, exe, &split_args(&entry.command_line_args), exe.parent())
}

fn spawn_program(
    spawner: &dyn ProcessSpawner,
    program: &Path,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<(), LaunchFailure> {
    spawner
        .spawn(program, args, cwd)
        .map_err(|source| LaunchFailure::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })
}

/// Split a stored argument string into argv entries, honoring double
/// quotes around arguments with spaces.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut arg = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(&c) = chars.peek() {
                if c == '"' {
                    chars.next();
                    break;
                }
                arg.push(c);
                chars.next();
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_ascii_whitespace() {
                    break;
                }
                arg.push(c);
                chars.next();
            }
        }
        args.push(arg);
    }

    args
}
