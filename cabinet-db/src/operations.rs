//! Write operations for the games table.

use cabinet_core::GameEntry;
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    /// A stored column holds a value no release ever wrote — a stale or
    /// hand-edited database. Reported distinctly so the frontend can tell
    /// a broken row from a failed launch.
    #[error("Invalid value in column '{column}': {value}")]
    InvalidColumn { column: &'static str, value: String },
}

/// Insert or fully overwrite an entry by id.
///
/// There is no partial-field update: callers read, modify, and write the
/// whole record. Concurrent upserts to the same id are last-write-wins
/// under SQLite's own locking.
pub fn upsert_game(conn: &Connection, entry: &GameEntry) -> Result<(), OperationError> {
    let tags = serde_json::to_string(&entry.tags)?;
    let collections = serde_json::to_string(&entry.collections)?;
    let last_played = entry.last_played.map(|t| t.to_rfc3339());

    conn.execute(
        "INSERT INTO games (
             id, title, platform, publisher, developer, genre, description,
             release_year, executable_path, rom_path, box_art_path,
             cart_art_path, logo_path, fan_art_path, video_preview_path,
             theme_path, player_count, is_favorite, play_time_hours,
             last_played, times_played, completion_status, launch_mechanism,
             emulator_id, launcher_native_id, command_line_args, tags,
             collections, is_arcade, arcade_profile_path, arcade_kind
         ) VALUES (
             ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
             ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26,
             ?27, ?28, ?29, ?30, ?31
         )
         ON CONFLICT(id) DO UPDATE SET
             title = excluded.title,
             platform = excluded.platform,
             publisher = excluded.publisher,
             developer = excluded.developer,
             genre = excluded.genre,
             description = excluded.description,
             release_year = excluded.release_year,
             executable_path = excluded.executable_path,
             rom_path = excluded.rom_path,
             box_art_path = excluded.box_art_path,
             cart_art_path = excluded.cart_art_path,
             logo_path = excluded.logo_path,
             fan_art_path = excluded.fan_art_path,
             video_preview_path = excluded.video_preview_path,
             theme_path = excluded.theme_path,
             player_count = excluded.player_count,
             is_favorite = excluded.is_favorite,
             play_time_hours = excluded.play_time_hours,
             last_played = excluded.last_played,
             times_played = excluded.times_played,
             completion_status = excluded.completion_status,
             launch_mechanism = excluded.launch_mechanism,
             emulator_id = excluded.emulator_id,
             launcher_native_id = excluded.launcher_native_id,
             command_line_args = excluded.command_line_args,
             tags = excluded.tags,
             collections = excluded.collections,
             is_arcade = excluded.is_arcade,
             arcade_profile_path = excluded.arcade_profile_path,
             arcade_kind = excluded.arcade_kind",
        params![
            entry.id,
            entry.title,
            entry.platform,
            entry.publisher,
            entry.developer,
            entry.genre,
            entry.description,
            entry.release_year,
            entry.executable_path,
            entry.rom_path,
            entry.box_art_path,
            entry.cart_art_path,
            entry.logo_path,
            entry.fan_art_path,
            entry.video_preview_path,
            entry.theme_path,
            entry.player_count,
            i64::from(entry.is_favorite),
            entry.play_time_hours,
            last_played,
            entry.times_played,
            entry.completion_status.code(),
            entry.launch_mechanism.code(),
            entry.emulator_id,
            entry.launcher_native_id,
            entry.command_line_args,
            tags,
            collections,
            i64::from(entry.is_arcade),
            entry.arcade_profile_path,
            entry.arcade_kind.code(),
        ],
    )?;

    Ok(())
}

/// Remove an entry. No-op if the id is absent.
pub fn delete_game(conn: &Connection, id: &str) -> Result<(), OperationError> {
    conn.execute("DELETE FROM games WHERE id = ?1", params![id])?;
    Ok(())
}
