//! Read queries for the games table.

use cabinet_core::{ArcadeGameKind, CompletionStatus, GameEntry, LaunchMechanism};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::operations::OperationError;

const GAME_COLUMNS: &str = "id, title, platform, publisher, developer, genre, description, \
     release_year, executable_path, rom_path, box_art_path, cart_art_path, \
     logo_path, fan_art_path, video_preview_path, theme_path, player_count, \
     is_favorite, play_time_hours, last_played, times_played, \
     completion_status, launch_mechanism, emulator_id, launcher_native_id, \
     command_line_args, tags, collections, is_arcade, arcade_profile_path, \
     arcade_kind";

/// Fetch one entry by id, or `None` if absent.
pub fn get_game(conn: &Connection, id: &str) -> Result<Option<GameEntry>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_game(row)?)),
        None => Ok(None),
    }
}

/// List every entry, ordered by title.
///
/// Ordering uses SQLite's default BINARY collation, so it is
/// case-sensitive ("Zelda" sorts before "daytona").
pub fn list_games(conn: &Connection) -> Result<Vec<GameEntry>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games ORDER BY title"
    ))?;
    collect_games(&mut stmt, params![])
}

/// Case-insensitive substring search over title, platform, genre, and
/// publisher, ordered by title.
///
/// LIKE in SQLite is case-insensitive for ASCII only; that matches the
/// original frontend's behavior.
pub fn search_games(conn: &Connection, term: &str) -> Result<Vec<GameEntry>, OperationError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games
         WHERE title LIKE ?1
            OR platform LIKE ?1
            OR genre LIKE ?1
            OR publisher LIKE ?1
         ORDER BY title"
    ))?;
    collect_games(&mut stmt, params![pattern])
}

/// List entries with an exact platform match, ordered by title.
pub fn games_by_platform(
    conn: &Connection,
    platform: &str,
) -> Result<Vec<GameEntry>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE platform = ?1 ORDER BY title"
    ))?;
    collect_games(&mut stmt, params![platform])
}

/// Total number of entries in the catalog.
pub fn count_games(conn: &Connection) -> Result<i64, OperationError> {
    let count = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    Ok(count)
}

fn collect_games(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> Result<Vec<GameEntry>, OperationError> {
    let mut rows = stmt.query(params)?;
    let mut games = Vec::new();
    while let Some(row) = rows.next()? {
        games.push(row_to_game(row)?);
    }
    Ok(games)
}

fn row_to_game(row: &Row<'_>) -> Result<GameEntry, OperationError> {
    let last_played: Option<String> = row.get(19)?;
    let last_played = match last_played {
        Some(text) => Some(parse_timestamp(&text)?),
        None => None,
    };

    let tags: String = row.get(26)?;
    let collections: String = row.get(27)?;

    let completion_code: i64 = row.get(21)?;
    let mechanism_code: i64 = row.get(22)?;
    let kind_code: i64 = row.get(30)?;

    Ok(GameEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        platform: row.get(2)?,
        publisher: row.get(3)?,
        developer: row.get(4)?,
        genre: row.get(5)?,
        description: row.get(6)?,
        release_year: row.get(7)?,
        executable_path: row.get(8)?,
        rom_path: row.get(9)?,
        box_art_path: row.get(10)?,
        cart_art_path: row.get(11)?,
        logo_path: row.get(12)?,
        fan_art_path: row.get(13)?,
        video_preview_path: row.get(14)?,
        theme_path: row.get(15)?,
        player_count: row.get(16)?,
        is_favorite: row.get::<_, i64>(17)? != 0,
        play_time_hours: row.get(18)?,
        last_played,
        times_played: row.get(20)?,
        completion_status: CompletionStatus::from_code(completion_code).ok_or(
            OperationError::InvalidColumn {
                column: "completion_status",
                value: completion_code.to_string(),
            },
        )?,
        launch_mechanism: LaunchMechanism::from_code(mechanism_code).ok_or(
            OperationError::InvalidColumn {
                column: "launch_mechanism",
                value: mechanism_code.to_string(),
            },
        )?,
        emulator_id: row.get(23)?,
        launcher_native_id: row.get(24)?,
        command_line_args: row.get(25)?,
        tags: serde_json::from_str(&tags)?,
        collections: serde_json::from_str(&collections)?,
        is_arcade: row.get::<_, i64>(28)? != 0,
        arcade_profile_path: row.get(29)?,
        arcade_kind: ArcadeGameKind::from_code(kind_code).ok_or(
            OperationError::InvalidColumn {
                column: "arcade_kind",
                value: kind_code.to_string(),
            },
        )?,
    })
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, OperationError> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| OperationError::InvalidColumn {
            column: "last_played",
            value: text.to_string(),
        })
}
