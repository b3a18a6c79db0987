use rusqlite::Connection;
use tracing::info;

use super::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS channels (
            id                  TEXT PRIMARY KEY,
            name                TEXT NOT NULL,
            group_folder_name   TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_channels_group
            ON channels(group_folder_name);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
