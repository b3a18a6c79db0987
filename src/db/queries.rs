use rusqlite::{Connection, Transaction};
use tracing::debug;

use super::{ChannelRecord, Database, Result};

impl Database {
    /// Swaps the whole table for `channels` in one transaction. Rows sharing an
    /// id collapse into the last one seen.
    pub fn replace_channels(&self, channels: &[ChannelRecord]) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            delete_all(&tx)?;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR REPLACE INTO channels (id, name, group_folder_name) VALUES (?1, ?2, ?3)",
                )?;
                for channel in channels {
                    stmt.execute((&channel.id, &channel.name, &channel.group_folder_name))?;
                }
            }
            tx.commit()?;
            debug!("Stored {} channels", channels.len());
            Ok(())
        })
    }

    /// All rows ordered by group folder name only.
    pub fn load_channels(&self) -> Result<Vec<ChannelRecord>> {
        self.with_conn(query_channels)
    }
}

fn delete_all(tx: &Transaction<'_>) -> Result<usize> {
    Ok(tx.execute("DELETE FROM channels", [])?)
}

fn query_channels(conn: &Connection) -> Result<Vec<ChannelRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, group_folder_name FROM channels ORDER BY group_folder_name ASC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ChannelRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                group_folder_name: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, group: Option<&str>) -> ChannelRecord {
        ChannelRecord {
            id: id.to_string(),
            name: name.to_string(),
            group_folder_name: group.map(str::to_string),
        }
    }

    #[test]
    fn replace_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let channels = vec![record("C1", "General", Some("Team A")), record("C2", "Random", None)];

        db.replace_channels(&channels).unwrap();
        db.replace_channels(&channels).unwrap();

        assert_eq!(db.load_channels().unwrap().len(), 2);
    }

    #[test]
    fn replace_drops_channels_missing_from_new_list() {
        let db = Database::open_in_memory().unwrap();
        db.replace_channels(&[record("C1", "General", None), record("C2", "Old", None)])
            .unwrap();
        db.replace_channels(&[record("C1", "General", None)]).unwrap();

        let ids: Vec<_> = db.load_channels().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["C1"]);
    }

    #[test]
    fn duplicate_ids_in_one_batch_keep_last() {
        let db = Database::open_in_memory().unwrap();
        db.replace_channels(&[record("C1", "First", None), record("C1", "Second", None)])
            .unwrap();

        let rows = db.load_channels().unwrap();
        assert_eq!(rows, vec![record("C1", "Second", None)]);
    }

    #[test]
    fn load_orders_by_group_with_nulls_first() {
        let db = Database::open_in_memory().unwrap();
        db.replace_channels(&[
            record("1", "b1", Some("B")),
            record("2", "none", None),
            record("3", "a1", Some("A")),
        ])
        .unwrap();

        let groups: Vec<_> = db
            .load_channels()
            .unwrap()
            .into_iter()
            .map(|c| c.group_folder_name)
            .collect();
        assert_eq!(groups, vec![None, Some("A".to_string()), Some("B".to_string())]);
    }
}
