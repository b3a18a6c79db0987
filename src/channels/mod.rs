pub mod groups;

use tracing::info;

use crate::{
    db::{ChannelRecord, Database, StoreError},
    http::Channel,
};

pub use self::groups::{ChannelGroups, ListRow, UNKNOWN_GROUP};

/// Replaces the cached channels with a fresh fetch, then reads them back and
/// groups them for display. Nothing is regrouped if the write fails.
pub fn store_and_group(db: &Database, channels: Vec<Channel>) -> Result<ChannelGroups, StoreError> {
    let records: Vec<ChannelRecord> = channels.into_iter().map(ChannelRecord::from).collect();
    db.replace_channels(&records)?;

    let stored = db.load_channels()?;
    let groups = ChannelGroups::from_records(stored);
    info!(
        "Grouped {} channels into {} sections",
        groups.channel_count(),
        groups.section_count()
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(id: &str, name: &str, group: Option<&str>) -> Channel {
        Channel {
            id: id.to_string(),
            name: name.to_string(),
            group_folder_name: group.map(str::to_string),
        }
    }

    #[test]
    fn decoded_channel_survives_store_and_regroup() {
        let json = r#"{"id":"C1","name":"General","group_folder_name":"Team A"}"#;
        let decoded: Channel = serde_json::from_str(json).unwrap();
        let db = Database::open_in_memory().unwrap();

        let groups = store_and_group(&db, vec![decoded]).unwrap();

        assert_eq!(groups.section_count(), 1);
        assert_eq!(groups.header(0), Some("Team A"));
        assert_eq!(groups.channel(0, 0).map(|c| c.name.as_str()), Some("General"));
    }

    #[test]
    fn repeated_fetches_do_not_duplicate_rows() {
        let db = Database::open_in_memory().unwrap();
        let fetched = vec![channel("C1", "General", Some("A")), channel("C2", "Dev", Some("A"))];

        store_and_group(&db, fetched.clone()).unwrap();
        let groups = store_and_group(&db, fetched).unwrap();

        assert_eq!(groups.row_count(0), 2);
        assert_eq!(db.load_channels().unwrap().len(), 2);
    }
}
