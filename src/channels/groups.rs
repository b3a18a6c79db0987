use std::collections::HashMap;

use crate::db::ChannelRecord;

/// Section title for channels without a group folder.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Channels partitioned by group folder, with sections sorted by name.
///
/// Rows inside a section keep the order they were given in. The store only
/// sorts by group, so that order is whatever SQLite returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelGroups {
    names: Vec<String>,
    by_group: HashMap<String, Vec<ChannelRecord>>,
}

/// One line of the flattened list: a section header or a channel inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRow<'a> {
    Header(&'a str),
    Channel(&'a ChannelRecord),
}

impl ChannelGroups {
    pub fn from_records(records: impl IntoIterator<Item = ChannelRecord>) -> Self {
        let mut by_group: HashMap<String, Vec<ChannelRecord>> = HashMap::new();
        for record in records {
            let key = group_key(record.group_folder_name.as_deref());
            by_group.entry(key).or_default().push(record);
        }

        let mut names: Vec<String> = by_group.keys().cloned().collect();
        names.sort();

        Self { names, by_group }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.names.len()
    }

    pub fn section_names(&self) -> &[String] {
        &self.names
    }

    pub fn header(&self, section: usize) -> Option<&str> {
        self.names.get(section).map(String::as_str)
    }

    pub fn section(&self, section: usize) -> Option<&[ChannelRecord]> {
        let name = self.names.get(section)?;
        self.by_group.get(name).map(Vec::as_slice)
    }

    pub fn row_count(&self, section: usize) -> usize {
        self.section(section).map_or(0, <[ChannelRecord]>::len)
    }

    pub fn channel(&self, section: usize, row: usize) -> Option<&ChannelRecord> {
        self.section(section)?.get(row)
    }

    pub fn channel_count(&self) -> usize {
        self.by_group.values().map(Vec::len).sum()
    }

    pub fn rows(&self) -> Vec<ListRow<'_>> {
        let mut rows = Vec::with_capacity(self.names.len() + self.channel_count());
        for (index, name) in self.names.iter().enumerate() {
            rows.push(ListRow::Header(name));
            if let Some(channels) = self.section(index) {
                rows.extend(channels.iter().map(ListRow::Channel));
            }
        }
        rows
    }
}

fn group_key(group: Option<&str>) -> String {
    match group {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_GROUP.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, group: Option<&str>) -> ChannelRecord {
        ChannelRecord {
            id: id.to_string(),
            name: format!("channel-{id}"),
            group_folder_name: group.map(str::to_string),
        }
    }

    #[test]
    fn sections_sorted_with_unknown_sentinel() {
        let groups = ChannelGroups::from_records(vec![
            record("1", Some("B")),
            record("2", Some("A")),
            record("3", Some("B")),
            record("4", None),
        ]);

        assert_eq!(groups.section_names(), ["A", "B", "Unknown"]);
        assert_eq!(groups.row_count(0), 1);
        assert_eq!(groups.row_count(1), 2);
        assert_eq!(groups.row_count(2), 1);
    }

    #[test]
    fn empty_group_name_joins_unknown() {
        let groups = ChannelGroups::from_records(vec![record("1", Some("")), record("2", None)]);

        assert_eq!(groups.section_names(), [UNKNOWN_GROUP]);
        assert_eq!(groups.row_count(0), 2);
    }

    #[test]
    fn rows_keep_input_order_within_a_group() {
        let groups = ChannelGroups::from_records(vec![
            record("z", Some("G")),
            record("a", Some("G")),
            record("m", Some("G")),
        ]);

        let ids: Vec<_> = (0..groups.row_count(0))
            .filter_map(|row| groups.channel(0, row))
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let groups = ChannelGroups::from_records(vec![record("1", Some("A"))]);

        assert_eq!(groups.header(1), None);
        assert_eq!(groups.row_count(5), 0);
        assert!(groups.channel(0, 1).is_none());
        assert!(groups.channel(3, 0).is_none());
        assert!(groups.section(1).is_none());
    }

    #[test]
    fn flattened_rows_interleave_headers() {
        let groups =
            ChannelGroups::from_records(vec![record("1", Some("B")), record("2", Some("A"))]);

        let rows = groups.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], ListRow::Header("A"));
        assert!(matches!(rows[1], ListRow::Channel(c) if c.id == "2"));
        assert_eq!(rows[2], ListRow::Header("B"));
        assert!(matches!(rows[3], ListRow::Channel(c) if c.id == "1"));
    }

    #[test]
    fn no_records_no_sections() {
        let groups = ChannelGroups::from_records(Vec::new());
        assert!(groups.is_empty());
        assert!(groups.rows().is_empty());
    }
}
