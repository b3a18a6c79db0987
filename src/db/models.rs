use crate::http::Channel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub id: String,
    pub name: String,
    pub group_folder_name: Option<String>,
}

impl From<Channel> for ChannelRecord {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name,
            group_folder_name: channel.group_folder_name,
        }
    }
}
