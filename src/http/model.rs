use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group_folder_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    pub channels: Vec<Channel>,
}

/// Username and password as typed, plus the host the login call goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub host: String,
}
