use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Layout of `created_at` in v1.1 payloads: `Wed Oct 10 20:19:24 +0000 2018`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

pub fn parse_created_at(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT).map(|dt| dt.with_timezone(&Utc))
}

/// Counters are nullable in v1.1 payloads; absent and `null` both read as 0.
fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// `search/tweets` payload. Only `statuses` is read, `search_metadata` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<Status>,
}

/// A tweet as returned by `search/tweets` and `statuses/lookup`.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: i64,
    pub id_str: String,
    #[serde(alias = "full_text")]
    pub text: String,
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub favorite_count: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub retweet_count: i64,
    #[serde(default)]
    pub retweeted_status: Option<serde_json::Value>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
    pub user: User,
}

impl Status {
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.in_reply_to_screen_name
            .as_deref()
            .is_some_and(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub id_str: String,
    pub name: String,
    pub screen_name: String,
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub followers_count: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub friends_count: i64,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
    #[serde(default)]
    pub profile_banner_url: Option<String>,
}
