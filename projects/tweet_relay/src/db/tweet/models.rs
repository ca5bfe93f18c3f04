use chrono::NaiveDateTime;
use diesel::prelude::*;
use interfaces_twitter_rest::models::{parse_created_at, Status};
use thiserror::Error;

use crate::db::schema::tweets;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = tweets)]
#[diesel(primary_key(id_str))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tweet {
    pub id_str: String,
    pub id: i64,
    pub text: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub favorite_count: i64,
    pub retweet_count: i64,
    pub is_retweet: bool,
    pub is_reply: bool,
    pub user_id_str: String,
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = tweets)]
#[diesel(primary_key(id_str))]
pub struct NewTweet<'a> {
    pub id_str: &'a str,
    pub id: i64,
    pub text: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub favorite_count: i64,
    pub retweet_count: i64,
    pub is_retweet: bool,
    pub is_reply: bool,
    pub user_id_str: &'a str,
}

#[derive(Debug, Error)]
pub enum ConvertTweetError {
    #[error("CreatedAt: tweet {id_str}: {value:?}: {source}")]
    CreatedAt {
        id_str: String,
        value: String,
        source: chrono::ParseError,
    },
}

impl<'a> NewTweet<'a> {
    pub fn from_upstream(
        status: &'a Status,
        updated_at: NaiveDateTime,
    ) -> Result<Self, ConvertTweetError> {
        let created_at = parse_created_at(&status.created_at)
            .map_err(|source| ConvertTweetError::CreatedAt {
                id_str: status.id_str.clone(),
                value: status.created_at.clone(),
                source,
            })?
            .naive_utc();

        Ok(Self {
            id_str: &status.id_str,
            id: status.id,
            text: &status.text,
            created_at,
            updated_at,
            favorite_count: status.favorite_count,
            retweet_count: status.retweet_count,
            is_retweet: status.is_retweet(),
            is_reply: status.is_reply(),
            user_id_str: &status.user.id_str,
        })
    }
}
