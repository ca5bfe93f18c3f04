use chrono::NaiveDateTime;
use diesel::prelude::*;
use interfaces_twitter_rest::models::{parse_created_at, User};
use thiserror::Error;

use crate::db::schema::tw_users;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = tw_users)]
#[diesel(primary_key(id_str))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TwUser {
    pub id_str: String,
    pub id: i64,
    pub name: String,
    pub screen_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub followers_count: i64,
    pub friends_count: i64,
    pub profile_image_url: Option<String>,
    pub profile_banner_url: Option<String>,
}

/// Full record as written on every upsert; `None` clears the column.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = tw_users)]
#[diesel(primary_key(id_str))]
#[diesel(treat_none_as_null = true)]
pub struct NewTwUser<'a> {
    pub id_str: &'a str,
    pub id: i64,
    pub name: &'a str,
    pub screen_name: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub followers_count: i64,
    pub friends_count: i64,
    pub profile_image_url: Option<&'a str>,
    pub profile_banner_url: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum ConvertTwUserError {
    #[error("CreatedAt: user {id_str}: {value:?}: {source}")]
    CreatedAt {
        id_str: String,
        value: String,
        source: chrono::ParseError,
    },
}

impl<'a> NewTwUser<'a> {
    pub fn from_upstream(
        user: &'a User,
        updated_at: NaiveDateTime,
    ) -> Result<Self, ConvertTwUserError> {
        let created_at = parse_created_at(&user.created_at)
            .map_err(|source| ConvertTwUserError::CreatedAt {
                id_str: user.id_str.clone(),
                value: user.created_at.clone(),
                source,
            })?
            .naive_utc();

        Ok(Self {
            id_str: &user.id_str,
            id: user.id,
            name: &user.name,
            screen_name: &user.screen_name,
            created_at,
            updated_at,
            followers_count: user.followers_count,
            friends_count: user.friends_count,
            profile_image_url: user.profile_image_url_https.as_deref(),
            profile_banner_url: user.profile_banner_url.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(created_at: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": 6253282,
            "id_str": "6253282",
            "name": "Twitter API",
            "screen_name": "TwitterAPI",
            "created_at": created_at,
            "followers_count": 6133636,
            "friends_count": 12,
            "profile_banner_url": "https://pbs.twimg.com/profile_banners/6253282/1497491515"
        }))
        .unwrap()
    }

    #[test]
    fn converts_upstream_user() {
        let now = NaiveDate::from_ymd_opt(2019, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let upstream = user("Wed May 23 06:01:13 +0000 2007");

        let record = NewTwUser::from_upstream(&upstream, now).unwrap();

        assert_eq!(record.id_str, "6253282");
        assert_eq!(record.screen_name, "TwitterAPI");
        assert_eq!(record.followers_count, 6133636);
        assert_eq!(record.updated_at, now);
        assert_eq!(
            record.created_at,
            NaiveDate::from_ymd_opt(2007, 5, 23).unwrap().and_hms_opt(6, 1, 13).unwrap()
        );
        assert_eq!(record.profile_image_url, None);
        assert!(record.profile_banner_url.is_some());
    }

    #[test]
    fn bad_created_at_names_the_user() {
        let upstream = user("yesterday");
        let err = NewTwUser::from_upstream(&upstream, NaiveDateTime::default()).unwrap_err();
        assert!(err.to_string().contains("6253282"));
    }
}
