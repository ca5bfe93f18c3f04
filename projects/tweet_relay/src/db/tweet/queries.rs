use chrono::NaiveDateTime;
use diesel::{pg::Pg, prelude::*};
use thiserror::Error;

use crate::db::{
    schema::tweets::{dsl::*, BoxedQuery},
    tweet::models::*,
};

#[derive(Debug, Error)]
pub enum UpsertTweetError {
    #[error("UpsertTweet: {source}")]
    UpsertTweet {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn upsert_tweet(
    conn: &mut PgConnection,
    new: &NewTweet,
) -> Result<Tweet, UpsertTweetError> {
    diesel::insert_into(tweets)
        .values(new)
        .on_conflict(id_str)
        .do_update()
        .set(new)
        .returning(Tweet::as_returning())
        .get_result(conn)
        .map_err(|source| UpsertTweetError::UpsertTweet { source })
}

#[derive(Debug, Error)]
pub enum GetTweetsOrderByOlderError {
    #[error("GetTweetsOrderByOlder: {source}")]
    GetTweetsOrderByOlder {
        #[from]
        source: diesel::result::Error,
    },
}

/// Least recently refreshed tweets among those created at or after `created_since`.
pub fn tweets_order_by_older(
    created_since: NaiveDateTime,
    limit_val: i64,
) -> BoxedQuery<'static, Pg> {
    tweets
        .filter(created_at.ge(created_since))
        .order((updated_at.asc(), id_str.asc()))
        .limit(limit_val)
        .into_boxed()
}

pub fn get_tweets_order_by_older(
    conn: &mut PgConnection,
    created_since: NaiveDateTime,
    limit_val: i64,
) -> Result<Vec<Tweet>, GetTweetsOrderByOlderError> {
    tweets_order_by_older(created_since, limit_val)
        .select(Tweet::as_select())
        .load(conn)
        .map_err(|source| GetTweetsOrderByOlderError::GetTweetsOrderByOlder { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use diesel::debug_query;

    #[test]
    fn window_then_oldest_updated_first_with_limit() {
        let since = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let sql = debug_query::<Pg, _>(&tweets_order_by_older(since, 100)).to_string();

        let (where_clause, order_clause) = sql.split_once("ORDER BY").unwrap();
        assert!(where_clause.contains(r#"WHERE "tweets"."created_at" >= $1"#), "{sql}");
        assert!(
            order_clause.contains(r#""tweets"."updated_at" ASC, "tweets"."id_str" ASC LIMIT $2"#),
            "{sql}"
        );
        assert!(sql.contains("2019-01-01T00:00:00"), "{sql}");
        assert!(sql.ends_with(", 100]"), "{sql}");
    }

    #[test]
    fn upsert_keeps_the_key_and_rewrites_counts() {
        let new = NewTweet {
            id_str: "1050118621198921728",
            id: 1050118621198921728,
            text: "hello",
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
            favorite_count: 3,
            retweet_count: 1,
            is_retweet: false,
            is_reply: false,
            user_id_str: "6253282",
        };

        let statement = diesel::insert_into(tweets)
            .values(&new)
            .on_conflict(id_str)
            .do_update()
            .set(&new);
        let sql = debug_query::<Pg, _>(&statement).to_string();

        let (_, set_clause) = sql.split_once("DO UPDATE SET").unwrap();
        assert!(!set_clause.contains(r#""id_str" ="#), "{sql}");
        assert!(set_clause.contains(r#""favorite_count" ="#), "{sql}");
        assert!(set_clause.contains(r#""updated_at" ="#), "{sql}");
    }
}
