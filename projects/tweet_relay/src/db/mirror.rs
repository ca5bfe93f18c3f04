//! Writes upstream payloads into `tw_users` / `tweets`.
//!
//! Conversion happens up front (`prepare_*`), so a record with an unparsable
//! timestamp is dropped with a warning instead of failing the whole batch.
//! Database errors abort the remaining writes of the batch.

use std::collections::HashSet;

use chrono::{NaiveDateTime, Utc};
use diesel::PgConnection;
use interfaces_twitter_rest::models::{Status, User};
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};
use tracing::{debug, warn};

use crate::db::{
    PgPool,
    tw_user::{
        models::NewTwUser,
        queries::{upsert_tw_user, UpsertTwUserError},
    },
    tweet::{
        models::NewTweet,
        queries::{upsert_tweet, UpsertTweetError},
    },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorReport {
    pub users_written: usize,
    pub tweets_written: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct PreparedBatch<'a> {
    pub users: Vec<NewTwUser<'a>>,
    pub tweets: Vec<NewTweet<'a>>,
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error("Join: {source}")]
    Join {
        #[from]
        source: JoinError,
    },

    #[error(transparent)]
    UpsertTwUser {
        #[from]
        source: UpsertTwUserError,
    },

    #[error(transparent)]
    UpsertTweet {
        #[from]
        source: UpsertTweetError,
    },
}

/// Owners of `tweets`, first occurrence of each `id_str` kept, in order.
pub fn dedup_users(tweets: &[Status]) -> Vec<&User> {
    let mut seen = HashSet::new();
    tweets
        .iter()
        .map(|tweet| &tweet.user)
        .filter(|user| seen.insert(user.id_str.as_str()))
        .collect()
}

pub fn prepare_tw_users<'a>(
    users: impl IntoIterator<Item = &'a User>,
    updated_at: NaiveDateTime,
) -> PreparedBatch<'a> {
    let mut batch = PreparedBatch::default();

    for user in users {
        match NewTwUser::from_upstream(user, updated_at) {
            Ok(record) => batch.users.push(record),
            Err(err) => {
                warn!("Skipping user: {err}");
                batch.skipped += 1;
            }
        }
    }

    batch
}

/// With `save_users`, the de-duplicated owners are included and tweets whose
/// owner could not be converted are skipped along with it.
pub fn prepare_tweets(
    tweets: &[Status],
    save_users: bool,
    updated_at: NaiveDateTime,
) -> PreparedBatch<'_> {
    let mut batch = if save_users {
        prepare_tw_users(dedup_users(tweets), updated_at)
    } else {
        PreparedBatch::default()
    };

    let kept_users: HashSet<&str> = batch.users.iter().map(|user| user.id_str).collect();

    for tweet in tweets {
        if save_users && !kept_users.contains(tweet.user.id_str.as_str()) {
            warn!("Skipping tweet {}: owner {} was not converted", tweet.id_str, tweet.user.id_str);
            batch.skipped += 1;
            continue;
        }

        match NewTweet::from_upstream(tweet, updated_at) {
            Ok(record) => batch.tweets.push(record),
            Err(err) => {
                warn!("Skipping tweet: {err}");
                batch.skipped += 1;
            }
        }
    }

    batch
}

/// Users go first so every tweet's `user_id_str` already resolves.
pub fn write_batch(
    conn: &mut PgConnection,
    batch: &PreparedBatch,
) -> Result<MirrorReport, MirrorError> {
    let mut report = MirrorReport {
        skipped: batch.skipped,
        ..MirrorReport::default()
    };

    for user in &batch.users {
        upsert_tw_user(conn, user)?;
        report.users_written += 1;
    }

    for tweet in &batch.tweets {
        upsert_tweet(conn, tweet)?;
        report.tweets_written += 1;
    }

    debug!(?report, "Batch mirrored");
    Ok(report)
}

pub fn set_tweets(
    conn: &mut PgConnection,
    tweets: &[Status],
    save_users: bool,
) -> Result<MirrorReport, MirrorError> {
    let batch = prepare_tweets(tweets, save_users, Utc::now().naive_utc());
    write_batch(conn, &batch)
}

pub fn set_tw_users(
    conn: &mut PgConnection,
    users: &[User],
) -> Result<MirrorReport, MirrorError> {
    let batch = prepare_tw_users(users, Utc::now().naive_utc());
    write_batch(conn, &batch)
}

/// `set_tweets` on a pooled connection, off the async runtime.
pub async fn mirror_tweets(
    pool: PgPool,
    tweets: Vec<Status>,
    save_users: bool,
) -> Result<MirrorReport, MirrorError> {
    spawn_blocking(move || {
        let mut conn = pool.get()?;
        set_tweets(&mut conn, &tweets, save_users)
    })
    .await?
}

/// `set_tw_users` on a pooled connection, off the async runtime.
pub async fn mirror_tw_users(pool: PgPool, users: Vec<User>) -> Result<MirrorReport, MirrorError> {
    spawn_blocking(move || {
        let mut conn = pool.get()?;
        set_tw_users(&mut conn, &users)
    })
    .await?
}
