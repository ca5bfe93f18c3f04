use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDateTime, TimeDelta, Utc};
use interfaces_twitter_rest::{index::FetchResourceError, models::Status};
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};
use tracing::{error, info};

use crate::{
    db::{
        mirror::mirror_tweets,
        tweet::{
            models::Tweet,
            queries::{get_tweets_order_by_older, GetTweetsOrderByOlderError},
        },
    },
    endpoints::response::{error_response, json_passthrough},
    state::AppState,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("InvalidRefreshWindow: {days} days")]
    InvalidRefreshWindow { days: i64 },

    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    GetTweetsOrderByOlder {
        #[from]
        source: GetTweetsOrderByOlderError,
    },

    #[error("Join: {source}")]
    Join {
        #[from]
        source: JoinError,
    },

    #[error("LookupStatuses: {source}")]
    LookupStatuses {
        #[from]
        source: FetchResourceError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        error!("{self}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}

/// GET /cron/update_tweet_data
///
/// Refreshes counts of the least recently updated tweets still inside the
/// refresh window, through `statuses/lookup`. Owners are left alone.
pub async fn handler(Extension(state): Extension<AppState>) -> Result<Response, HandlerError> {
    let pool = state.pool.clone();
    let limit = state.config.cron_batch_size;
    let days = state.config.tweet_refresh_window_days;
    let created_since = refresh_window_start(Utc::now().naive_utc(), days)
        .ok_or(HandlerError::InvalidRefreshWindow { days })?;

    let tweets = spawn_blocking(move || -> Result<_, HandlerError> {
        let mut conn = pool.get()?;
        Ok(get_tweets_order_by_older(&mut conn, created_since, limit)?)
    })
    .await??;

    refresh_tweets(&state, &tweets).await
}

/// `now - days`, `None` when that is not a representable timestamp.
pub fn refresh_window_start(now: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_days(days).and_then(|window| now.checked_sub_signed(window))
}

/// Looks `tweets` up by id, mirrors the answer without touching owners and
/// echoes it. Nothing is requested for an empty selection.
pub async fn refresh_tweets(state: &AppState, tweets: &[Tweet]) -> Result<Response, HandlerError> {
    if tweets.is_empty() {
        info!("No tweets to refresh");
        return Ok(json_passthrough("[]".to_string()));
    }

    let ids = tweets
        .iter()
        .map(|tweet| tweet.id_str.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let result = state.twitter.get("statuses/lookup", &[("id", ids)]).await?;

    match result.parse::<Vec<Status>>() {
        Ok(parsed) => match mirror_tweets(state.pool.clone(), parsed, false).await {
            Ok(report) => info!(?report, "Tweets refreshed"),
            Err(err) => error!("MirrorTweets: {err}"),
        },
        Err(err) => error!("DeserializeStatusesLookup: {err}"),
    }

    Ok(json_passthrough(result.body))
}
