use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use interfaces_twitter_rest::{index::FetchResourceError, models::SearchResponse};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    db::mirror::mirror_tweets,
    endpoints::response::{error_response, json_passthrough},
    state::AppState,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("InvalidQuery: {source}")]
    InvalidQuery {
        #[from]
        source: QueryRejection,
    },

    #[error("users query is missing")]
    MissingUsers,

    #[error("since_date query is missing")]
    MissingSinceDate,

    #[error("users query has no accounts")]
    NoAccounts,

    #[error("FetchSearch: {source}")]
    FetchSearch {
        #[from]
        source: FetchResourceError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::InvalidQuery { .. }
            | HandlerError::MissingUsers
            | HandlerError::MissingSinceDate
            | HandlerError::NoAccounts => error_response(StatusCode::BAD_REQUEST, self.to_string()),
            HandlerError::FetchSearch { .. } => {
                error!("{self}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

/// Both fields are optional here so that a missing one becomes our own 400.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    users: Option<String>,
    since_date: Option<String>,
}

/// `from:a OR from:b since:<since_date>` from a comma separated account list.
/// Whitespace and empty entries are dropped; `None` when no account is left.
pub fn build_search_query(users: &str, since_date: &str) -> Option<String> {
    let accounts: Vec<String> = users
        .split(',')
        .map(|user| user.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|user| !user.is_empty())
        .collect();

    if accounts.is_empty() {
        return None;
    }

    Some(format!(
        "from:{} since:{}",
        accounts.join(" OR from:"),
        since_date.trim()
    ))
}

/// GET /search?users=&since_date=
///
/// Recent tweets of the given accounts. The upstream body is returned as-is;
/// its statuses and their owners are mirrored first.
pub async fn handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, HandlerError> {
    let Query(query) = query?;
    let users = query
        .users
        .filter(|users| !users.trim().is_empty())
        .ok_or(HandlerError::MissingUsers)?;
    let since_date = query
        .since_date
        .filter(|since_date| !since_date.trim().is_empty())
        .ok_or(HandlerError::MissingSinceDate)?;

    let q = build_search_query(&users, &since_date).ok_or(HandlerError::NoAccounts)?;

    let params = [
        ("q", q),
        ("result_type", "recent".to_string()),
        ("count", state.config.search_count.to_string()),
    ];
    let result = state.twitter.get("search/tweets", &params).await?;

    match result.parse::<SearchResponse>() {
        Ok(parsed) => match mirror_tweets(state.pool.clone(), parsed.statuses, true).await {
            Ok(report) => info!(?report, "Search results mirrored"),
            Err(err) => error!("MirrorTweets: {err}"),
        },
        Err(err) => error!("DeserializeSearchResponse: {err}"),
    }

    Ok(json_passthrough(result.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_account() {
        assert_eq!(
            build_search_query("amotarao", "2019-01-01").as_deref(),
            Some("from:amotarao since:2019-01-01")
        );
    }

    #[test]
    fn accounts_are_or_joined_without_whitespace() {
        assert_eq!(
            build_search_query(" a, b ,c d", "2019-01-01").as_deref(),
            Some("from:a OR from:b OR from:cd since:2019-01-01")
        );
    }

    #[test]
    fn empty_entries_are_dropped() {
        assert_eq!(
            build_search_query(",a,,b,", "2019-01-01").as_deref(),
            Some("from:a OR from:b since:2019-01-01")
        );
    }

    #[test]
    fn nothing_left_is_none() {
        assert_eq!(build_search_query(" , ,", "2019-01-01"), None);
    }
}
