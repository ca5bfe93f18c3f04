use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use interfaces_twitter_rest::{index::FetchResourceError, models::User};
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};
use tracing::{error, info};

use crate::{
    db::{
        mirror::mirror_tw_users,
        tw_user::{
            models::TwUser,
            queries::{get_tw_users_order_by_older, GetTwUsersOrderByOlderError},
        },
    },
    endpoints::response::{error_response, json_passthrough},
    state::AppState,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    GetTwUsersOrderByOlder {
        #[from]
        source: GetTwUsersOrderByOlderError,
    },

    #[error("Join: {source}")]
    Join {
        #[from]
        source: JoinError,
    },

    #[error("LookupUsers: {source}")]
    LookupUsers {
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

/// GET /cron/update_user_data
///
/// Refreshes the least recently updated accounts through `users/lookup`.
pub async fn handler(Extension(state): Extension<AppState>) -> Result<Response, HandlerError> {
    let pool = state.pool.clone();
    let limit = state.config.cron_batch_size;

    let users = spawn_blocking(move || -> Result<_, HandlerError> {
        let mut conn = pool.get()?;
        Ok(get_tw_users_order_by_older(&mut conn, limit)?)
    })
    .await??;

    refresh_users(&state, &users).await
}

/// Looks `users` up by screen name, mirrors the answer and echoes it.
/// Nothing is requested for an empty selection.
pub async fn refresh_users(state: &AppState, users: &[TwUser]) -> Result<Response, HandlerError> {
    if users.is_empty() {
        info!("No users to refresh");
        return Ok(json_passthrough("[]".to_string()));
    }

    let screen_names = users
        .iter()
        .map(|user| user.screen_name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let result = state
        .twitter
        .get("users/lookup", &[("screen_name", screen_names)])
        .await?;

    match result.parse::<Vec<User>>() {
        Ok(parsed) => match mirror_tw_users(state.pool.clone(), parsed).await {
            Ok(report) => info!(?report, "Users refreshed"),
            Err(err) => error!("MirrorTwUsers: {err}"),
        },
        Err(err) => error!("DeserializeUsersLookup: {err}"),
    }

    Ok(json_passthrough(result.body))
}
