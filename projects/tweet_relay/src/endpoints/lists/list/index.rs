use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use interfaces_twitter_rest::index::FetchResourceError;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

use crate::{
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

    #[error("FetchLists: {source}")]
    FetchLists {
        #[from]
        source: FetchResourceError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::InvalidQuery { .. } => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            HandlerError::FetchLists { .. } => {
                error!("{self}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListsQuery {
    screen_name: Option<String>,
}

/// GET /lists/list
///
/// Lists owned by `screen_name`, or by the configured account when omitted.
pub async fn handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<ListsQuery>, QueryRejection>,
) -> Result<Response, HandlerError> {
    let Query(query) = query?;
    let screen_name = query
        .screen_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| state.config.lists_screen_name.clone());

    let result = state
        .twitter
        .get("lists/list", &[("screen_name", screen_name)])
        .await?;

    Ok(json_passthrough(result.body))
}
