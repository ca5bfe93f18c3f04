use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE, ORIGIN},
        HeaderName, Method,
    },
    routing::get,
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    endpoints::{
        cron::{
            update_tweet_data::index::handler as cron_update_tweet_data_handler,
            update_user_data::index::handler as cron_update_user_data_handler,
        },
        lists::list::index::handler as lists_list_handler,
        search::index::handler as search_handler,
    },
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([
            ORIGIN,
            HeaderName::from_static("x-requested-with"),
            CONTENT_TYPE,
            ACCEPT,
        ]);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/lists/list", get(lists_list_handler))
        .route("/search", get(search_handler))
        .route("/cron/update_user_data", get(cron_update_user_data_handler))
        .route("/cron/update_tweet_data", get(cron_update_tweet_data_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
