use std::{sync::Arc, time::Duration};

use interfaces_twitter_rest::index::TwitterClient;

use crate::{
    config::Config,
    db::{build_pool, PgPool},
};

pub const DATABASE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared by every handler through an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: PgPool,
    pub twitter: TwitterClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pool = build_pool(
            &config.database_url,
            config.database_pool_size,
            DATABASE_CONNECTION_TIMEOUT,
        );
        Self::from_parts(config, pool)
    }

    pub fn from_parts(config: Config, pool: PgPool) -> Self {
        let twitter = TwitterClient::new(
            config.credentials.clone(),
            config.twitter_api_base_url.clone(),
        );

        Self {
            config: Arc::new(config),
            pool,
            twitter,
        }
    }
}
