pub mod mirror;
pub mod schema;
pub mod tw_user;
pub mod tweet;

use std::time::Duration;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Connections are opened on first use, so a missing database only
/// surfaces when an endpoint actually needs it.
pub fn build_pool(database_url: &str, max_size: u32, connection_timeout: Duration) -> PgPool {
    Pool::builder()
        .max_size(max_size)
        .min_idle(Some(0))
        .connection_timeout(connection_timeout)
        .build_unchecked(ConnectionManager::<PgConnection>::new(database_url))
}
