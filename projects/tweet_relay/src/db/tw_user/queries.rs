use diesel::{pg::Pg, prelude::*};
use thiserror::Error;

use crate::db::{
    schema::tw_users::{dsl::*, BoxedQuery},
    tw_user::models::*,
};

#[derive(Debug, Error)]
pub enum UpsertTwUserError {
    #[error("UpsertTwUser: {source}")]
    UpsertTwUser {
        #[from]
        source: diesel::result::Error,
    },
}

/// Insert, or overwrite every column of the row with the same `id_str`.
pub fn upsert_tw_user(
    conn: &mut PgConnection,
    new: &NewTwUser,
) -> Result<TwUser, UpsertTwUserError> {
    diesel::insert_into(tw_users)
        .values(new)
        .on_conflict(id_str)
        .do_update()
        .set(new)
        .returning(TwUser::as_returning())
        .get_result(conn)
        .map_err(|source| UpsertTwUserError::UpsertTwUser { source })
}

#[derive(Debug, Error)]
pub enum GetTwUsersOrderByOlderError {
    #[error("GetTwUsersOrderByOlder: {source}")]
    GetTwUsersOrderByOlder {
        #[from]
        source: diesel::result::Error,
    },
}

/// Least recently refreshed accounts first.
pub fn tw_users_order_by_older(limit_val: i64) -> BoxedQuery<'static, Pg> {
    tw_users
        .order((updated_at.asc(), id_str.asc()))
        .limit(limit_val)
        .into_boxed()
}

pub fn get_tw_users_order_by_older(
    conn: &mut PgConnection,
    limit_val: i64,
) -> Result<Vec<TwUser>, GetTwUsersOrderByOlderError> {
    tw_users_order_by_older(limit_val)
        .select(TwUser::as_select())
        .load(conn)
        .map_err(|source| GetTwUsersOrderByOlderError::GetTwUsersOrderByOlder { source })
}
