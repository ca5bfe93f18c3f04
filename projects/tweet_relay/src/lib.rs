//! Twitter relay service
//!
//! - REST API endpoints in `endpoints/`, wired up in `router`
//! - PostgreSQL models, queries and the mirroring helper in `db/`
//! - Requires the upstream OAuth credentials and DATABASE_URL env vars (see `config`)

pub mod config;
pub mod db;
pub mod endpoints;
pub mod router;
pub mod state;
