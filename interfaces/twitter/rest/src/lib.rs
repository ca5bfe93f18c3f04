//! Twitter REST API v1.1 client
//!
//! - `index` issues signed `GET` requests and hands back the raw body
//! - `oauth` builds OAuth 1.0a `Authorization` headers (HMAC-SHA1)
//! - `models` holds the subset of the response payloads that gets mirrored

pub mod index;
pub mod models;
pub mod oauth;
