pub mod cron;
pub mod lists;
pub mod response;
pub mod search;
