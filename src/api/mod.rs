pub mod auth;
pub mod handlers;
pub mod query;
pub mod router;
