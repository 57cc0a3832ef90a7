pub mod auth;
pub mod stories;
pub mod users;
