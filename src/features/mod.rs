pub mod admin;
pub mod auth;
pub mod form;
pub mod location;
pub mod map;
pub mod reports;
