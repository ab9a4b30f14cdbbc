pub mod analytics;
pub mod auth;
pub mod chat;
pub mod events;
pub mod health;
pub mod reports;
pub mod tasks;
pub mod users;
