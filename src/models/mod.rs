pub mod event;
pub mod message;
pub mod report;
pub mod task;
pub mod user;
