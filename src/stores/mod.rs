//! In-memory repositories.
//!
//! Each store owns one entity collection behind a `parking_lot::RwLock` and
//! is constructor-injected through `AppState` so tests can substitute
//! fixtures. Creation generates the id and both timestamps, updates merge
//! the provided fields and bump `updated_at`, queries are plain linear
//! scans. Last writer wins; there is no version checking.

mod chat;
mod events;
mod reports;
mod tasks;
mod users;

pub use chat::ChatStore;
pub use events::EventStore;
pub use reports::ReportStore;
pub use tasks::TaskStore;
pub use users::UserDirectory;
