//! Per-session archive tracking.

mod store;

pub use store::{ArchiveRecord, SessionStore};
