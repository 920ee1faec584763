//! Shared types, error types, and the session data model for mailrelay

pub mod errors;
pub mod session;

pub use errors::{AppError, AppResult};
pub use session::{Session, SessionStatus, TokenSet};
