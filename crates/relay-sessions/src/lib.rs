//! Session persistence and lifecycle for the mailrelay OAuth relay
//!
//! The store is a generic expiring key-value abstraction; the manager is the
//! only component that constructs or mutates `Session` records, and always
//! goes through the store's `get`/`put` contract. Session death is always
//! TTL expiry — there is no delete.

pub mod manager;
pub mod store;

pub use manager::{SessionManager, AUTHENTICATED_TTL, PENDING_TTL};
pub use store::{Clock, MemoryStore, SessionStore};
