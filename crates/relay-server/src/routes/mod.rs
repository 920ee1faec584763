//! HTTP route handlers
//!
//! Thin adapters between the wire protocol and the registry / session
//! manager / broker. Validation and status-code mapping happen here; the
//! handlers hold no state of their own.

pub mod callback;
pub mod initiate;
pub mod login;
pub mod poll;
pub mod refresh;

pub use callback::callback;
pub use initiate::initiate;
pub use login::login;
pub use poll::poll;
pub use refresh::refresh;
