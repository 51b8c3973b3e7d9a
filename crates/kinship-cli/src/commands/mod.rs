//! Command implementations.
//!
//! Each command returns the text to print so callers (and tests) decide
//! where it goes.

pub mod identity;
pub mod query;
pub mod request;

pub use self::identity::execute_identity;
pub use self::query::{execute_friends, execute_mutual, execute_pending, execute_show};
pub use self::request::{execute_accept, execute_reject, execute_remove, execute_request};
