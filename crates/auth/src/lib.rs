//! `invtrack-auth` — operator login gate.
//!
//! A single built-in operator account and a persisted "logged in" flag. This is
//! an access gate for the UI surface, not a security boundary: there are no
//! tokens, no hashing and no per-user data.

pub mod credentials;
pub mod session;

pub use credentials::{Credentials, authenticate};
pub use session::Session;
