//! Session lifecycle.
//!
//! Opaque capability tokens gate every tool operation except the one
//! that creates a session.

pub mod store;

pub use store::{Session, SessionStore, SESSION_TTL_SECS};
