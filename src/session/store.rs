//! Session Store
//!
//! Issues, validates, and expires the opaque session tokens that gate
//! all tool access.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::error::{EditorError, Result};

/// Sessions live for 24 hours from creation.
pub const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

const TOKEN_BYTES: usize = 32;

/// An issued session: the token plus its expiry timestamp
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Opaque capability token (64 hex characters)
    pub token: String,
    /// Expiry as seconds since the Unix epoch
    pub expires_at: u64,
}

/// Store for active session tokens.
///
/// Cloning shares the underlying map; construct one store per server
/// instance and pass it down explicitly.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, u64>>>,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl_secs: SESSION_TTL_SECS,
            clock,
        }
    }

    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Create a new session with a fresh unique token
    pub fn new_session(&self) -> Result<Session> {
        let expires_at = self.clock.now_secs() + self.ttl_secs;
        let mut sessions = self.sessions.lock().unwrap();

        // With 256 bits of entropy a collision is a formality, but the
        // uniqueness invariant does not rely on it.
        loop {
            let token = generate_token();
            if sessions.contains_key(&token) {
                continue;
            }
            sessions.insert(token.clone(), expires_at);
            return Ok(Session { token, expires_at });
        }
    }

    /// Whether the token is known and unexpired. Never mutates state.
    pub fn validate_session(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let sessions = self.sessions.lock().unwrap();
        match sessions.get(token) {
            Some(&expires_at) => self.clock.now_secs() < expires_at,
            None => false,
        }
    }

    /// Validate and map failure to the uniform admission error
    pub fn require_valid_session(&self, token: &str) -> Result<()> {
        if self.validate_session(token) {
            Ok(())
        } else {
            Err(EditorError::InvalidSession)
        }
    }

    /// Sweep expired entries, returning how many were removed
    pub fn clear_expired_sessions(&self) -> usize {
        let now = self.clock.now_secs();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, &mut expires_at| now < expires_at);
        before - sessions.len()
    }

    /// Remove all sessions unconditionally
    pub fn clear_sessions(&self) {
        self.sessions.lock().unwrap().clear();
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }
    token
}
