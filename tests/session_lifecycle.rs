//! Integration tests for the session lifecycle.
//!
//! These exercise the store the way the server uses it: many
//! concurrent callers creating sessions, plus expiry and sweeping.

use std::collections::HashSet;
use std::thread;

use code_editor::SessionStore;

const THREADS: usize = 16;
const SESSIONS_PER_THREAD: usize = 25;

#[test]
fn concurrent_creation_yields_unique_valid_tokens() {
    let store = SessionStore::new();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                (0..SESSIONS_PER_THREAD)
                    .map(|_| store.new_session().unwrap().token)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut tokens = HashSet::new();
    for handle in handles {
        for token in handle.join().unwrap() {
            assert!(store.validate_session(&token));
            assert!(tokens.insert(token), "duplicate token issued");
        }
    }

    assert_eq!(tokens.len(), THREADS * SESSIONS_PER_THREAD);
    assert_eq!(store.session_count(), THREADS * SESSIONS_PER_THREAD);
}

#[test]
fn tokens_are_64_hex_characters() {
    let store = SessionStore::new();
    let session = store.new_session().unwrap();

    assert_eq!(session.token.len(), 64);
    assert!(session.token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn validation_never_errors_on_garbage() {
    let store = SessionStore::new();

    assert!(!store.validate_session(""));
    assert!(!store.validate_session("bogus"));
    assert!(!store.validate_session(&"f".repeat(64)));
}

#[test]
fn zero_ttl_token_is_immediately_expired() {
    let store = SessionStore::new().with_ttl(0);
    let session = store.new_session().unwrap();

    assert!(!store.validate_session(&session.token));
    // Still physically present until swept
    assert_eq!(store.session_count(), 1);

    assert_eq!(store.clear_expired_sessions(), 1);
    assert_eq!(store.session_count(), 0);
}

#[test]
fn sweep_spares_unexpired_sessions() {
    let store = SessionStore::new();
    let session = store.new_session().unwrap();

    assert_eq!(store.clear_expired_sessions(), 0);
    assert!(store.validate_session(&session.token));
}

#[test]
fn clear_sessions_invalidates_everything() {
    let store = SessionStore::new();
    let session = store.new_session().unwrap();

    store.clear_sessions();
    assert!(!store.validate_session(&session.token));
    assert_eq!(store.session_count(), 0);
}
