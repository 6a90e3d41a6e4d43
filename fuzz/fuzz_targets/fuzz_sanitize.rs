//! Fuzz target for title sanitization.
//!
//! Checks the token invariants for arbitrary titles: bounded length,
//! restricted alphabet, never empty, and idempotence.

#![no_main]

use folio_common::sanitize::{sanitize, MAX_TOKEN_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|title: &str| {
    let token = sanitize(title);
    assert!(!token.is_empty());
    assert!(token.chars().count() <= MAX_TOKEN_LEN);
    assert!(token
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    assert_eq!(sanitize(&token), token);
});
