//! Fuzz target for report configuration parsing.
//!
//! Tests that JSON configuration parsing handles arbitrary input without
//! panicking, and that every accepted config survives a round trip.

#![no_main]

use folio_report::ReportConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ReportConfig::from_json(text) {
        let json = config.to_json().expect("valid config serializes");
        ReportConfig::from_json(&json).expect("serialized config parses");
    }
});
