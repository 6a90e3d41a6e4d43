//! Fuzz target for label parsing and composition.

#![no_main]

use folio_common::Label;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (parent, field) = input;
    let Ok(parent) = Label::parse(parent) else {
        return;
    };

    // Every accepted composition splits back into the same pair.
    match Label::compose(&parent, field) {
        Ok(composed) => {
            assert!(Label::is_field_name(field));
            assert_eq!(composed.split_last(), Some((parent.as_str(), field)));
        }
        Err(_) => assert!(!Label::is_field_name(field)),
    }
});
