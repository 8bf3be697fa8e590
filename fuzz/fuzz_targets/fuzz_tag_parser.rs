//! Fuzz target: tag parser and label resolution
//!
//! Feeds arbitrary UTF-8 device names through the parser and verifies:
//! - No panics on any input (multi-byte chars, stray delimiters)
//! - Every tag is delimited and appears verbatim in the name
//! - The resolved group is one of the tags and never a reserved tag
//!
//! cargo fuzz run fuzz_tag_parser

#![no_main]

use airlock::tags::{TagKind, TagScheme};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(name) = core::str::from_utf8(data) else {
        return;
    };

    let scheme = TagScheme::default();
    let labels = scheme.labels(name);

    for tag in &labels.tags {
        let t = tag.as_str();
        assert!(t.starts_with('[') && t.ends_with(']'), "undelimited tag {t:?}");
        assert!(name.contains(t), "tag {t:?} not in name");
    }

    if let Some(group) = &labels.group {
        assert!(labels.tags.contains(group));
        assert_eq!(scheme.interpret(group), TagKind::Group);
    }
});
