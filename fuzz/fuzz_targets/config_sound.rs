#![no_main]
use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use ptpconf::{parse, render, render_synce};

fuzz_target!(|text: &str| {
    if let Ok(document) = parse(text) {
        assert_eq!(document.sections().iter().filter(|s| s.is_global()).count(), 1);

        // Rendered output must parse to the same sections
        let rendered = render(&document, "fuzz");
        let reparsed = parse(&rendered.text).unwrap();
        assert_eq!(document.sections(), reparsed.sections());

        let _ = render_synce(&document, "fuzz", &HashMap::<String, String>::new());
    }
});
