#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_galaxy::client::parse::{decode_entities, parse_efetch};

fuzz_target!(|data: &[u8]| {
    // Arbitrary text as an efetch payload: Ok or RecordMissing, never a panic
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = parse_efetch(xml, "1");
        let _ = decode_entities(xml);
    }
});
