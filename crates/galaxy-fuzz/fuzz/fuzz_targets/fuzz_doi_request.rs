#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_galaxy::models::DoiRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(req) = serde_json::from_slice::<DoiRequest>(data) {
        if let Some(doi) = req.normalized_doi() {
            assert!(!doi.is_empty());
        }
    }
});
