#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_galaxy::client::parse::{LinkResponse, SearchResponse};

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<SearchResponse>(data);
    if let Ok(links) = serde_json::from_slice::<LinkResponse>(data) {
        let related = links.into_related();
        assert!(related.enrichment_ids().len() <= 13);
    }
});
