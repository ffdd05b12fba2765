//! Request and response bodies for the inbound HTTP API.

use serde::{Deserialize, Serialize};

/// Prefixes stripped from user-supplied DOIs, matched case-insensitively.
const DOI_PREFIXES: &[&str] =
    &["https://doi.org/", "http://doi.org/", "https://dx.doi.org/", "http://dx.doi.org/", "doi:"];

/// Body of `POST /api/research-network` and `POST /api/doi-to-pmid`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoiRequest {
    /// DOI as typed by the user.
    #[serde(default)]
    pub doi: Option<String>,
}

impl DoiRequest {
    /// The normalized DOI, or `None` when missing or blank.
    #[must_use]
    pub fn normalized_doi(&self) -> Option<String> {
        self.doi.as_deref().and_then(normalize_doi)
    }
}

/// Body returned by `POST /api/doi-to-pmid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoiToPmidResponse {
    /// Normalized DOI.
    pub doi: String,

    /// Matching PubMed identifier.
    pub pmid: String,
}

/// Trim a DOI and strip resolver URL or `doi:` prefixes.
///
/// Returns `None` when nothing is left.
#[must_use]
pub fn normalize_doi(raw: &str) -> Option<String> {
    let mut doi = raw.trim();
    for prefix in DOI_PREFIXES {
        if doi.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix)) {
            doi = doi[prefix.len()..].trim_start();
            break;
        }
    }
    (!doi.is_empty()).then(|| doi.to_string())
}
