//! Compact JSON output.
//!
//! Researchers reference papers by PMID instead of embedding full copies.

use serde_json::{Value, json};

use crate::models::{Paper, ResearchNetwork, Researcher};

/// Create a compact paper representation (no abstract, author names only).
#[must_use]
pub fn compact_paper(paper: &Paper) -> Value {
    let mut obj = json!({
        "pmid": paper.pmid,
        "title": paper.title,
        "journal": paper.journal,
        "year": paper.year,
        "citations": paper.citation_count,
        "authors": paper.authors.iter().map(|a| a.full_name.as_str()).collect::<Vec<_>>(),
    });

    if let Some(doi) = paper.doi() {
        obj["doi"] = json!(doi);
    }

    obj
}

/// Create a compact researcher representation.
#[must_use]
pub fn compact_researcher(researcher: &Researcher) -> Value {
    json!({
        "name": researcher.name,
        "totalCitations": researcher.total_citations,
        "starIntensity": researcher.star_intensity,
        "pmids": researcher.papers.iter().map(|p| p.pmid.as_str()).collect::<Vec<_>>(),
    })
}

/// Create a compact network representation.
#[must_use]
pub fn compact_network(network: &ResearchNetwork) -> Value {
    json!({
        "root": compact_paper(&network.root_paper),
        "publications": network.publications.iter().map(compact_paper).collect::<Vec<_>>(),
        "researchers": network.researchers.iter().map(compact_researcher).collect::<Vec<_>>(),
        "related": network.related_papers,
        "citationCountsEstimated": network.citation_counts_estimated,
    })
}
