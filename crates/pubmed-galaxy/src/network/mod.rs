//! Research network assembly.
//!
//! Turns one DOI into a bounded graph: the root paper, up to 13 enriched
//! related papers, and the researchers connecting them. Only DOI resolution
//! and the root fetch are fatal; every other step degrades to fewer papers.

mod researchers;

pub use researchers::ResearcherIndex;

use std::sync::Arc;

use crate::models::{Paper, RelatedPapers, ResearchNetwork};

/// Record lookups the builder depends on.
///
/// Implementations never fail outward: errors are logged and surface as
/// `None` or empty links.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// DOI to PMID, `None` when there is no match or the lookup failed.
    async fn resolve_doi(&self, doi: &str) -> Option<String>;

    /// Full metadata for one PMID.
    async fn fetch_paper(&self, pmid: &str) -> Option<Paper>;

    /// Linked PMIDs for one record, capped; empty on failure.
    async fn fetch_related(&self, pmid: &str) -> RelatedPapers;
}

/// Builds a [`ResearchNetwork`] from a DOI.
#[derive(Clone)]
pub struct NetworkBuilder {
    source: Arc<dyn RecordSource>,
}

impl NetworkBuilder {
    /// Create a builder over a record source.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    /// The underlying record source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn RecordSource> {
        &self.source
    }

    /// Build the network for `doi`.
    ///
    /// Returns `None` when the DOI does not resolve or the root paper cannot be
    /// fetched. Every call runs from scratch.
    pub async fn build(&self, doi: &str) -> Option<ResearchNetwork> {
        tracing::info!(doi, "Building research network");

        let Some(root_pmid) = self.source.resolve_doi(doi).await else {
            tracing::warn!(doi, "Could not find PMID for DOI");
            return None;
        };

        let Some(root_paper) = self.source.fetch_paper(&root_pmid).await else {
            tracing::warn!(doi, pmid = %root_pmid, "Could not fetch root paper data");
            return None;
        };

        let related_papers = self.source.fetch_related(&root_pmid).await;
        let selected = related_papers.enrichment_ids();

        let mut enriched = Vec::with_capacity(selected.len());
        for pmid in selected {
            match self.source.fetch_paper(pmid).await {
                Some(paper) => enriched.push(paper),
                None => tracing::debug!(pmid, "Skipping related paper without metadata"),
            }
        }

        let network = assemble(root_paper, enriched, related_papers);

        tracing::info!(
            doi,
            pmid = %root_pmid,
            publications = network.publications.len(),
            researchers = network.researchers.len(),
            "Research network built"
        );

        Some(network)
    }
}

impl std::fmt::Debug for NetworkBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkBuilder").finish()
    }
}

/// Combine a root paper and its enriched neighbours into a network.
///
/// The root's authors are folded first, then each related paper in order.
#[must_use]
pub fn assemble(
    root_paper: Paper,
    enriched: Vec<Paper>,
    related_papers: RelatedPapers,
) -> ResearchNetwork {
    let mut publications = Vec::with_capacity(enriched.len() + 1);
    publications.push(root_paper.clone());
    publications.extend(enriched);

    let mut index = ResearcherIndex::new();
    for paper in &publications {
        index.fold(paper);
    }

    let citation_counts_estimated = publications.iter().any(|p| p.citation_count_estimated);

    ResearchNetwork {
        root_paper,
        researchers: index.into_researchers(),
        publications,
        related_papers,
        citation_counts_estimated,
    }
}
