//! Research network models: related records, researchers, and the assembled graph.

use serde::{Deserialize, Serialize};

use super::Paper;
use crate::config::limits;

/// Normalized star brightness for a citation total, clamped to `[0, 1]`.
#[must_use]
pub fn star_intensity(total_citations: u64) -> f64 {
    (total_citations as f64 / limits::FULL_INTENSITY_CITATIONS).min(1.0)
}

/// PMIDs linked to one root record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPapers {
    /// Papers citing the root.
    #[serde(default)]
    pub citing: Vec<String>,

    /// Papers the root references.
    #[serde(default)]
    pub references: Vec<String>,

    /// Similar articles.
    #[serde(default)]
    pub similar: Vec<String>,
}

impl RelatedPapers {
    /// Apply the fan-out caps (20 citing, 20 references, 10 similar).
    #[must_use]
    pub fn truncated(mut self) -> Self {
        self.citing.truncate(limits::CITING);
        self.references.truncate(limits::REFERENCES);
        self.similar.truncate(limits::SIMILAR);
        self
    }

    /// PMIDs selected for full metadata: first 5 citing, 5 references, 3 similar.
    #[must_use]
    pub fn enrichment_ids(&self) -> Vec<&str> {
        self.citing
            .iter()
            .take(limits::ENRICH_CITING)
            .chain(self.references.iter().take(limits::ENRICH_REFERENCES))
            .chain(self.similar.iter().take(limits::ENRICH_SIMILAR))
            .map(String::as_str)
            .collect()
    }

    /// True when no links of any kind were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.citing.is_empty() && self.references.is_empty() && self.similar.is_empty()
    }

    /// Total number of linked PMIDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.citing.len() + self.references.len() + self.similar.len()
    }
}

/// An author name aggregated across every paper it appears on.
///
/// The name is the identity key: two people sharing a display name are one researcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Researcher {
    /// Display name.
    pub name: String,

    /// Papers the name appears on, in fold order.
    pub papers: Vec<Paper>,

    /// Sum of the author's citation counts across `papers`.
    pub total_citations: u64,

    /// `min(total_citations / 100, 1)`.
    pub star_intensity: f64,
}

impl Researcher {
    /// Start a researcher from their first appearance.
    #[must_use]
    pub fn new(name: impl Into<String>, paper: Paper, citations: u32) -> Self {
        let total_citations = u64::from(citations);
        Self {
            name: name.into(),
            papers: vec![paper],
            total_citations,
            star_intensity: star_intensity(total_citations),
        }
    }

    /// Fold in another appearance. Entries are only ever appended.
    pub fn record(&mut self, paper: Paper, citations: u32) {
        self.papers.push(paper);
        self.total_citations = self.total_citations.saturating_add(u64::from(citations));
        self.star_intensity = star_intensity(self.total_citations);
    }
}

/// A root paper, its bounded neighbourhood, and the researchers connecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchNetwork {
    /// The paper the DOI resolved to.
    pub root_paper: Paper,

    /// Researchers in first-seen order.
    pub researchers: Vec<Researcher>,

    /// Root paper first, then enriched related papers in fetch order.
    pub publications: Vec<Paper>,

    /// Links for the root paper.
    pub related_papers: RelatedPapers,

    /// Whether any citation count in the network is a placeholder.
    #[serde(default)]
    pub citation_counts_estimated: bool,
}

impl ResearchNetwork {
    /// Researchers ordered by star intensity, brightest first.
    #[must_use]
    pub fn brightest_researchers(&self) -> Vec<&Researcher> {
        let mut sorted: Vec<&Researcher> = self.researchers.iter().collect();
        sorted.sort_by(|a, b| b.total_citations.cmp(&a.total_citations));
        sorted
    }

    /// Related papers that were enriched with metadata (everything but the root).
    #[must_use]
    pub fn related_publications(&self) -> &[Paper] {
        self.publications.get(1..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_star_intensity_clamps() {
        assert!((star_intensity(0) - 0.0).abs() < f64::EPSILON);
        assert!((star_intensity(50) - 0.5).abs() < f64::EPSILON);
        assert!((star_intensity(100) - 1.0).abs() < f64::EPSILON);
        assert!((star_intensity(5_000) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_truncated_caps() {
        let related = RelatedPapers {
            citing: ids("c", 50),
            references: ids("r", 21),
            similar: ids("s", 11),
        }
        .truncated();
        assert_eq!(related.citing.len(), 20);
        assert_eq!(related.references.len(), 20);
        assert_eq!(related.similar.len(), 10);
        assert_eq!(related.citing[0], "c0");
    }

    #[test]
    fn test_enrichment_ids_order_and_caps() {
        let related = RelatedPapers {
            citing: ids("c", 20),
            references: ids("r", 2),
            similar: ids("s", 10),
        };
        let selected = related.enrichment_ids();
        assert_eq!(selected.len(), 5 + 2 + 3);
        assert_eq!(selected[0], "c0");
        assert_eq!(selected[5], "r0");
        assert_eq!(selected[7], "s0");
        assert_eq!(selected[9], "s2");
    }

    #[test]
    fn test_related_serializes_plain_keys() {
        let json = serde_json::to_value(RelatedPapers::default()).unwrap();
        assert!(json.get("citing").is_some());
        assert!(json.get("references").is_some());
        assert!(json.get("similar").is_some());
    }
}
