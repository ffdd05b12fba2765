//! Citation counts for parsed records.
//!
//! PubMed efetch records carry no citation counts. Counts are supplied by a
//! [`CitationSource`]; the default [`PlaceholderCitations`] draws random
//! values and marks them as estimated so the data contract stays honest.

use rand::Rng;

use crate::models::{Author, Paper};

/// Upper bound (exclusive) for placeholder per-author counts.
pub const PLACEHOLDER_AUTHOR_MAX: u32 = 1000;

/// Upper bound (exclusive) for placeholder per-paper counts.
pub const PLACEHOLDER_PAPER_MAX: u32 = 50;

/// Supplies citation counts for a freshly parsed paper.
pub trait CitationSource: Send + Sync {
    /// Citation count for the paper itself.
    fn paper_citations(&self, paper: &Paper) -> u32;

    /// Citation count attributed to one author of the paper.
    fn author_citations(&self, paper: &Paper, author: &Author) -> u32;

    /// Whether the counts are stand-ins rather than real data.
    fn is_estimated(&self) -> bool;

    /// Fill in every count on `paper`.
    fn annotate(&self, mut paper: Paper) -> Paper {
        let counts: Vec<u32> =
            paper.authors.iter().map(|author| self.author_citations(&paper, author)).collect();
        for (author, count) in paper.authors.iter_mut().zip(counts) {
            author.citation_count = count;
        }
        paper.citation_count = self.paper_citations(&paper);
        paper.citation_count_estimated = self.is_estimated();
        paper
    }
}

/// Uniform random counts: `[0, 1000)` per author, `[0, 50)` per paper.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCitations;

impl CitationSource for PlaceholderCitations {
    fn paper_citations(&self, _paper: &Paper) -> u32 {
        rand::thread_rng().gen_range(0..PLACEHOLDER_PAPER_MAX)
    }

    fn author_citations(&self, _paper: &Paper, _author: &Author) -> u32 {
        rand::thread_rng().gen_range(0..PLACEHOLDER_AUTHOR_MAX)
    }

    fn is_estimated(&self) -> bool {
        true
    }
}

/// Constant counts. Deterministic stand-in for demos and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCitations {
    /// Count given to every author.
    pub per_author: u32,
    /// Count given to every paper.
    pub per_paper: u32,
}

impl FixedCitations {
    /// Create a fixed source.
    #[must_use]
    pub const fn new(per_author: u32, per_paper: u32) -> Self {
        Self { per_author, per_paper }
    }
}

impl CitationSource for FixedCitations {
    fn paper_citations(&self, _paper: &Paper) -> u32 {
        self.per_paper
    }

    fn author_citations(&self, _paper: &Paper, _author: &Author) -> u32 {
        self.per_author
    }

    fn is_estimated(&self) -> bool {
        true
    }
}
