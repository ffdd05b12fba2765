//! Name-keyed researcher aggregation.

use std::collections::HashMap;

use crate::models::{Paper, Researcher};

/// Folds paper authors into researchers, keyed by exact display name.
///
/// Researchers keep first-seen order. Entries are created or extended, never removed.
#[derive(Debug, Default)]
pub struct ResearcherIndex {
    researchers: Vec<Researcher>,
    by_name: HashMap<String, usize>,
}

impl ResearcherIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every author of `paper` into the index.
    pub fn fold(&mut self, paper: &Paper) {
        for author in &paper.authors {
            match self.by_name.get(&author.full_name) {
                Some(&slot) => self.researchers[slot].record(paper.clone(), author.citation_count),
                None => {
                    self.by_name.insert(author.full_name.clone(), self.researchers.len());
                    self.researchers.push(Researcher::new(
                        author.full_name.clone(),
                        paper.clone(),
                        author.citation_count,
                    ));
                }
            }
        }
    }

    /// Look up a researcher by display name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Researcher> {
        self.by_name.get(name).map(|&slot| &self.researchers[slot])
    }

    /// Number of distinct names seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.researchers.len()
    }

    /// True when no author has been folded in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.researchers.is_empty()
    }

    /// Researchers in first-seen order.
    #[must_use]
    pub fn into_researchers(self) -> Vec<Researcher> {
        self.researchers
    }
}
