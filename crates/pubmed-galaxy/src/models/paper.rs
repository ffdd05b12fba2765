//! Paper and author models built from PubMed efetch records.

use serde::{Deserialize, Serialize};

/// Title used when a record has no `ArticleTitle`.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Journal used when a record has no journal title.
pub const UNKNOWN_JOURNAL: &str = "Unknown Journal";

/// An author as listed on one paper.
///
/// Authors are not deduplicated at fetch time; see [`super::Researcher`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Given name (`ForeName`), possibly empty.
    #[serde(default)]
    pub first_name: String,

    /// Family name (`LastName`).
    pub last_name: String,

    /// Display name, `"{first} {last}"`.
    pub full_name: String,

    /// Citation count attributed to this author on this paper.
    #[serde(default)]
    pub citation_count: u32,
}

impl Author {
    /// Create an author, deriving the display name.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let full_name = format!("{first_name} {last_name}").trim().to_string();
        Self { first_name, last_name, full_name, citation_count: 0 }
    }

    /// Set the citation count.
    #[must_use]
    pub const fn with_citations(mut self, citation_count: u32) -> Self {
        self.citation_count = citation_count;
        self
    }
}

/// A PubMed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// PubMed identifier.
    pub pmid: String,

    /// Digital Object Identifier, empty when the record has none.
    #[serde(default)]
    pub doi: String,

    /// Article title.
    pub title: String,

    /// Abstract text, empty when the record has none.
    #[serde(default)]
    pub r#abstract: String,

    /// Authors in record order.
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Journal title.
    pub journal: String,

    /// Publication year.
    pub year: i32,

    /// Citation count for the paper.
    #[serde(default)]
    pub citation_count: u32,

    /// Whether `citation_count` and the authors' counts are placeholders.
    #[serde(default)]
    pub citation_count_estimated: bool,
}

impl Paper {
    /// Get the DOI if the record carried one.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        Some(self.doi.as_str()).filter(|d| !d.is_empty())
    }

    /// Get the abstract if the record carried one.
    #[must_use]
    pub fn abstract_text(&self) -> Option<&str> {
        Some(self.r#abstract.as_str()).filter(|a| !a.is_empty())
    }

    /// Get the first author's display name if available.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(|a| a.full_name.as_str())
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.iter().map(|a| a.full_name.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// PubMed landing page.
    #[must_use]
    pub fn pubmed_url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.pmid)
    }
}
