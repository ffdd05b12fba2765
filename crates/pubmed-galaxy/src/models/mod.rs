//! Data models for PubMed records and the research network built from them.
//!
//! Serialized field names are camelCase to match the JSON the presentation
//! layer consumes.

mod enums;
mod inputs;
mod network;
mod paper;

pub use enums::ResponseFormat;
pub use inputs::{DoiRequest, DoiToPmidResponse, normalize_doi};
pub use network::{RelatedPapers, ResearchNetwork, Researcher, star_intensity};
pub use paper::{Author, Paper, UNKNOWN_JOURNAL, UNKNOWN_TITLE};
