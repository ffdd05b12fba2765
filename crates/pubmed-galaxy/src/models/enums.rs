//! Enum types for command-line options.

use serde::{Deserialize, Serialize};

/// Output format for rendered networks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown.
    #[default]
    Markdown,
    /// Compact JSON.
    Json,
}
