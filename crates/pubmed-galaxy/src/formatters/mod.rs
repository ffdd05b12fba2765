//! Output formatters for Markdown and JSON.

mod json;
mod markdown;

pub use self::json::*;
pub use markdown::*;

use crate::models::{ResearchNetwork, ResponseFormat};

/// Render a network in the requested format.
pub fn render_network(
    network: &ResearchNetwork,
    format: ResponseFormat,
) -> serde_json::Result<String> {
    match format {
        ResponseFormat::Markdown => Ok(format_network_markdown(network)),
        ResponseFormat::Json => serde_json::to_string_pretty(&compact_network(network)),
    }
}
