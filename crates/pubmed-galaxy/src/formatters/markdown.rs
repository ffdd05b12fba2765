//! Markdown output formatting.

use std::borrow::Cow;

use crate::models::{Paper, ResearchNetwork, Researcher};

/// Abstracts longer than this are cut in Markdown output.
const ABSTRACT_PREVIEW: usize = 300;

/// Researchers listed in the Markdown summary.
const TOP_RESEARCHERS: usize = 15;

/// Format a research network as Markdown.
#[must_use]
pub fn format_network_markdown(network: &ResearchNetwork) -> String {
    let related = &network.related_papers;
    let mut output = format!(
        "# Research Network\n\n\
         **Root PMID:** {}\n\
         **Publications:** {}\n\
         **Researchers:** {}\n\
         **Linked records:** {} citing | {} references | {} similar\n\n",
        network.root_paper.pmid,
        network.publications.len(),
        network.researchers.len(),
        related.citing.len(),
        related.references.len(),
        related.similar.len(),
    );

    if network.citation_counts_estimated {
        output.push_str("> Citation counts are placeholder estimates.\n\n");
    }

    output.push_str("---\n\n");
    output.push_str(&format_paper_markdown(&network.root_paper, 1));

    let neighbours = network.related_publications();
    if !neighbours.is_empty() {
        output.push_str("\n---\n\n# Related Publications\n\n");
        for (i, paper) in neighbours.iter().enumerate() {
            output.push_str(&format_paper_markdown(paper, i + 2));
            output.push('\n');
        }
    }

    output.push_str("\n---\n\n# Brightest Researchers\n\n");
    let brightest = network.brightest_researchers();
    if brightest.is_empty() {
        output.push_str("*No researchers found.*\n");
    }
    for (i, researcher) in brightest.into_iter().take(TOP_RESEARCHERS).enumerate() {
        output.push_str(&format_researcher_markdown(researcher, i + 1));
    }

    output
}

/// Format a single paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &Paper, index: usize) -> String {
    let mut output = format!("## {}. {}\n\n", index, paper.title);

    if !paper.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", paper.author_names()));
    }

    output.push_str(&format!(
        "**Year**: {} | **Journal**: {} | **Citations**: {}\n\n",
        paper.year, paper.journal, paper.citation_count
    ));

    let mut ids = vec![format!("[PubMed]({})", paper.pubmed_url())];
    if let Some(doi) = paper.doi() {
        ids.push(format!("[DOI](https://doi.org/{doi})"));
    }
    output.push_str(&format!("**Links**: {}\n\n", ids.join(" | ")));

    if let Some(abs) = paper.abstract_text() {
        let truncated: Cow<'_, str> = match abs.char_indices().nth(ABSTRACT_PREVIEW) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &abs[..cut])),
            None => Cow::Borrowed(abs),
        };
        output.push_str(&format!("**Abstract**: {truncated}\n"));
    }

    output
}

/// Format one researcher as a Markdown list entry.
#[must_use]
pub fn format_researcher_markdown(researcher: &Researcher, index: usize) -> String {
    format!(
        "{}. **{}** - {} citations across {} papers (intensity {:.2})\n",
        index,
        researcher.name,
        researcher.total_citations,
        researcher.papers.len(),
        researcher.star_intensity
    )
}
