//! Response parsing for esearch, efetch and elink.
//!
//! efetch XML is read by pattern matching rather than a full XML parser: only a
//! handful of fields are needed and PubMed's layout for them is stable.

use std::sync::LazyLock;

use chrono::Datelike;
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer};

use crate::config::links;
use crate::error::{ClientError, ClientResult};
use crate::models::{Author, Paper, RelatedPapers, UNKNOWN_JOURNAL, UNKNOWN_TITLE};

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("valid efetch pattern")
}

static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<PubmedArticle(?:\s[^>]*)?>(.*?)</PubmedArticle>"));
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<ArticleTitle(?:\s[^>]*)?>(.*?)</ArticleTitle>"));
static ABSTRACT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<Abstract(?:\s[^>]*)?>(.*?)</Abstract>"));
static ABSTRACT: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<AbstractText(?:\s[^>]*)?>(.*?)</AbstractText>"));
static DOI: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"(?s)<ArticleId IdType="doi">(.*?)</ArticleId>"#));
static ELOCATION_DOI: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"(?s)<ELocationID EIdType="doi"[^>]*>(.*?)</ELocationID>"#));
static PUB_DATE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<PubDate>(.*?)</PubDate>"));
static YEAR: LazyLock<Regex> = LazyLock::new(|| pattern(r"<Year>(\d{4})</Year>"));
static MEDLINE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<MedlineDate>\D*(\d{4})"));
static JOURNAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<Journal>.*?<Title>(.*?)</Title>"));
static AUTHOR_LIST: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<AuthorList(?:\s[^>]*)?>(.*?)</AuthorList>"));
static AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<Author(?:\s[^>]*)?>(.*?)</Author>"));
static LAST_NAME: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<LastName>(.*?)</LastName>"));
static FORE_NAME: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<ForeName>(.*?)</ForeName>"));
static TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"<[^>]*>"));
static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"&#(x[0-9a-fA-F]+|[0-9]+);"));

/// First capture group of `re` in `haystack`.
fn capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Decode the predefined XML entities and numeric character references.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &Captures<'_>| {
        let code = &caps[1];
        let value = code
            .strip_prefix('x')
            .map_or_else(|| code.parse().ok(), |hex| u32::from_str_radix(hex, 16).ok());
        value.and_then(char::from_u32).map_or_else(|| caps[0].to_string(), String::from)
    });

    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<".
    numeric.replace("&amp;", "&")
}

/// Strip inline markup (`<i>`, `<sup>`, ...) and decode entities.
fn clean_text(raw: &str) -> String {
    decode_entities(TAG.replace_all(raw, "").trim())
}

/// Parse the first `PubmedArticle` of an efetch payload.
///
/// Citation counts are left at zero for a [`crate::citations::CitationSource`] to fill.
///
/// # Errors
///
/// Returns [`ClientError::RecordMissing`] when the payload has no article.
pub fn parse_efetch(xml: &str, pmid: &str) -> ClientResult<Paper> {
    let article = capture(&ARTICLE, xml).ok_or_else(|| ClientError::record_missing(pmid))?;

    let title = capture(&TITLE, article)
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    // Sections of the primary abstract only; OtherAbstract translations are skipped.
    let r#abstract = ABSTRACT
        .captures_iter(capture(&ABSTRACT_BLOCK, article).unwrap_or_default())
        .filter_map(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let doi = capture(&DOI, article)
        .or_else(|| capture(&ELOCATION_DOI, article))
        .map(clean_text)
        .unwrap_or_default();

    let year = capture(&PUB_DATE, article)
        .and_then(|date| capture(&YEAR, date).or_else(|| capture(&MEDLINE_YEAR, date)))
        .and_then(|y| y.parse().ok())
        .unwrap_or_else(|| chrono::Utc::now().year());

    let journal = capture(&JOURNAL, article)
        .map(clean_text)
        .filter(|j| !j.is_empty())
        .unwrap_or_else(|| UNKNOWN_JOURNAL.to_string());

    Ok(Paper {
        pmid: pmid.to_string(),
        doi,
        title,
        r#abstract,
        authors: parse_authors(article),
        journal,
        year,
        citation_count: 0,
        citation_count_estimated: false,
    })
}

/// Authors of the first `AuthorList`. Entries without a `LastName` are skipped.
fn parse_authors(article: &str) -> Vec<Author> {
    let Some(list) = capture(&AUTHOR_LIST, article) else {
        return Vec::new();
    };

    AUTHOR
        .captures_iter(list)
        .filter_map(|c| c.get(1))
        .filter_map(|block| {
            let block = block.as_str();
            let last = clean_text(capture(&LAST_NAME, block)?);
            let first = capture(&FORE_NAME, block).map(clean_text).unwrap_or_default();
            Some(Author::new(first, last))
        })
        .collect()
}

/// Accept ids as JSON strings or numbers.
fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    let raw = Vec::<RawId>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|id| match id {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        })
        .collect())
}

/// esearch JSON envelope.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Search result body.
    pub esearchresult: SearchResult,
}

/// esearch result body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    /// Matching PMIDs.
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub idlist: Vec<String>,

    /// Error reported by E-utilities, if any.
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
}

/// elink JSON envelope.
#[derive(Debug, Default, Deserialize)]
pub struct LinkResponse {
    /// One linkset per requested id.
    #[serde(default)]
    pub linksets: Vec<LinkSet>,
}

/// Links for one source id.
#[derive(Debug, Default, Deserialize)]
pub struct LinkSet {
    /// One entry per link name.
    #[serde(default)]
    pub linksetdbs: Vec<LinkSetDb>,
}

/// Linked ids under one link name.
#[derive(Debug, Default, Deserialize)]
pub struct LinkSetDb {
    /// E-utilities link name, e.g. `pubmed_pubmed_citedin`.
    #[serde(default)]
    pub linkname: String,

    /// Linked PMIDs.
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub links: Vec<String>,
}

impl LinkResponse {
    /// Sort links into the three categories and apply the caps.
    ///
    /// Unknown link names are ignored; a repeated link name replaces the earlier list.
    #[must_use]
    pub fn into_related(self) -> RelatedPapers {
        let mut related = RelatedPapers::default();
        for db in self.linksets.into_iter().flat_map(|set| set.linksetdbs) {
            match db.linkname.as_str() {
                links::CITED_IN => related.citing = db.links,
                links::REFERENCES => related.references = db.links,
                links::SIMILAR => related.similar = db.links,
                other => tracing::trace!(linkname = other, "Ignoring link category"),
            }
        }
        related.truncated()
    }
}
