//! Shared fixtures for mock E-utilities responses.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_galaxy::PubMedClient;
use pubmed_galaxy::citations::FixedCitations;
use pubmed_galaxy::config::Config;

/// Client against a mock server, no rate limiting, fixed citation counts.
pub fn test_client(mock_server: &MockServer) -> PubMedClient {
    let config = Config::for_testing(&mock_server.uri());
    PubMedClient::new(config).unwrap().with_citations(Arc::new(FixedCitations::new(10, 3)))
}

/// An efetch payload for one article.
pub fn efetch_xml(pmid: &str, title: &str, authors: &[(&str, &str)]) -> String {
    let authors: String = authors
        .iter()
        .map(|(first, last)| {
            format!(
                "<Author ValidYN=\"Y\"><LastName>{last}</LastName><ForeName>{first}</ForeName></Author>"
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" ?>
<PubmedArticleSet>
<PubmedArticle>
  <MedlineCitation Status="MEDLINE" Owner="NLM">
    <PMID Version="1">{pmid}</PMID>
    <Article PubModel="Print">
      <Journal>
        <JournalIssue CitedMedium="Internet">
          <PubDate><Year>2020</Year><Month>Mar</Month></PubDate>
        </JournalIssue>
        <Title>Journal of Tests</Title>
      </Journal>
      <ArticleTitle>{title}</ArticleTitle>
      <Abstract><AbstractText>Abstract for {pmid}.</AbstractText></Abstract>
      <AuthorList CompleteYN="Y">{authors}</AuthorList>
    </Article>
  </MedlineCitation>
  <PubmedData>
    <ArticleIdList>
      <ArticleId IdType="pubmed">{pmid}</ArticleId>
      <ArticleId IdType="doi">10.1000/{pmid}</ArticleId>
    </ArticleIdList>
  </PubmedData>
</PubmedArticle>
</PubmedArticleSet>"#
    )
}

/// An esearch payload listing `ids`.
pub fn esearch_json(ids: &[&str]) -> serde_json::Value {
    json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": ids.len().to_string(),
            "retmax": ids.len().to_string(),
            "retstart": "0",
            "idlist": ids,
        }
    })
}

/// An elink payload with the three link categories.
pub fn elink_json(
    pmid: &str,
    citing: &[&str],
    references: &[&str],
    similar: &[&str],
) -> serde_json::Value {
    json!({
        "header": {"type": "elink", "version": "0.3"},
        "linksets": [{
            "dbfrom": "pubmed",
            "ids": [pmid],
            "linksetdbs": [
                {"dbto": "pubmed", "linkname": "pubmed_pubmed", "links": similar},
                {"dbto": "pubmed", "linkname": "pubmed_pubmed_citedin", "links": citing},
                {"dbto": "pubmed", "linkname": "pubmed_pubmed_refs", "links": references},
            ]
        }]
    })
}

/// Mount an esearch mock answering `doi` with `ids`.
pub async fn mount_search(mock_server: &MockServer, doi: &str, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", doi))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_json(ids)))
        .mount(mock_server)
        .await;
}

/// Mount an efetch mock for one PMID.
pub async fn mount_record(mock_server: &MockServer, pmid: &str, title: &str, authors: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", pmid))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(efetch_xml(pmid, title, authors))
                .insert_header("Content-Type", "text/xml"),
        )
        .mount(mock_server)
        .await;
}

/// Mount an elink mock for one PMID.
pub async fn mount_links(
    mock_server: &MockServer,
    pmid: &str,
    citing: &[&str],
    references: &[&str],
    similar: &[&str],
) {
    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .and(query_param("id", pmid))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(elink_json(pmid, citing, references, similar)),
        )
        .mount(mock_server)
        .await;
}
