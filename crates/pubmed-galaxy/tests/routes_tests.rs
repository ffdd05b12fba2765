//! HTTP route tests: real router, real client, mocked E-utilities.

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{mount_links, mount_record, mount_search, test_client};
use pubmed_galaxy::models::{Paper, RelatedPapers};
use pubmed_galaxy::network::{NetworkBuilder, RecordSource};
use pubmed_galaxy::server::routes::create_router;

fn app(mock_server: &MockServer) -> Router {
    let builder = NetworkBuilder::new(Arc::new(test_client(mock_server)));
    create_router(builder, None)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Fail the test if efetch or elink is ever called.
async fn forbid_record_calls(mock_server: &MockServer) {
    for endpoint in ["/efetch.fcgi", "/elink.fcgi"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(mock_server)
            .await;
    }
}

// =============================================================================
// /api/health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;

    let (status, body) =
        send(app(&mock_server), Request::get("/api/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "pubmed-galaxy");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

// =============================================================================
// /api/research-network
// =============================================================================

#[tokio::test]
async fn test_research_network_missing_doi() {
    let mock_server = MockServer::start().await;

    for body in [r"{}", r#"{"doi": ""}"#, r#"{"doi": "   "}"#, r#"{"doi": null}"#, "not json"] {
        let (status, reply) =
            send(app(&mock_server), post_json("/api/research-network", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(reply, json!({"error": "DOI is required"}));
    }

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_research_network_unresolved_doi() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "10.9999/unknown", &[]).await;
    forbid_record_calls(&mock_server).await;

    let (status, body) = send(
        app(&mock_server),
        post_json("/api/research-network", r#"{"doi": "10.9999/unknown"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Could not fetch research data for this DOI"}));
}

#[tokio::test]
async fn test_research_network_root_fetch_failure() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "10.1/x", &["1"]).await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<PubmedArticleSet/>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/elink.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) =
        send(app(&mock_server), post_json("/api/research-network", r#"{"doi": "10.1/x"}"#)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Could not fetch research data for this DOI");
}

#[tokio::test]
async fn test_research_network_success_shape() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "10.1000/root", &["1"]).await;
    mount_record(&mock_server, "1", "Root paper", &[("Ada", "Lovelace"), ("Alan", "Turing")])
        .await;
    mount_record(&mock_server, "2", "Citing paper", &[("Ada", "Lovelace")]).await;
    mount_record(&mock_server, "3", "Referenced paper", &[("Grace", "Hopper")]).await;
    mount_links(&mock_server, "1", &["2"], &["3"], &["4"]).await;

    // PMID 4 has no record: it is listed but not enriched.
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<PubmedArticleSet/>"))
        .mount(&mock_server)
        .await;

    let (status, body) = send(
        app(&mock_server),
        post_json("/api/research-network", r#"{"doi": "https://doi.org/10.1000/root"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["rootPaper"]["pmid"], "1");
    assert_eq!(body["rootPaper"]["title"], "Root paper");
    assert_eq!(body["rootPaper"]["doi"], "10.1000/1");
    assert_eq!(body["rootPaper"]["citationCount"], 3);
    assert_eq!(body["rootPaper"]["authors"][0]["fullName"], "Ada Lovelace");
    assert_eq!(body["rootPaper"]["authors"][0]["firstName"], "Ada");
    assert_eq!(body["rootPaper"]["authors"][0]["lastName"], "Lovelace");
    assert_eq!(body["rootPaper"]["authors"][0]["citationCount"], 10);

    let pmids: Vec<&str> =
        body["publications"].as_array().unwrap().iter().map(|p| p["pmid"].as_str().unwrap()).collect();
    assert_eq!(pmids, vec!["1", "2", "3"]);

    assert_eq!(body["relatedPapers"], json!({"citing": ["2"], "references": ["3"], "similar": ["4"]}));

    let researchers = body["researchers"].as_array().unwrap();
    assert_eq!(researchers.len(), 3);
    assert_eq!(researchers[0]["name"], "Ada Lovelace");
    assert_eq!(researchers[0]["totalCitations"], 20);
    assert_eq!(researchers[0]["papers"].as_array().unwrap().len(), 2);
    assert!((researchers[0]["starIntensity"].as_f64().unwrap() - 0.2).abs() < 1e-9);

    assert_eq!(body["citationCountsEstimated"], true);
}

/// Record source whose lookups panic mid-build.
struct PanickingSource;

#[async_trait::async_trait]
impl RecordSource for PanickingSource {
    async fn resolve_doi(&self, _doi: &str) -> Option<String> {
        panic!("resolver blew up");
    }

    async fn fetch_paper(&self, _pmid: &str) -> Option<Paper> {
        None
    }

    async fn fetch_related(&self, _pmid: &str) -> RelatedPapers {
        RelatedPapers::default()
    }
}

#[tokio::test]
async fn test_research_network_task_failure_is_internal_error() {
    let app = create_router(NetworkBuilder::new(Arc::new(PanickingSource)), None);

    let (status, body) =
        send(app, post_json("/api/research-network", r#"{"doi": "10.1/x"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error while fetching research data"}));
}

// =============================================================================
// /api/doi-to-pmid
// =============================================================================

#[tokio::test]
async fn test_doi_to_pmid_success() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "10.1038/nature12373", &["23831765"]).await;
    forbid_record_calls(&mock_server).await;

    let (status, body) = send(
        app(&mock_server),
        post_json("/api/doi-to-pmid", r#"{"doi": "doi:10.1038/nature12373"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"doi": "10.1038/nature12373", "pmid": "23831765"}));
}

#[tokio::test]
async fn test_doi_to_pmid_not_found() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, "10.9999/unknown", &[]).await;

    let (status, body) =
        send(app(&mock_server), post_json("/api/doi-to-pmid", r#"{"doi": "10.9999/unknown"}"#))
            .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Could not find PMID for this DOI"}));
}

#[tokio::test]
async fn test_doi_to_pmid_missing_doi() {
    let mock_server = MockServer::start().await;

    let (status, body) = send(app(&mock_server), post_json("/api/doi-to-pmid", "{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "DOI is required");
}

#[tokio::test]
async fn test_doi_to_pmid_upstream_error_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let (status, _) =
        send(app(&mock_server), post_json("/api/doi-to-pmid", r#"{"doi": "10.1/x"}"#)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Static bundle
// =============================================================================

#[tokio::test]
async fn test_static_dir_serves_unmatched_paths() {
    let mock_server = MockServer::start().await;

    let dir = std::env::temp_dir().join(format!("pubmed-galaxy-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>galaxy</h1>").unwrap();

    let builder = NetworkBuilder::new(Arc::new(test_client(&mock_server)));
    let app = create_router(builder, Some(dir.clone()));

    let response = app
        .clone()
        .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"<h1>galaxy</h1>");

    let response =
        app.oneshot(Request::get("/api/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    std::fs::remove_dir_all(dir).ok();
}
