//! End-to-end grab flow: real SQLite database, HTTP origin via wiremock,
//! redirect and proxy grabs, audit trail, and ZIP bundling.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nzb_grab::store::{Indexer, IndexerProvider};
use nzb_grab::{
    AccessMode, AccessOutcome, AccessSource, Database, GrabHandler, HttpOriginFetcher,
    NewSearchResult, SearchResultId,
};

struct NoIndexers;

impl IndexerProvider for NoIndexers {
    fn indexer_by_name(&self, _name: &str) -> Option<Arc<dyn Indexer>> {
        None
    }
}

struct Fixture {
    handler: GrabHandler,
    db: Arc<Database>,
    server: MockServer,
    _temp_dir: tempfile::TempDir,
}

async fn fixture() -> Fixture {
    let temp_dir = tempdir().unwrap();
    let db = Arc::new(
        Database::new(&temp_dir.path().join("test.db"))
            .await
            .unwrap(),
    );
    let server = MockServer::start().await;
    let fetcher = Arc::new(HttpOriginFetcher::new(Duration::from_secs(5)).unwrap());
    let handler = GrabHandler::new(db.clone(), db.clone(), fetcher, Arc::new(NoIndexers));

    Fixture {
        handler,
        db,
        server,
        _temp_dir: temp_dir,
    }
}

async fn seed(f: &Fixture, title: &str, origin_path: &str) -> SearchResultId {
    f.db.insert_search_result(&NewSearchResult {
        title: title.to_string(),
        link: format!("{}{}", f.server.uri(), origin_path),
        indexer_name: "nzbs.example".to_string(),
        indexer_guid: format!("guid-{title}"),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn redirect_grab_points_at_origin_and_audits_unknown() {
    let f = fixture().await;
    let id = seed(&f, "My.Movie.2024", "/getnzb/1").await;

    let result = f
        .handler
        .grab(id, AccessMode::Redirect, AccessSource::Api, "10.0.0.1")
        .await;

    assert!(result.is_successful());
    assert_eq!(
        result.redirect_url(),
        Some(format!("{}/getnzb/1", f.server.uri()).as_str())
    );

    let history = f.db.access_history_for_result(id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].outcome, AccessOutcome::Unknown);
    assert_eq!(history[0].mode, AccessMode::Redirect);
    assert_eq!(history[0].source, AccessSource::Api);

    // No request reached the origin
    assert!(f.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn proxy_grab_fetches_content_and_audits_successful() {
    let f = fixture().await;

    Mock::given(method("GET"))
        .and(path("/getnzb/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<nzb/>"))
        .mount(&f.server)
        .await;

    let id = seed(&f, "My.Movie.2024", "/getnzb/42").await;
    let result = f
        .handler
        .grab(id, AccessMode::Proxy, AccessSource::Internal, "alice")
        .await;

    assert!(result.is_successful());
    assert_eq!(result.content(), Some("<nzb/>"));

    let history = f.db.access_history_for_result(id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].outcome, AccessOutcome::Successful);
    assert_eq!(history[0].username_or_ip, "alice");
    assert!(history[0].error.is_none());
}

#[tokio::test]
async fn proxy_grab_against_broken_origin_audits_connection_error() {
    let f = fixture().await;

    Mock::given(method("GET"))
        .and(path("/getnzb/7"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&f.server)
        .await;

    let id = seed(&f, "Broken.Release", "/getnzb/7").await;
    let result = f
        .handler
        .grab(id, AccessMode::Proxy, AccessSource::Api, "10.0.0.1")
        .await;

    assert!(!result.is_successful());
    let message = result.error_message().unwrap();
    assert!(message.contains("Broken.Release"));
    assert!(message.contains("nzbs.example"));

    let history = f.db.access_history_for_result(id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].outcome, AccessOutcome::ConnectionError);
    assert!(!history[0].error.as_deref().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_reference_leaves_no_trace() {
    let f = fixture().await;

    let result = f
        .handler
        .grab(
            SearchResultId(9999),
            AccessMode::Proxy,
            AccessSource::Internal,
            "alice",
        )
        .await;

    assert!(!result.is_successful());
    assert_eq!(f.db.count_access_history(None).await.unwrap(), 0);
}

#[tokio::test]
async fn bundle_with_partial_failure_contains_only_survivors() {
    let f = fixture().await;

    Mock::given(method("GET"))
        .and(path("/getnzb/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<nzb>a</nzb>"))
        .mount(&f.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getnzb/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&f.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getnzb/c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<nzb>c</nzb>"))
        .mount(&f.server)
        .await;

    let id_a = seed(&f, "Alpha", "/getnzb/a").await;
    let id_b = seed(&f, "Beta", "/getnzb/b").await;
    let id_c = seed(&f, "Gamma", "/getnzb/c").await;

    let archive = f
        .handler
        .grab_to_zip(&[id_a, id_b, id_c], "alice")
        .await
        .unwrap();

    let file = std::fs::File::open(archive.path()).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    assert_eq!(zip.len(), 2);

    let mut entries = Vec::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        entries.push((entry.name().to_string(), content));
    }
    assert_eq!(
        entries,
        vec![
            ("Alpha.nzb".to_string(), "<nzb>a</nzb>".to_string()),
            ("Gamma.nzb".to_string(), "<nzb>c</nzb>".to_string()),
        ]
    );

    // All three attempts audited: two successes, one connection error
    assert_eq!(f.db.count_access_history(None).await.unwrap(), 3);
    assert_eq!(
        f.db.count_access_history(Some(AccessOutcome::Successful))
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        f.db.count_access_history(Some(AccessOutcome::ConnectionError))
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn bundle_where_every_fetch_fails_is_an_error() {
    let f = fixture().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&f.server)
        .await;

    let id_a = seed(&f, "Alpha", "/getnzb/a").await;
    let id_b = seed(&f, "Beta", "/getnzb/b").await;

    let err = f
        .handler
        .grab_to_zip(&[id_a, id_b], "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, nzb_grab::Error::NothingRetrievable));
    assert_eq!(
        f.db.count_access_history(Some(AccessOutcome::ConnectionError))
            .await
            .unwrap(),
        2
    );
}
