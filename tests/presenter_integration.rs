//! Integration tests for the presenter: loading a served snapshot and
//! deriving views from it

use portfolio_feed::presenter::{
    LoadError, LoadState, Presenter, SnapshotFetch, SnapshotLoader, SnapshotLocation, SortKey,
    TagFilter, LOAD_FAILURE_HINT,
};
use portfolio_feed::storage::write_snapshot;
use portfolio_feed::RepositorySummary;
use chrono::{TimeZone, Utc};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn snapshot() -> Vec<RepositorySummary> {
    let created = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    vec![
        RepositorySummary::new(1, "alpha")
            .with_description("Personal website")
            .with_topics(["portfolio", "web"])
            .with_stars(5)
            .with_timestamps(created, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        RepositorySummary::new(2, "beta")
            .with_description("Command line helper")
            .with_topics(["portfolio", "cli"])
            .with_stars(10)
            .with_timestamps(created, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
        RepositorySummary::new(3, "gamma")
            .with_topics(["portfolio", "web", "rust"])
            .with_stars(1)
            .with_timestamps(created, Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()),
    ]
}

async fn serve(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/Portfolio/projects.json"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

fn loader_for(server: &MockServer) -> SnapshotLoader {
    let location = SnapshotLocation::parse(&format!("{}/Portfolio", server.uri())).unwrap();
    SnapshotLoader::new(location).unwrap()
}

fn names(records: &[RepositorySummary]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_load_served_snapshot_and_query() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_json(snapshot())).await;

    let mut presenter = Presenter::new();
    assert!(presenter.load(&loader_for(&server)).await.is_ready());

    assert_eq!(presenter.tag_index(), vec!["All", "portfolio", "web", "cli", "rust"]);
    assert_eq!(
        presenter.last_updated(),
        Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(names(&presenter.visible()), vec!["beta", "alpha", "gamma"]);

    presenter.set_sort_key(SortKey::Stars);
    presenter.set_active_tag(TagFilter::parse("web"));
    assert_eq!(names(&presenter.visible()), vec!["alpha", "gamma"]);

    presenter.set_search_term("WEBSITE");
    assert_eq!(names(&presenter.visible()), vec!["alpha"]);
    assert_eq!(presenter.summary(), "Showing 1 of 3 repositories");
}

#[tokio::test]
async fn test_missing_snapshot_fails_with_hint() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(404)).await;

    let mut presenter = Presenter::new();
    let state = presenter.load(&loader_for(&server)).await.clone();

    match state {
        LoadState::Failed(reason) => {
            assert!(reason.contains("HTTP 404"), "reason: {reason}");
            assert!(reason.ends_with(LOAD_FAILURE_HINT));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_snapshot_is_parse_error() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("[{\"id\": 1,")).await;

    let result = loader_for(&server).fetch().await;
    assert!(matches!(result, Err(LoadError::Parse(_))));
}

#[tokio::test]
async fn test_empty_snapshot_is_displayable() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("[]")).await;

    let mut presenter = Presenter::new();
    presenter.load(&loader_for(&server)).await;

    assert_eq!(presenter.state(), &LoadState::Ready(Vec::new()));
    assert_eq!(presenter.tag_index(), vec!["All"]);
    assert!(presenter.visible().is_empty());
}

#[tokio::test]
async fn test_load_written_snapshot_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(&dir.path().join("projects.json"), &snapshot())
        .await
        .unwrap();

    let location = SnapshotLocation::parse(dir.path().to_str().unwrap()).unwrap();
    let mut presenter = Presenter::new();
    presenter.load(&SnapshotLoader::new(location).unwrap()).await;

    assert_eq!(presenter.records(), snapshot().as_slice());
    presenter.set_sort_key(SortKey::Name);
    presenter.set_active_tag(TagFilter::parse("cli"));
    assert_eq!(names(&presenter.visible()), vec!["beta"]);
}

#[tokio::test]
async fn test_slow_server_has_no_default_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Portfolio/projects.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(snapshot())
                .set_delay(Duration::from_millis(500)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let records = loader_for(&server).fetch().await.unwrap();
    assert_eq!(records.len(), 3);

    let bounded = loader_for(&server)
        .with_timeout(Duration::from_millis(50))
        .unwrap();
    assert!(matches!(bounded.fetch().await, Err(LoadError::Network(_))));
}

#[tokio::test]
async fn test_load_minimal_variant_snapshot() {
    let server = MockServer::start().await;
    let body = r#"[
  {
    "name": "site",
    "description": "Personal website",
    "html_url": "https://github.com/someone/site",
    "homepage": "https://someone.dev",
    "language": "TypeScript",
    "stargazers_count": 3,
    "topics": ["portfolio", "web"]
  },
  {
    "name": "tool",
    "description": null,
    "html_url": "https://github.com/someone/tool",
    "homepage": null,
    "language": null,
    "stargazers_count": 8,
    "topics": ["portfolio"]
  }
]"#;
    serve(&server, ResponseTemplate::new(200).set_body_string(body)).await;

    let mut presenter = Presenter::new();
    assert!(presenter.load(&loader_for(&server)).await.is_ready());

    assert_eq!(presenter.tag_index(), vec!["All", "portfolio", "web"]);
    assert_eq!(presenter.last_updated(), None);
    assert_eq!(names(&presenter.visible()), vec!["site", "tool"]);

    presenter.set_sort_key(SortKey::Stars);
    assert_eq!(names(&presenter.visible()), vec!["tool", "site"]);
}
