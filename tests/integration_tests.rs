//! Integration tests for Book Harvest
//!
//! These tests run the topic -> fetch -> CSV pipeline end to end, once against
//! the scripted mock source and once against a local mock HTTP server.

use book_harvest::models::BookRecord;
use book_harvest::selector::parse_selection;
use book_harvest::sources::mock::make_page;
use book_harvest::sources::{MockSource, OpenLibrarySource, Source, DEFAULT_FIELDS};
use book_harvest::topics::{default_topics, TopicStore};
use book_harvest::utils::HttpClient;
use book_harvest::writer::UTF8_BOM;
use book_harvest::{write_csv, Fetcher, StopReason, THRESHOLD_YEAR};
use mockito::Matcher;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn read_back(path: &Path) -> Vec<BookRecord> {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM), "output should start with a BOM");

    let mut rdr = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["title", "author", "year"]);

    rdr.deserialize().map(|r| r.unwrap()).collect()
}

fn docs_json(prefix: &str, count: usize, year: i32) -> String {
    let docs: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "title": format!("{} {}", prefix, i),
                "author_name": ["Ada Writer", "Bo Coauthor"],
                "first_publish_year": year,
            })
        })
        .collect();
    serde_json::json!({ "numFound": count, "docs": docs }).to_string()
}

#[tokio::test]
async fn test_pipeline_with_mock_source() {
    let dir = tempdir().unwrap();
    let topics_path = dir.path().join("topics.txt");
    let output_path = dir.path().join("output").join("books_filtered.csv");

    let topics = TopicStore::new(&topics_path).load_topics().unwrap();
    assert_eq!(topics, default_topics());

    let mut rng = StdRng::seed_from_u64(42);
    let query = parse_selection("1", topics.len())
        .resolve(&topics, &mut rng)
        .unwrap();
    assert_eq!(query, topics[0]);

    let source = Arc::new(MockSource::with_pages(vec![
        make_page("old", 40, Some(1995)),
        make_page("recent", 30, Some(2012)),
    ]));
    let fetcher = Fetcher::new(Arc::clone(&source) as Arc<dyn Source>);
    let result = fetcher.fetch_books(&query, 50).await;

    assert_eq!(result.len(), 30);
    assert_eq!(result.stop_reason, StopReason::Exhausted);
    assert!(source.requests().iter().all(|r| r.query == query));

    assert!(write_csv(&result.books, &output_path).unwrap());
    let rows = read_back(&output_path);
    assert_eq!(rows, result.books);
}

#[tokio::test]
async fn test_no_results_writes_nothing() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("output").join("books_filtered.csv");

    let source = Arc::new(MockSource::new());
    let result = Fetcher::new(source).fetch_books("zzzz", 50).await;

    assert!(result.is_empty());
    assert!(!write_csv(&result.books, &output_path).unwrap());
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_pipeline_against_http_server() {
    let mut server = mockito::Server::new_async().await;

    let page_one = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "databases".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
            Matcher::UrlEncoded("fields".into(), DEFAULT_FIELDS.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(docs_json("Recent", 10, 2009))
        .expect(1)
        .create_async()
        .await;

    let page_two = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let client = HttpClient::new(Duration::from_secs(5)).unwrap();
    let source = Arc::new(OpenLibrarySource::with_base_url(
        client,
        format!("{}/search.json", server.url()),
    ));
    let fetcher = Fetcher::new(source).fields(Some(DEFAULT_FIELDS));

    let result = fetcher.fetch_books("databases", 50).await;

    page_one.assert_async().await;
    page_two.assert_async().await;

    assert_eq!(result.len(), 10);
    assert!(result.is_partial());
    assert_eq!(result.total_available, Some(10));
    assert!(result
        .books
        .iter()
        .all(|b| b.year.is_some_and(|y| y > THRESHOLD_YEAR)));
    assert_eq!(result.books[0].author, "Ada Writer, Bo Coauthor");

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("books.csv");
    write_csv(&result.books, &output_path).unwrap();
    assert_eq!(read_back(&output_path).len(), 10);
}

#[tokio::test]
async fn test_http_target_reached_on_first_page() {
    let mut server = mockito::Server::new_async().await;

    let page_one = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(docs_json("Book", 100, 2005))
        .expect(1)
        .create_async()
        .await;

    let page_two = server
        .mock("GET", "/search.json")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(docs_json("Later", 100, 2005))
        .expect(0)
        .create_async()
        .await;

    let client = HttpClient::new(Duration::from_secs(5)).unwrap();
    let source = Arc::new(OpenLibrarySource::with_base_url(
        client,
        format!("{}/search.json", server.url()),
    ));

    let result = Fetcher::new(source).fetch_books("anything", 50).await;

    page_one.assert_async().await;
    page_two.assert_async().await;
    assert_eq!(result.len(), 50);
    assert_eq!(result.pages_requested, 1);
    assert_eq!(result.stop_reason, StopReason::TargetReached);
}
