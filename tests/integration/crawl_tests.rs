//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small book archive and run traversal,
//! extraction and snapshotting end-to-end over HTTP.

use lorekeeper::crawler::{HttpSource, Traverser};
use lorekeeper::output::{write_books, OutputFormat, RecordCollector, SnapshotWriter};
use lorekeeper::{Book, LoreError};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Series index page listing `children` in its book-navigation menu
fn index_page(title: &str, children: &[&str]) -> String {
    let items: String = children
        .iter()
        .map(|c| format!(r#"<li class="leaf"><a href="{}">{}</a></li>"#, c, c))
        .collect();
    format!(
        r#"<html><body><div id="main"><h1>{}</h1>
           <div class="book-navigation"><ul class="menu">{}</ul></div>
           </div></body></html>"#,
        title, items
    )
}

/// Book page laid out like the archive's book nodes
fn book_page(title: &str, author: &str, tags: &[&str], paragraphs: &[&str]) -> String {
    let tags: String = tags
        .iter()
        .map(|t| format!(r#"<li><a href="/tags/{}">{}</a></li>"#, t.to_lowercase(), t))
        .collect();
    let paragraphs: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect();
    format!(
        r#"<html><body>
<div id="header">The Archive</div>
<div id="main">
  <h1>{title}</h1>
  <div class="node node-book">
    <div class="submitted">Submitted</div>
    <div class="terms"><ul>{tags}</ul></div>
    <div class="content">
      <div class="field-author"><div class="field-label"></div><div class="field-items"><div class="field-item">Author: {author}</div></div></div>
      <div class="field-comment"><div class="field-items"><div class="field-item"><p>Note on {title}</p></div></div></div>
      {paragraphs}
    </div>
  </div>
</div>
</body></html>"#
    )
}

/// Collection listing page linking to `entries`
fn listing_page(entries: &[&str]) -> String {
    let items: String = entries
        .iter()
        .map(|e| format!(r#"<li><span><span><a href="{}">{}</a></span></span></li>"#, e, e))
        .collect();
    format!(
        r#"<html><body><div id="content"><div>
             <div class="view-header">By title</div>
             <div class="view-content"><div class="item-list"><ul>{}</ul></div></div>
           </div></div></body></html>"#,
        items
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts: /series -> [/series/vol-1, /series/vol-2], /single, and a listing of both
async fn mount_archive(server: &MockServer) {
    mount_page(
        server,
        "/books/test/by-title",
        listing_page(&["/series", "/single"]),
    )
    .await;
    mount_page(
        server,
        "/series",
        index_page("A Series", &["/series/vol-1", "/series/vol-2"]),
    )
    .await;
    mount_page(
        server,
        "/series/vol-1",
        book_page(
            "Volume One",
            "J. R. R. Token",
            &["Lore", "History", "Lore"],
            &["First.", "Second."],
        ),
    )
    .await;
    mount_page(
        server,
        "/series/vol-2",
        book_page("Volume Two", "Anonymous", &[], &["Only."]),
    )
    .await;
    mount_page(
        server,
        "/single",
        book_page("Standalone", "Vivec", &["Poetry"], &[]),
    )
    .await;
}

fn traverser(server: &MockServer) -> Traverser<HttpSource> {
    let root = Url::parse(&server.uri()).expect("Failed to parse mock server URI");
    Traverser::new(HttpSource::new().expect("Failed to build HTTP source"), root)
}

fn page_url(server: &MockServer, page_path: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), page_path)).unwrap()
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_traverse_extracts_books_in_preorder() {
    let server = MockServer::start().await;
    mount_archive(&server).await;

    let traverser = traverser(&server);
    let mut collector = RecordCollector::new();

    let summary = traverser
        .traverse(&page_url(&server, "/series"), &mut collector)
        .await
        .expect("Traversal failed");

    assert_eq!(summary.index_pages, 1);
    assert_eq!(summary.leaf_pages, 2);

    let books = collector.into_books();
    assert_eq!(
        books[0],
        Book {
            title: "Volume One".to_string(),
            author: "J. R. R. Token".to_string(),
            annotation: "Note on Volume One".to_string(),
            tags: vec!["Lore".to_string(), "History".to_string(), "Lore".to_string()],
            content: vec!["First.".to_string(), "Second.".to_string()],
            source: format!("{}/series/vol-1", server.uri()),
        }
    );
    assert_eq!(books[1].title, "Volume Two");
    assert_eq!(books[1].author, "Anonymous");
    assert!(books[1].tags.is_empty());
    assert_eq!(books.len(), 2);

    assert_eq!(
        requested_paths(&server).await,
        vec!["/series", "/series/vol-1", "/series/vol-2"]
    );
}

#[tokio::test]
async fn test_single_book_page_is_leaf() {
    let server = MockServer::start().await;
    mount_archive(&server).await;

    let traverser = traverser(&server);
    let mut collector = RecordCollector::new();

    traverser
        .traverse(&page_url(&server, "/single"), &mut collector)
        .await
        .expect("Traversal failed");

    let books = collector.books();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Standalone");
    assert!(books[0].content.is_empty());
    assert_eq!(books[0].source, format!("{}/single", server.uri()));
}

#[tokio::test]
async fn test_fetch_failure_aborts_remaining_siblings() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/root",
        index_page("Root", &["/ok", "/broken", "/never"]),
    )
    .await;
    mount_page(&server, "/ok", book_page("Ok", "Someone", &[], &["Fine."])).await;
    mount_page(&server, "/never", book_page("Never", "Nobody", &[], &[])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let traverser = traverser(&server);
    let mut collector = RecordCollector::new();

    let result = traverser
        .traverse(&page_url(&server, "/root"), &mut collector)
        .await;

    match result {
        Err(LoreError::Status { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/broken"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }

    assert_eq!(collector.books().len(), 1);
    assert!(!requested_paths(&server).await.contains(&"/never".to_string()));
}

#[tokio::test]
async fn test_crawl_collection_collects_every_entry() {
    let server = MockServer::start().await;
    mount_archive(&server).await;

    let traverser = traverser(&server);
    let mut collector = RecordCollector::new();

    let summary = traverser
        .crawl_collection(
            "test",
            &page_url(&server, "/books/test/by-title"),
            &mut collector,
        )
        .await
        .expect("Collection crawl failed");

    assert_eq!(summary.leaf_pages, 3);

    let titles: Vec<String> = collector.books().iter().map(|b| b.title.clone()).collect();
    assert_eq!(titles, vec!["Volume One", "Volume Two", "Standalone"]);

    let mut out = Vec::new();
    write_books(collector.books(), OutputFormat::Json, &mut out).unwrap();
    let parsed: Vec<Book> = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed, collector.books());
}

#[tokio::test]
async fn test_snapshot_collection_writes_main_content() {
    let server = MockServer::start().await;
    mount_archive(&server).await;

    let dir = TempDir::new().unwrap();
    let traverser = traverser(&server);
    let mut writer = SnapshotWriter::new(dir.path(), "test");

    traverser
        .crawl_collection(
            "test",
            &page_url(&server, "/books/test/by-title"),
            &mut writer,
        )
        .await
        .expect("Snapshot crawl failed");

    let collection_dir = dir.path().join("test");
    assert_eq!(
        writer.written(),
        &[
            collection_dir.join("vol-1.html"),
            collection_dir.join("vol-2.html"),
            collection_dir.join("single.html"),
        ]
    );

    let snapshot = std::fs::read_to_string(collection_dir.join("vol-1.html")).unwrap();
    assert!(snapshot.starts_with(r#"<div id="main">"#));
    assert!(snapshot.contains("<h1>Volume One</h1>"));
    assert!(!snapshot.contains("The Archive"));
}

#[tokio::test]
async fn test_snapshot_missing_content_keeps_written_files() {
    let server = MockServer::start().await;

    mount_page(&server, "/root", index_page("Root", &["/good", "/bare", "/later"])).await;
    mount_page(&server, "/good", book_page("Good", "Someone", &[], &["Text."])).await;
    mount_page(
        &server,
        "/bare",
        "<html><body><p>No main container</p></body></html>".to_string(),
    )
    .await;
    mount_page(&server, "/later", book_page("Later", "Someone", &[], &[])).await;

    let dir = TempDir::new().unwrap();
    let traverser = traverser(&server);
    let mut writer = SnapshotWriter::new(dir.path(), "test");

    let result = traverser
        .traverse(&page_url(&server, "/root"), &mut writer)
        .await;

    assert!(matches!(result, Err(LoreError::MissingContent { .. })));
    assert!(dir.path().join("test").join("good.html").exists());
    assert!(!dir.path().join("test").join("later.html").exists());
    assert!(!requested_paths(&server).await.contains(&"/later".to_string()));
}

#[tokio::test]
async fn test_undecodable_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/garbled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("not gzip at all")
                .insert_header("content-type", "text/html; charset=utf-8")
                .insert_header("content-encoding", "gzip"),
        )
        .mount(&server)
        .await;

    let traverser = traverser(&server);
    let mut collector = RecordCollector::new();

    let result = traverser
        .traverse(&page_url(&server, "/garbled"), &mut collector)
        .await;

    match result {
        Err(LoreError::HtmlParse { url, .. }) => assert!(url.ends_with("/garbled")),
        other => panic!("expected a parse error, got {:?}", other),
    }
    assert!(collector.books().is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Nothing listens on port 1
    let root = Url::parse("http://127.0.0.1:1/").unwrap();
    let traverser = Traverser::new(HttpSource::new().expect("Failed to build HTTP source"), root);
    let mut collector = RecordCollector::new();

    let result = traverser
        .traverse(&Url::parse("http://127.0.0.1:1/book").unwrap(), &mut collector)
        .await;

    match result {
        Err(LoreError::Http { url, .. }) => assert_eq!(url, "http://127.0.0.1:1/book"),
        other => panic!("expected a transport error, got {:?}", other),
    }
    assert!(collector.books().is_empty());
}
