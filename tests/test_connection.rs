//! Drives the per-connection state machine over an in-memory stream.

use std::fs;

use shelf::http::connection::Connection;
use shelf::http::parser::{HttpStatusLine, decode};
use shelf::server::Site;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn site() -> (TempDir, Site) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(dir.path().join("notes.txt"), "plain").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b.png"), [1u8, 2, 3]).unwrap();
    fs::write(dir.path().join("sub/a.pdf"), "%PDF-1.4").unwrap();
    fs::create_dir(dir.path().join("sub/inner")).unwrap();
    fs::create_dir(dir.path().join("my dir")).unwrap();

    let site = Site::open(dir.path()).unwrap();
    (dir, site)
}

async fn exchange(site: &Site, raw: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    if raw.is_empty() {
        client.shutdown().await.unwrap();
    } else {
        client.write_all(raw).await.unwrap();
    }

    let conn = Connection::new(server, site, 4096);
    let serve = async move {
        let mut conn = conn;
        conn.run().await
    };
    let read = async {
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).await.unwrap();
        buf
    };

    let (result, out) = tokio::join!(serve, read);
    result.unwrap();
    out
}

async fn get(site: &Site, target: &str) -> (HttpStatusLine, shelf::http::headers::HeaderList, Vec<u8>) {
    let raw = format!("GET {} HTTP/1.1\r\nHost: test\r\n\r\n", target);
    let out = exchange(site, raw.as_bytes()).await;
    let msg = decode(&out).unwrap();
    (msg.start_line.parse().unwrap(), msg.headers, msg.body)
}

#[tokio::test]
async fn test_root_serves_index() {
    let (_dir, site) = site();
    let (status, headers, body) = get(&site, "/").await;

    assert_eq!(status.code, 200);
    assert_eq!(headers.get("Content-Type"), Some("text/html"));
    assert_eq!(headers.get("Content-Length"), Some("13"));
    assert_eq!(headers.get("Connection"), Some("close"));
    assert!(headers.get("Date").is_some());
    assert_eq!(body, b"<h1>home</h1>");
}

#[tokio::test]
async fn test_binary_file_served_verbatim() {
    let (_dir, site) = site();
    let (status, headers, body) = get(&site, "/sub/b.png").await;

    assert_eq!(status.code, 200);
    assert_eq!(headers.get("Content-Type"), Some("image/png"));
    assert_eq!(body, vec![1u8, 2, 3]);
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let (_dir, site) = site();
    let (status, headers, body) = get(&site, "/missing.png").await;

    assert_eq!(status.code, 404);
    assert_eq!(status.reason, "Not Found");
    assert_eq!(headers.get("Content-Type"), Some("text/html; charset=utf-8"));
    assert!(String::from_utf8(body).unwrap().contains("was not found"));
}

#[tokio::test]
async fn test_unsupported_type_is_404() {
    let (_dir, site) = site();
    let (status, _, body) = get(&site, "/notes.txt").await;

    assert_eq!(status.code, 404);
    assert!(String::from_utf8(body).unwrap().contains("Unsupported file type or extension."));
}

#[tokio::test]
async fn test_traversal_is_403() {
    let (_dir, site) = site();

    for target in ["/../etc/passwd", "/%2e%2e/etc/passwd", "/sub/%2E%2E/%2e%2e/x"] {
        let (status, headers, body) = get(&site, target).await;
        assert_eq!(status.code, 403, "{target}");
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(body, b"403 Forbidden: Directory traversal attempt.");
    }
}

#[tokio::test]
async fn test_directory_without_slash_redirects() {
    let (_dir, site) = site();
    let (status, headers, body) = get(&site, "/sub").await;

    assert_eq!(status.code, 301);
    assert_eq!(headers.get("Location"), Some("/sub/"));
    assert_eq!(headers.get("Content-Length"), Some("0"));
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_redirect_location_is_encoded() {
    let (_dir, site) = site();
    let (status, headers, _) = get(&site, "/my%20dir").await;

    assert_eq!(status.code, 301);
    assert_eq!(headers.get("Location"), Some("/my%20dir/"));
}

#[tokio::test]
async fn test_directory_listing() {
    let (_dir, site) = site();
    let (status, headers, body) = get(&site, "/sub/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status.code, 200);
    assert_eq!(headers.get("Content-Type"), Some("text/html; charset=utf-8"));

    let links: Vec<&str> = html.lines().filter(|l| l.starts_with("<a href=")).collect();
    assert_eq!(
        links,
        vec![
            "<a href=\"/\">../</a>",
            "<a href=\"/sub/a.pdf\">a.pdf</a>",
            "<a href=\"/sub/b.png\">b.png</a>",
            "<a href=\"/sub/inner/\">inner/</a>",
        ]
    );
}

#[tokio::test]
async fn test_non_get_is_501() {
    let (_dir, site) = site();
    let out = exchange(&site, b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n").await;
    let msg = decode(&out).unwrap();
    let status: HttpStatusLine = msg.start_line.parse().unwrap();

    assert_eq!(status.code, 501);
    assert_eq!(msg.body, b"501 Not Implemented");
}

#[tokio::test]
async fn test_malformed_request_gets_no_response() {
    let (_dir, site) = site();

    assert!(exchange(&site, b"NONSENSE\r\n\r\n").await.is_empty());
    assert!(exchange(&site, b"GET /only-two\r\n\r\n").await.is_empty());
}

#[tokio::test]
async fn test_closed_before_request_gets_no_response() {
    let (_dir, site) = site();
    assert!(exchange(&site, b"").await.is_empty());
}
