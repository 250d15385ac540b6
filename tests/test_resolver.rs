use std::fs;

use shelf::http::mime::ContentTypeTable;
use shelf::server::resolver::{NotFound, TargetKind, has_traversal, redirect_location, resolve};
use tempfile::TempDir;

fn doc_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(dir.path().join("notes.txt"), "plain").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/pic.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::create_dir(dir.path().join("site")).unwrap();
    fs::write(dir.path().join("site/index.html"), "<h1>site</h1>").unwrap();
    dir
}

#[test]
fn test_traversal_detection() {
    assert!(has_traversal("/../etc/passwd"));
    assert!(has_traversal("/a/b/.."));
    assert!(has_traversal("/a/../b/"));
    assert!(has_traversal("..\\windows"));
    assert!(!has_traversal("/a..b/c"));
    assert!(!has_traversal("/.hidden"));
    assert!(!has_traversal("/"));
}

#[tokio::test]
async fn test_traversal_is_forbidden() {
    let root = doc_root();
    let table = ContentTypeTable::default();

    for path in ["/../etc/passwd", "/sub/../../secret", "/sub/.."] {
        let target = resolve(root.path(), &table, path).await;
        assert_eq!(target.kind, TargetKind::Forbidden, "{path}");
    }
}

#[tokio::test]
async fn test_root_resolves_to_index() {
    let root = doc_root();
    let target = resolve(root.path(), &ContentTypeTable::default(), "/").await;

    assert_eq!(
        target.kind,
        TargetKind::File { content_type: "text/html".to_string() }
    );
    assert_eq!(target.path, root.path().join("index.html"));
}

#[tokio::test]
async fn test_directory_with_index() {
    let root = doc_root();
    let target = resolve(root.path(), &ContentTypeTable::default(), "/site/").await;

    assert_eq!(target.path, root.path().join("site").join("index.html"));
    assert!(matches!(target.kind, TargetKind::File { .. }));
}

#[tokio::test]
async fn test_directory_without_index() {
    let root = doc_root();
    let target = resolve(root.path(), &ContentTypeTable::default(), "/sub/").await;

    assert_eq!(target.kind, TargetKind::Directory);
    assert_eq!(target.path, root.path().join("sub/"));
}

#[tokio::test]
async fn test_directory_without_trailing_slash() {
    let root = doc_root();
    let target = resolve(root.path(), &ContentTypeTable::default(), "/sub").await;

    assert_eq!(target.kind, TargetKind::Directory);
    assert_eq!(redirect_location("/sub"), "/sub/");
}

#[tokio::test]
async fn test_plain_file() {
    let root = doc_root();
    let target = resolve(root.path(), &ContentTypeTable::default(), "/sub/pic.png").await;

    assert_eq!(
        target.kind,
        TargetKind::File { content_type: "image/png".to_string() }
    );
}

#[tokio::test]
async fn test_unsupported_extension_is_missing() {
    let root = doc_root();
    let target = resolve(root.path(), &ContentTypeTable::default(), "/notes.txt").await;

    assert_eq!(target.kind, TargetKind::Missing(NotFound::UnsupportedType));
}

#[tokio::test]
async fn test_missing_paths() {
    let root = doc_root();
    let table = ContentTypeTable::default();

    for path in ["/missing.png", "/nope/", "/sub/missing.pdf"] {
        let target = resolve(root.path(), &table, path).await;
        assert_eq!(target.kind, TargetKind::Missing(NotFound::NoSuchPath), "{path}");
    }
}
