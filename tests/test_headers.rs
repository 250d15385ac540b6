use shelf::http::headers::{HeaderLine, HeaderList};

#[test]
fn test_lookup_is_case_insensitive() {
    let mut headers = HeaderList::new();
    headers.push("Content-Type", "text/html");

    assert_eq!(headers.get("content-type"), Some("text/html"));
    assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
}

#[test]
fn test_first_duplicate_wins() {
    let mut headers = HeaderList::new();
    headers.push("Set-Cookie", "a=1");
    headers.push("set-cookie", "b=2");

    assert_eq!(headers.get("Set-Cookie"), Some("a=1"));
    assert_eq!(headers.fields().count(), 2);
}

#[test]
fn test_push_line_splits_on_first_colon() {
    let mut headers = HeaderList::new();
    headers.push_line("Location:  http://host:8080/a/  ");
    headers.push_line("no colon here");

    assert_eq!(headers.get("Location"), Some("http://host:8080/a/"));
    assert_eq!(
        headers.lines()[1],
        HeaderLine::Raw("no colon here".to_string())
    );
}

#[test]
fn test_order_is_preserved() {
    let mut headers = HeaderList::new();
    headers.push("B", "2");
    headers.push("A", "1");
    headers.push("C", "3");

    let names: Vec<&str> = headers.fields().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
}

#[test]
fn test_missing_header() {
    let headers = HeaderList::new();
    assert!(headers.is_empty());
    assert_eq!(headers.get("Host"), None);
}
