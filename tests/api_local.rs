use ghls::api::RepositorySource;
use ghls::{Client, FetchError, LanguageQuery, SortKey, Unavailable};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Serve exactly one HTTP response on a loopback port and hand back the
/// request line the client sent.
fn serve_once(
    status: &'static str,
    extra_headers: &'static str,
    body: &'static str,
) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        // drain headers
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n{extra_headers}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        request_line
    });
    (base, handle)
}

#[test]
fn sends_one_search_request_and_decodes_items() {
    let body = r#"{"total_count":1,"incomplete_results":false,"items":[{"name":"rust","full_name":"rust-lang/rust","owner":{"login":"rust-lang"},"html_url":"https://github.com/rust-lang/rust","description":null,"stargazers_count":90000,"forks_count":12000,"language":"Rust"}]}"#;
    let (base, handle) = serve_once(
        "200 OK",
        "x-ratelimit-limit: 10\r\nx-ratelimit-remaining: 9\r\n",
        body,
    );

    let client = Client::with_base_url(base).unwrap();
    let result = client
        .fetch_top_repositories("Rust", SortKey::Stars, 5)
        .unwrap();
    let request_line = handle.join().unwrap();

    assert!(
        request_line
            .starts_with("GET /search/repositories?q=language:Rust&sort=stars&order=desc&per_page=5 "),
        "request line was {request_line:?}"
    );
    assert_eq!(result.status, 200);
    assert_eq!(result.rate_limit.remaining, Some(9));
    let items = result.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].owner_login(), "rust-lang");
    assert_eq!(items[0].stargazers_count, 90000);
}

#[test]
fn encodes_symbolic_language_names() {
    let (base, handle) = serve_once("200 OK", "", r#"{"total_count":0,"items":[]}"#);
    let client = Client::with_base_url(format!("{base}/")).unwrap();
    client
        .search(&LanguageQuery::new("C++", SortKey::Stars, 100))
        .unwrap();
    let request_line = handle.join().unwrap();
    assert!(request_line.contains("q=language:C%2B%2B&sort=stars&order=desc&per_page=100"));
}

#[test]
fn rate_limited_response_is_data_not_an_error() {
    let (base, handle) = serve_once(
        "403 Forbidden",
        "x-ratelimit-remaining: 0\r\nx-ratelimit-reset: 1700000000\r\n",
        r#"{"message":"API rate limit exceeded for 127.0.0.1.","documentation_url":"https://docs.github.com/rest"}"#,
    );
    let client = Client::with_base_url(base).unwrap();
    let result = client
        .fetch_top_repositories("Go", SortKey::Stars, 100)
        .unwrap();
    handle.join().unwrap();

    assert_eq!(result.status, 403);
    match result.missing_items() {
        Some(Unavailable::RateLimited { message, reset_at }) => {
            assert!(message.unwrap().contains("rate limit"));
            assert_eq!(reset_at.map(|t| t.timestamp()), Some(1_700_000_000));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn non_json_body_is_a_decode_error() {
    let (base, handle) = serve_once("502 Bad Gateway", "", "<html>bad gateway</html>");
    let client = Client::with_base_url(base).unwrap();
    let err = client
        .fetch_top_repositories("Rust", SortKey::Stars, 5)
        .unwrap_err();
    handle.join().unwrap();
    match err {
        FetchError::Decode { url, .. } => assert!(url.ends_with("per_page=5")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unreachable_host_is_a_network_error() {
    // Bind then drop so the port is very likely closed.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = Client::with_base_url(format!("http://127.0.0.1:{port}")).unwrap();
    let err = client
        .fetch_top_repositories("Rust", SortKey::Stars, 5)
        .unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
