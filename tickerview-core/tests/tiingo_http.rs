//! TiingoProvider against a one-shot local HTTP responder.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;
use tickerview_core::data::{DataError, PriceProvider, TiingoProvider};

/// Serve a single response, returning the raw request head.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });
    let template = format!(
        "http://{addr}/iex/{{ticker_symbol}}/prices?startDate={{start_date}}&endDate={{end_date}}&resampleFreq={{resample_freq}}"
    );
    (template, handle)
}

fn window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
    )
}

#[test]
fn ok_response_is_decoded_and_request_is_authenticated() {
    let body = r#"[
        {"date": "2024-03-04T14:30:00.000Z", "open": 100.0, "high": 101.0, "low": 99.5, "close": 100.5},
        {"date": "2024-03-04T14:35:00.000Z", "open": 102.0, "high": 102.5, "low": 101.0, "close": 101.5}
    ]"#;
    let (template, server) = serve_once("200 OK", body);
    let provider = TiingoProvider::new(template, "5min", "secret-token").unwrap();
    let (start, end) = window();

    let series = provider.fetch("AAPL", start, end).unwrap();
    assert_eq!(series.symbol, "AAPL");
    assert_eq!(series.len(), 2);
    assert_eq!(series.observations()[1].open, 102.0);
    assert_eq!(series.observations()[0].close, 100.5);

    let head = server.join().unwrap();
    let request_line = head.lines().next().unwrap();
    assert_eq!(
        request_line,
        "GET /iex/AAPL/prices?startDate=2024-02-27&endDate=2024-03-05&resampleFreq=5min HTTP/1.1"
    );
    let lower = head.to_ascii_lowercase();
    assert!(lower.contains("authorization: token secret-token"));
    assert!(lower.contains("content-type: application/json"));
}

#[test]
fn server_error_is_http_status() {
    let (template, server) = serve_once("500 Internal Server Error", "oops");
    let provider = TiingoProvider::new(template, "5min", "t").unwrap();
    let (start, end) = window();

    let err = provider.fetch("AAPL", start, end).unwrap_err();
    assert!(matches!(
        err,
        DataError::HttpStatus { status: 500, ref symbol } if symbol == "AAPL"
    ));
    server.join().unwrap();
}

#[test]
fn malformed_body_is_format_error() {
    let (template, server) = serve_once("200 OK", r#"{"detail": "Not found."}"#);
    let provider = TiingoProvider::new(template, "5min", "t").unwrap();
    let (start, end) = window();

    let err = provider.fetch("AAPL", start, end).unwrap_err();
    assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    server.join().unwrap();
}

#[test]
fn unreachable_host_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let template = format!("http://127.0.0.1:{port}/iex/{{ticker_symbol}}/prices");
    let provider = TiingoProvider::new(template, "5min", "t").unwrap();
    let (start, end) = window();

    assert!(matches!(
        provider.fetch("AAPL", start, end),
        Err(DataError::NetworkUnreachable(_))
    ));
}
