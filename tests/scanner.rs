//! Exercises [`imap_response_codec::Scanner`] across fragmented and literal-bearing input, end to
//! end through to [`imap_response_codec::parse_response_line`].

use imap_response_codec::{parse_response_line, ScanError, Scanner};
use imap_response_types::response::{Response, UntaggedData};

#[test]
fn test_feeds_byte_at_a_time_across_a_literal() {
    let mut scanner = Scanner::new();
    let bytes = b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n";

    for (i, &b) in bytes.iter().enumerate() {
        scanner.feed(&[b], None);
        if i + 1 < bytes.len() {
            assert!(scanner.get().is_err());
        }
    }

    let line = scanner.get().unwrap().to_vec();
    scanner.consume(line.len()).unwrap();
    let resp = parse_response_line(&line).unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::Fetch(fetch), .. } => {
            assert_eq!(fetch.msg, 1);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_short_literal_then_completion() {
    let mut scanner = Scanner::new();
    scanner.feed(b"* 1 FETCH (RFC822 {5}\r\nhel", None);
    assert_eq!(scanner.get(), Err(ScanError::IncompleteLiteral));

    scanner.feed(b"lo)\r\n", None);
    let line = scanner.get().unwrap().to_vec();
    scanner.consume(line.len()).unwrap();

    let resp = parse_response_line(&line).unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::Fetch(_), .. } => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_multiple_lines_in_one_feed() {
    let mut scanner = Scanner::new();
    scanner.feed(b"* 1 EXISTS\r\n* 2 EXISTS\r\n", None);

    let first = scanner.get().unwrap().to_vec();
    scanner.consume(first.len()).unwrap();
    assert_eq!(first, b"* 1 EXISTS\r\n");

    let second = scanner.get().unwrap().to_vec();
    scanner.consume(second.len()).unwrap();
    assert_eq!(second, b"* 2 EXISTS\r\n");

    assert_eq!(scanner.get(), Err(ScanError::IncompleteLine));
}

#[test]
fn test_consume_overflow_reports_available_length() {
    let mut scanner = Scanner::new();
    scanner.feed(b"* 1 EXISTS\r\n", None);
    let err = scanner.consume(1000).unwrap_err();
    assert_eq!(
        err,
        ScanError::ConsumeOverflow {
            requested: 1000,
            available: 12
        }
    );
}
