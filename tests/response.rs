//! End-to-end tests driving [`imap_response_codec::parse_response_line`] against full response
//! lines, many adapted from the RFC 3501 transcripts.

use imap_response_codec::parse_response_line;
use imap_response_types::{
    core::Token,
    fetch::FetchItem,
    response::{Response, UntaggedData},
};

#[test]
fn test_greeting_is_an_ordinary_untagged_response() {
    let resp = parse_response_line(b"* OK IMAP4rev1 Service Ready\r\n").unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::ResponseText(text), .. } => {
            assert_eq!(text.text.as_deref(), Some("IMAP4rev1 Service Ready"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_login_completed() {
    let resp = parse_response_line(b"a001 OK LOGIN completed\r\n").unwrap();
    match resp {
        Response::TaggedResponse { tag, kind, .. } => {
            assert_eq!(tag, "a001");
            assert_eq!(kind, Token::Ok);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_select_sequence() {
    let lines: &[&[u8]] = &[
        b"* 172 EXISTS\r\n",
        b"* 1 RECENT\r\n",
        b"* OK [UNSEEN 12] Message 12 is first unseen\r\n",
        b"* OK [UIDVALIDITY 3857529045] UIDs valid\r\n",
        b"* OK [UIDNEXT 4392] Predicted next UID\r\n",
        b"* FLAGS (\\Answered \\Flagged \\Deleted \\Seen \\Draft)\r\n",
        b"A142 OK [READ-WRITE] SELECT completed\r\n",
    ];
    for line in lines {
        parse_response_line(line).unwrap();
    }
}

#[test]
fn test_list_inbox() {
    let resp = parse_response_line(b"* LIST (\\HasNoChildren) \"/\" INBOX\r\n").unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::List(list), .. } => {
            assert_eq!(list.mailbox, b"INBOX");
            assert_eq!(list.delimiter, Some(b'/'));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_expunge() {
    let resp = parse_response_line(b"* 3 EXPUNGE\r\n").unwrap();
    match resp {
        Response::UntaggedResponse { kind, data: UntaggedData::Expunge(n) } => {
            assert_eq!(kind, Token::Expunge);
            assert_eq!(n, 3);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_continuation_request() {
    let resp = parse_response_line(b"+ Ready for additional command text\r\n").unwrap();
    match resp {
        Response::ContinueReq { text } => {
            assert_eq!(text.text.as_deref(), Some("Ready for additional command text"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_fetch_full_message_attributes() {
    let line = br#"* 12 FETCH (FLAGS (\Seen) INTERNALDATE "17-Jul-1996 02:44:25 -0700" RFC822.SIZE 4286 ENVELOPE ("Wed, 17 Jul 1996 02:23:25 -0700 (PDT)" "IMAP4rev1 WG mtg summary and minutes" (("Terry Gray" NIL "gray" "cac.washington.edu")) (("Terry Gray" NIL "gray" "cac.washington.edu")) (("Terry Gray" NIL "gray" "cac.washington.edu")) ((NIL NIL "imap" "cac.washington.edu")) ((NIL NIL "minutes" "CNRI.Reston.VA.US")("John Klensin" NIL "KLENSIN" "MIT.EDU")) NIL NIL "<B27397-0100000@cac.washington.edu>") BODY ("TEXT" "PLAIN" ("CHARSET" "US-ASCII") NIL NIL "7BIT" 3028 92))
"#;
    let line = normalize_crlf(line);
    let resp = parse_response_line(&line).unwrap();
    match resp {
        Response::UntaggedResponse { kind: Token::Fetch, data: UntaggedData::Fetch(fetch) } => {
            assert_eq!(fetch.msg, 12);
            assert_eq!(fetch.items.get(&Token::Rfc822Size), Some(&FetchItem::Number(4286)));
            match fetch.items.get(&Token::Envelope) {
                Some(FetchItem::Envelope(env)) => {
                    assert_eq!(env.subject.as_deref(), Some(&b"IMAP4rev1 WG mtg summary and minutes"[..]));
                }
                other => panic!("unexpected envelope item: {other:?}"),
            }
            match fetch.items.get(&Token::Body) {
                Some(FetchItem::Body(_)) => {}
                other => panic!("unexpected body item: {other:?}"),
            }
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_fetch_with_header_fields_literal() {
    let line = b"* 2 FETCH (FLAGS (\\Seen) BODY[HEADER.FIELDS (DATE FROM)] {24}\r\nDate: today\r\nFrom: a\r\n\r\n)\r\n";
    let resp = parse_response_line(line).unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::Fetch(fetch), .. } => {
            match fetch.items.get(&Token::BodySections) {
                Some(FetchItem::BodySections(sections)) => {
                    let section = sections.get("HEADER.FIELDS (DATE FROM)").unwrap();
                    assert_eq!(section.content.as_deref(), Some(&b"Date: today\r\nFrom: a\r\n\r\n"[..]));
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_status_response() {
    let resp = parse_response_line(b"* STATUS blurdybloop (MESSAGES 231 UIDNEXT 44292)\r\n").unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::Status(status), .. } => {
            assert_eq!(status.mailbox, b"blurdybloop");
            assert_eq!(status.status.get(&Token::Messages), Some(&231));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_search_response() {
    let resp = parse_response_line(b"* SEARCH 2 84 882\r\n").unwrap();
    match resp {
        Response::UntaggedResponse { data: UntaggedData::Search(nums), .. } => {
            assert_eq!(nums, vec![2, 84, 882]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_bad_response() {
    let resp = parse_response_line(b"* BAD Disk crash, attempting salvage to a new disk!\r\n").unwrap();
    match resp {
        Response::UntaggedResponse { kind, .. } => assert_eq!(kind, Token::Bad),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_truncated_line_is_an_error() {
    let err = parse_response_line(b"* 1 EXI").unwrap_err();
    assert!(matches!(err, imap_response_codec::ParseError::Truncated));
}

fn normalize_crlf(line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    for &b in line {
        if b == b'\n' && out.last() != Some(&b'\r') {
            out.push(b'\r');
        }
        out.push(b);
    }
    out
}
