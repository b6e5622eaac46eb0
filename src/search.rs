//! `esearch-response` (RFC 4731).

use std::collections::HashMap;

use abnf_core::streaming::sp;
use imap_response_types::{
    core::Token,
    search::{Esearch, EsearchValue},
};
use nom::{
    bytes::streaming::{tag, tag_no_case},
    combinator::opt,
    sequence::{delimited, preceded, tuple},
};

use crate::{
    core::{ascii_astring, number, token_text},
    decode::{unknown_token, IMAPResult},
    sequence::sequence_set,
};

/// `esearch-response = "ESEARCH" [SP search-correlator] [SP "UID"] *(SP search-return-data)`
///
/// The leading `"ESEARCH"` keyword itself is consumed by the caller's dispatcher; this parser
/// starts right after it.
pub(crate) fn esearch_response(input: &[u8]) -> IMAPResult<Esearch> {
    let (input, tag) = opt(preceded(sp, search_correlator))(input)?;
    let (input, uid) = opt(preceded(sp, tag_no_case(b"UID")))(input)?;

    let mut input = input;
    let mut returned = HashMap::new();
    loop {
        match opt(preceded(sp, search_return_data))(input)? {
            (rem, Some((key, value))) => {
                returned.insert(key, value);
                input = rem;
            }
            (rem, None) => {
                input = rem;
                break;
            }
        }
    }

    Ok((
        input,
        Esearch {
            tag,
            uid: uid.is_some(),
            returned,
        },
    ))
}

/// `search-correlator = SP "(" "TAG" SP tag-string ")"`
fn search_correlator(input: &[u8]) -> IMAPResult<String> {
    delimited(
        tuple((tag(b"("), tag_no_case(b"TAG"), sp)),
        ascii_astring,
        tag(b")"),
    )(input)
}

/// `search-return-data = "COUNT" SP number / "MAX" SP number / "MIN" SP number / "ALL" SP
///                        sequence-set`
fn search_return_data(input: &[u8]) -> IMAPResult<(Token, EsearchValue)> {
    let (rem, name) = token_text(input)?;
    let Some(key) = Token::classify(name) else {
        return unknown_token(input, name, "esearch return-data");
    };

    match key {
        Token::Count | Token::Max | Token::Min => {
            let (rem, value) = preceded(sp, number)(rem)?;
            Ok((rem, (key, EsearchValue::Number(value))))
        }
        Token::All => {
            let (rem, value) = preceded(sp, sequence_set)(rem)?;
            Ok((rem, (key, EsearchValue::Sequence(value))))
        }
        _ => unknown_token(input, name, "esearch return-data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esearch_with_correlator_and_all() {
        let (rem, val) = esearch_response(br#" (TAG "a1") UID ALL 1,3:5xxx"#).unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val.tag.as_deref(), Some("a1"));
        assert!(val.uid);
        assert_eq!(
            val.returned.get(&Token::All),
            Some(&EsearchValue::Sequence(vec![
                imap_response_types::sequence::SequenceItem::Single(1),
                imap_response_types::sequence::SequenceItem::Range(3, 5),
            ]))
        );
    }

    #[test]
    fn test_esearch_count_only() {
        let (rem, val) = esearch_response(b" COUNT 5xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert!(val.tag.is_none());
        assert!(!val.uid);
        assert_eq!(val.returned.get(&Token::Count), Some(&EsearchValue::Number(5)));
    }
}
