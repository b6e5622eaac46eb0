//! `flag-list` and `mailbox-list`.

use std::collections::HashSet;

use abnf_core::streaming::{dquote, sp};
use imap_response_types::mailbox::{canonicalize_mailbox, List};
use nom::{
    branch::alt,
    bytes::streaming::{tag, take_while_m_n},
    character::streaming::char,
    combinator::{map, opt, value},
    multi::separated_list0,
    sequence::{delimited, preceded, tuple},
};

use crate::{
    core::{astring, atom, nil},
    decode::IMAPResult,
};

/// A flag starting with `\` consumes `\` then an atom, forming a backslash-prefixed name; other
/// flags are plain atoms.
pub(crate) fn flag(input: &[u8]) -> IMAPResult<String> {
    alt((
        map(preceded(char('\\'), atom), |a| format!("\\{}", ascii(a))),
        map(atom, ascii),
    ))(input)
}

fn ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `flag-list = "(" [flag *(SP flag)] ")"`, collapsed to set semantics.
pub(crate) fn flag_list(input: &[u8]) -> IMAPResult<HashSet<String>> {
    map(
        delimited(tag(b"("), separated_list0(sp, flag), tag(b")")),
        |flags| flags.into_iter().collect(),
    )(input)
}

/// Backslash-prefixed flags only, as used by `mailbox-list`.
fn mbx_list_flags(input: &[u8]) -> IMAPResult<HashSet<String>> {
    map(
        separated_list0(sp, preceded(char('\\'), atom)),
        |flags| flags.into_iter().map(|a| format!("\\{}", ascii(a))).collect(),
    )(input)
}

/// `mailbox = "INBOX" / astring`, with INBOX canonicalization applied.
pub(crate) fn mailbox(input: &[u8]) -> IMAPResult<Vec<u8>> {
    map(astring, canonicalize_mailbox)(input)
}

/// `mailbox-list = "(" [mbx-list-flags] ")" SP (DQUOTE QUOTED-CHAR DQUOTE / nil) SP mailbox`
pub(crate) fn mailbox_list(input: &[u8]) -> IMAPResult<List> {
    let mut parser = tuple((
        delimited(tag(b"("), opt(mbx_list_flags), tag(b")")),
        sp,
        alt((
            map(
                delimited(dquote, take_while_m_n(1, 1, |_| true), dquote),
                |b: &[u8]| Some(b[0]),
            ),
            value(None, nil),
        )),
        sp,
        mailbox,
    ));

    let (remaining, (attributes, _, delimiter, _, mailbox)) = parser(input)?;

    Ok((
        remaining,
        List {
            attributes: attributes.unwrap_or_default(),
            delimiter,
            mailbox,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailbox_canonicalizes_inbox() {
        let (rem, val) = mailbox(b"iNbOx ").unwrap();
        assert_eq!(val, b"INBOX");
        assert_eq!(rem, b" ");
    }

    #[test]
    fn test_mailbox_list() {
        let (rem, val) = mailbox_list(br#"(\HasNoChildren) "/" INBOX"#).unwrap();
        assert_eq!(rem, b"");
        assert_eq!(val.delimiter, Some(b'/'));
        assert_eq!(val.mailbox, b"INBOX");
        assert!(val.attributes.contains("\\HasNoChildren"));
    }

    #[test]
    fn test_mailbox_list_nil_delimiter() {
        let (rem, val) = mailbox_list(b"() NIL Sent").unwrap();
        assert_eq!(rem, b"");
        assert_eq!(val.delimiter, None);
        assert_eq!(val.mailbox, b"Sent");
    }
}
