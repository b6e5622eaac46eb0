//! `status-att` (mailbox-data STATUS response).

use std::collections::HashMap;

use abnf_core::streaming::sp;
use imap_response_types::{core::Token, status::Status};
use nom::{
    bytes::streaming::tag,
    multi::separated_list0,
    sequence::{delimited, preceded},
};

use crate::{
    core::{number, token_text},
    decode::{unknown_token, IMAPResult},
    mailbox::mailbox,
};

/// `mailbox-data =/ "STATUS" SP mailbox SP "(" [status-att-list] ")"`
///
/// The leading `"STATUS"` keyword is consumed by the caller's dispatcher; this parser starts
/// right after it.
pub(crate) fn status_response(input: &[u8]) -> IMAPResult<Status> {
    let (input, mailbox) = preceded(sp, mailbox)(input)?;
    let (input, status) = preceded(sp, status_att_list)(input)?;
    Ok((input, Status { mailbox, status }))
}

/// `"(" [status-att-val *(SP status-att-val)] ")"`
fn status_att_list(input: &[u8]) -> IMAPResult<HashMap<Token, u64>> {
    let (input, pairs) = delimited(tag(b"("), separated_list0(sp, status_att_val), tag(b")"))(input)?;
    Ok((input, pairs.into_iter().collect()))
}

/// `status-att-val = ("MESSAGES" / "RECENT" / "UIDNEXT" / "UIDVALIDITY" / "UNSEEN" /
///                     "HIGHESTMODSEQ") SP number`
fn status_att_val(input: &[u8]) -> IMAPResult<(Token, u64)> {
    let (rem, name) = token_text(input)?;
    let Some(key) = Token::classify(name) else {
        return unknown_token(input, name, "status-att");
    };
    let (rem, value) = preceded(sp, number)(rem)?;
    Ok((rem, (key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imap_response_types::core::Token;

    #[test]
    fn test_status_response() {
        let (rem, val) = status_response(b" INBOX (MESSAGES 231 UIDNEXT 44292)xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val.mailbox, b"INBOX");
        assert_eq!(val.status.get(&Token::Messages), Some(&231));
        assert_eq!(val.status.get(&Token::UidNext), Some(&44292));
    }

    #[test]
    fn test_status_response_empty_list() {
        let (rem, val) = status_response(b" INBOX ()xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert!(val.status.is_empty());
    }
}
