//! `envelope` and `address`.

use abnf_core::streaming::sp;
use chrono::DateTime;
use imap_response_types::envelope::{Address, Envelope};
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::map,
    multi::many1,
    sequence::{delimited, tuple},
};

use crate::{
    core::{nil, nstring},
    decode::IMAPResult,
};

/// ```abnf
/// envelope = "(" env-date SP env-subject SP env-from SP env-sender SP env-reply-to SP env-to SP
///                env-cc SP env-bcc SP env-in-reply-to SP env-message-id ")"
/// ```
pub(crate) fn envelope(input: &[u8]) -> IMAPResult<Envelope> {
    let mut parser = delimited(
        tag(b"("),
        tuple((
            env_date,
            sp,
            env_subject,
            sp,
            env_address_list,
            sp,
            env_address_list,
            sp,
            env_address_list,
            sp,
            env_address_list,
            sp,
            env_address_list,
            sp,
            env_address_list,
            sp,
            env_in_reply_to,
            sp,
            env_message_id,
        )),
        tag(b")"),
    );

    let (
        remaining,
        (
            date,
            _,
            subject,
            _,
            from,
            _,
            sender,
            _,
            reply_to,
            _,
            to,
            _,
            cc,
            _,
            bcc,
            _,
            in_reply_to,
            _,
            message_id,
        ),
    ) = parser(input)?;

    Ok((
        remaining,
        Envelope {
            date,
            subject,
            from,
            sender,
            reply_to,
            to,
            cc,
            bcc,
            in_reply_to,
            message_id,
        },
    ))
}

/// `env-date = nstring`, parsed as an RFC 2822 date.
///
/// A present but unparseable date is treated as absent rather than as a parse failure — servers
/// occasionally emit a `Date` header that doesn't survive round-tripping through RFC 2822 parsing,
/// and that shouldn't take down the whole response.
pub(crate) fn env_date(input: &[u8]) -> IMAPResult<Option<chrono::DateTime<chrono::FixedOffset>>> {
    let (remaining, raw) = nstring(input)?;
    let date = raw.and_then(|bytes| {
        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| DateTime::parse_from_rfc2822(s.trim()).ok())
    });
    Ok((remaining, date))
}

/// `env-subject = nstring`
pub(crate) fn env_subject(input: &[u8]) -> IMAPResult<Option<Vec<u8>>> {
    nstring(input)
}

/// `env-from / env-sender / env-reply-to / env-to / env-cc / env-bcc = "(" 1*address ")" / nil`
pub(crate) fn env_address_list(input: &[u8]) -> IMAPResult<Option<Vec<Address>>> {
    alt((
        map(delimited(tag(b"("), many1(address), tag(b")")), Some),
        map(nil, |_| None),
    ))(input)
}

/// `env-in-reply-to = nstring`
pub(crate) fn env_in_reply_to(input: &[u8]) -> IMAPResult<Option<Vec<u8>>> {
    nstring(input)
}

/// `env-message-id = nstring`
pub(crate) fn env_message_id(input: &[u8]) -> IMAPResult<Option<Vec<u8>>> {
    nstring(input)
}

/// `address = "(" addr-name SP addr-adl SP addr-mailbox SP addr-host ")"`
pub(crate) fn address(input: &[u8]) -> IMAPResult<Address> {
    let mut parser = delimited(
        tag(b"("),
        tuple((nstring, sp, nstring, sp, nstring, sp, nstring)),
        tag(b")"),
    );

    let (remaining, (name, _, adl, _, mailbox, _, host)) = parser(input)?;

    Ok((
        remaining,
        Address {
            name,
            adl,
            mailbox,
            host,
        },
    ))
}
