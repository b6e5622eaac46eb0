//! `msg-att`: the parenthesised item list inside a `FETCH` response.

use std::collections::HashMap;

use abnf_core::streaming::sp;
use imap_response_types::{
    core::Token,
    fetch::{BodySection, Fetch, FetchItem},
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while},
    combinator::opt,
    multi::separated_list0,
    sequence::delimited,
};

use crate::{
    body::body,
    core::{nstring, number},
    datetime::date_time,
    decode::IMAPResult,
    envelope::envelope,
    mailbox::flag,
};

enum Item {
    Keyed(Token, FetchItem),
    Section { name: String, section: BodySection },
}

/// `msg-att = "(" (msg-att-dynamic / msg-att-static) *(SP (msg-att-dynamic / msg-att-static)) ")"`
///
/// `msg` is the sequence number read by the caller's dispatcher, ahead of this group.
pub(crate) fn msg_att(input: &[u8], msg: u64) -> IMAPResult<Fetch> {
    let (input, raw_items) = delimited(tag(b"("), separated_list0(sp, fetch_item), tag(b")"))(input)?;

    let mut items = HashMap::new();
    let mut sections: HashMap<String, BodySection> = HashMap::new();
    for item in raw_items {
        match item {
            Item::Keyed(key, value) => {
                items.insert(key, value);
            }
            Item::Section { name, section } => {
                sections.insert(name, section);
            }
        }
    }
    if !sections.is_empty() {
        items.insert(Token::BodySections, FetchItem::BodySections(sections));
    }

    Ok((input, Fetch { msg, items }))
}

fn fetch_item(input: &[u8]) -> IMAPResult<Item> {
    alt((
        flags_item,
        envelope_item,
        internaldate_item,
        modseq_item,
        body_section_item,
        bodystructure_item,
        body_item,
        rfc822_header_item,
        rfc822_text_item,
        rfc822_size_item,
        rfc822_item,
        uid_item,
        gm_msgid_item,
    ))(input)
}

/// `"FLAGS" SP "(" [flag *(SP flag)] ")"`
fn flags_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"FLAGS")(input)?;
    let (input, _) = sp(input)?;
    let (input, flags) = delimited(tag(b"("), separated_list0(sp, flag), tag(b")"))(input)?;
    Ok((
        input,
        Item::Keyed(Token::Flags, FetchItem::Flags(flags.into_iter().collect())),
    ))
}

/// `"ENVELOPE" SP envelope`
fn envelope_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"ENVELOPE")(input)?;
    let (input, _) = sp(input)?;
    let (input, env) = envelope(input)?;
    Ok((input, Item::Keyed(Token::Envelope, FetchItem::Envelope(Box::new(env)))))
}

/// `"INTERNALDATE" SP date-time`
fn internaldate_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"INTERNALDATE")(input)?;
    let (input, _) = sp(input)?;
    let (input, dt) = date_time(input)?;
    Ok((input, Item::Keyed(Token::InternalDate, FetchItem::InternalDate(dt))))
}

/// `"MODSEQ" SP "(" number ")"`
fn modseq_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"MODSEQ")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = delimited(tag(b"("), number, tag(b")"))(input)?;
    Ok((input, Item::Keyed(Token::ModSeq, FetchItem::ModSeq(val))))
}

/// `"BODYSTRUCTURE" SP body`
fn bodystructure_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"BODYSTRUCTURE")(input)?;
    let (input, _) = sp(input)?;
    let (input, b) = body(input)?;
    Ok((input, Item::Keyed(Token::BodyStructure, FetchItem::Body(Box::new(b)))))
}

/// Bare `"BODY" SP body` (no section bracket).
fn body_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"BODY")(input)?;
    let (input, _) = sp(input)?;
    let (input, b) = body(input)?;
    Ok((input, Item::Keyed(Token::Body, FetchItem::Body(Box::new(b)))))
}

/// `"BODY" section ["<" number ">"] SP nstring`, accumulated under the synthetic
/// [`Token::BodySections`] key rather than returned directly.
fn body_section_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"BODY")(input)?;
    let (input, section) = delimited(tag(b"["), take_while(|b: u8| b != b']'), tag(b"]"))(input)?;
    let (input, origin) = opt(delimited(tag(b"<"), number, tag(b">")))(input)?;
    let (input, _) = sp(input)?;
    let (input, content) = nstring(input)?;

    Ok((
        input,
        Item::Section {
            name: String::from_utf8_lossy(section).into_owned(),
            section: BodySection { content, origin },
        },
    ))
}

/// `"RFC822.HEADER" SP nstring`
fn rfc822_header_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"RFC822.HEADER")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = nstring(input)?;
    Ok((input, Item::Keyed(Token::Rfc822Header, FetchItem::NString(val))))
}

/// `"RFC822.TEXT" SP nstring`
fn rfc822_text_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"RFC822.TEXT")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = nstring(input)?;
    Ok((input, Item::Keyed(Token::Rfc822Text, FetchItem::NString(val))))
}

/// `"RFC822.SIZE" SP number`
fn rfc822_size_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"RFC822.SIZE")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = number(input)?;
    Ok((input, Item::Keyed(Token::Rfc822Size, FetchItem::Number(val))))
}

/// Bare `"RFC822" SP nstring`
fn rfc822_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"RFC822")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = nstring(input)?;
    Ok((input, Item::Keyed(Token::Rfc822, FetchItem::NString(val))))
}

/// `"UID" SP number`
fn uid_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"UID")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = number(input)?;
    Ok((input, Item::Keyed(Token::Uid, FetchItem::Number(val))))
}

/// `"X-GM-MSGID" SP number` (Gmail extension).
fn gm_msgid_item(input: &[u8]) -> IMAPResult<Item> {
    let (input, _) = tag_no_case(b"X-GM-MSGID")(input)?;
    let (input, _) = sp(input)?;
    let (input, val) = number(input)?;
    Ok((input, Item::Keyed(Token::XGmMsgId, FetchItem::Number(val))))
}
