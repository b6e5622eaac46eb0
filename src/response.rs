//! `response`: the top-level dispatcher for a single framed line, plus `resp-text`.

use abnf_core::streaming::{crlf, sp};
#[cfg(feature = "quirk_missing_text")]
use nom::combinator::peek;
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::{map, opt},
    multi::{many0, many1},
    sequence::{delimited, preceded},
};

use imap_response_types::{
    core::Token,
    response::{Code, CodeData, Response, ResponseText, UntaggedData},
};

use crate::{
    core::{ascii_astring, cspn, is_astring_char, number, token_text},
    decode::{unknown_token, IMAPResult},
    fetch::msg_att,
    mailbox::{flag_list, mailbox_list},
    search::esearch_response,
    status::status_response,
};

/// `response = continue-req / tagged-response / untagged-response`
///
/// The three top-level shapes a framed IMAP line can take, dispatched on its leading byte.
pub(crate) fn response(input: &[u8]) -> IMAPResult<Response> {
    alt((continue_req, untagged_response, tagged_response))(input)
}

/// `"+" SP resp-text CRLF`
fn continue_req(input: &[u8]) -> IMAPResult<Response> {
    let (input, _) = tag(b"+ ")(input)?;
    let (input, text) = resp_text(input)?;
    let (input, _) = crlf(input)?;
    Ok((input, Response::ContinueReq { text }))
}

/// `tag SP ("OK" / "NO" / "BAD") SP resp-text CRLF`
fn tagged_response(input: &[u8]) -> IMAPResult<Response> {
    let (input, tag_bytes) = nom::bytes::streaming::take_while1(|b| is_astring_char(b) && b != b'+')(input)?;
    let (input, _) = sp(input)?;
    let (input, kind_name) = token_text(input)?;
    let Some(kind) = Token::classify(kind_name) else {
        return unknown_token(input, kind_name, "tagged response status");
    };
    if !matches!(kind, Token::Ok | Token::No | Token::Bad) {
        return unknown_token(input, kind_name, "tagged response status");
    }
    let (input, _) = sp(input)?;
    let (input, text) = resp_text(input)?;
    let (input, _) = crlf(input)?;

    Ok((
        input,
        Response::TaggedResponse {
            tag: String::from_utf8_lossy(tag_bytes).into_owned(),
            kind,
            text,
        },
    ))
}

/// `"*" SP (resp-cond-state / mailbox-data / message-data / ...) CRLF`
fn untagged_response(input: &[u8]) -> IMAPResult<Response> {
    let (input, _) = tag(b"* ")(input)?;
    let (input, data) = alt((numeric_untagged, keyword_untagged))(input)?;
    let (input, _) = crlf(input)?;
    Ok((input, data))
}

/// `number SP ("EXISTS" / "EXPUNGE" / "RECENT" / "FETCH" SP msg-att)`
fn numeric_untagged(input: &[u8]) -> IMAPResult<Response> {
    let (input, seq) = number(input)?;
    let (input, _) = sp(input)?;
    let (input, name) = token_text(input)?;
    let Some(kind) = Token::classify(name) else {
        return unknown_token(input, name, "untagged message-data");
    };

    let (input, data) = match kind {
        Token::Exists => (input, UntaggedData::Exists(seq)),
        Token::Expunge => (input, UntaggedData::Expunge(seq)),
        Token::Recent => (input, UntaggedData::Recent(seq)),
        Token::Fetch => {
            let (input, _) = sp(input)?;
            let (input, fetch) = msg_att(input, seq)?;
            (input, UntaggedData::Fetch(fetch))
        }
        _ => return unknown_token(input, name, "untagged message-data"),
    };

    Ok((input, Response::UntaggedResponse { kind, data }))
}

/// Untagged data introduced by a keyword rather than a leading sequence number.
fn keyword_untagged(input: &[u8]) -> IMAPResult<Response> {
    let (input, name) = token_text(input)?;
    let Some(kind) = Token::classify(name) else {
        return unknown_token(input, name, "untagged response");
    };

    let (input, data) = match kind {
        Token::Ok | Token::No | Token::Bad | Token::Preauth | Token::Bye => {
            let (input, _) = sp(input)?;
            let (input, text) = resp_text(input)?;
            (input, UntaggedData::ResponseText(text))
        }
        Token::Capability => {
            let (input, caps) = many1(preceded(sp, ascii_astring))(input)?;
            (input, UntaggedData::Capability(caps.into_iter().collect()))
        }
        Token::Enabled => {
            let (input, caps) = many0(preceded(sp, ascii_astring))(input)?;
            (input, UntaggedData::Enabled(caps.into_iter().collect()))
        }
        Token::Flags => {
            let (input, _) = sp(input)?;
            let (input, flags) = flag_list(input)?;
            (input, UntaggedData::Flags(flags))
        }
        Token::List => {
            let (input, _) = sp(input)?;
            let (input, list) = mailbox_list(input)?;
            (input, UntaggedData::List(list))
        }
        Token::Lsub => {
            let (input, _) = sp(input)?;
            let (input, list) = mailbox_list(input)?;
            (input, UntaggedData::Lsub(list))
        }
        Token::Search => {
            let (input, nums) = many0(preceded(sp, number))(input)?;
            (input, UntaggedData::Search(nums))
        }
        Token::Status => {
            let (input, status) = status_response(input)?;
            (input, UntaggedData::Status(status))
        }
        Token::Esearch => {
            let (input, esearch) = esearch_response(input)?;
            (input, UntaggedData::Esearch(esearch))
        }
        _ => return unknown_token(input, name, "untagged response"),
    };

    Ok((input, Response::UntaggedResponse { kind, data }))
}

/// `resp-text = ["[" resp-text-code "]" SP] text`
pub(crate) fn resp_text(input: &[u8]) -> IMAPResult<ResponseText> {
    let (input, maybe_code) = opt(delimited(tag(b"["), resp_text_code, tag(b"]")))(input)?;
    let (code, code_data) = match maybe_code {
        Some((code, data)) => (Some(code), data),
        None => (None, None),
    };

    let (input, text) = if code.is_some() {
        alt((
            map(preceded(sp, text_span), Some),
            #[cfg(feature = "quirk_missing_text")]
            map(peek(crlf), |_| {
                log::warn!("resp-text: code present with no trailing text, accepted under quirk_missing_text");
                None
            }),
        ))(input)?
    } else {
        map(text_span, Some)(input)?
    };

    Ok((input, ResponseText { text, code, code_data }))
}

fn text_span(input: &[u8]) -> IMAPResult<String> {
    let (rem, bytes) = cspn(input, b"\r\n")?;
    Ok((rem, String::from_utf8_lossy(bytes).into_owned()))
}

/// `resp-text-code`: closed keywords taking no data, a number, or arbitrary text; anything else
/// is kept by its raw ASCII name.
fn resp_text_code(input: &[u8]) -> IMAPResult<(Code, Option<CodeData>)> {
    let (input, name) = token_text(input)?;
    match Token::classify(name) {
        Some(known @ (Token::Alert | Token::Parse | Token::ReadOnly | Token::ReadWrite | Token::TryCreate)) => {
            Ok((input, (Code::Known(known), None)))
        }
        Some(
            known @ (Token::HighestModSeq | Token::UidNext | Token::UidValidity | Token::Unseen),
        ) => {
            let (input, _) = sp(input)?;
            let (input, num) = number(input)?;
            Ok((input, (Code::Known(known), Some(CodeData::Number(num)))))
        }
        Some(known) => {
            let (input, data) = opt(preceded(sp, code_data_span))(input)?;
            Ok((input, (Code::Known(known), data)))
        }
        None => {
            let (input, data) = opt(preceded(sp, code_data_span))(input)?;
            Ok((input, (Code::Other(String::from_utf8_lossy(name).into_owned()), data)))
        }
    }
}

fn code_data_span(input: &[u8]) -> IMAPResult<CodeData> {
    let (rem, bytes) = cspn(input, b"]\r\n")?;
    Ok((rem, CodeData::Bytes(bytes.to_vec())))
}

/// Top-level entry point: parses exactly one complete response line, failing if the line's
/// framed bytes aren't fully consumed.
pub fn parse_response_line(input: &[u8]) -> Result<Response, crate::decode::ParseError> {
    match response(input) {
        Ok((remaining, resp)) if remaining.is_empty() => Ok(resp),
        Ok((remaining, _)) => Err(crate::decode::ParseError::TrailingBytes {
            at: input.len() - remaining.len(),
        }),
        Err(e) => Err(crate::decode::to_parse_error(input, e)),
    }
}
