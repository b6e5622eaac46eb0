//! `body` (single-part and multipart MIME body structure).
//!
//! Recursively defined, so recursion depth is capped the way the rest of this parser caps
//! anything driven by untrusted nesting.

use std::collections::BTreeMap;

use abnf_core::streaming::sp;
use imap_response_types::body::{
    BasicBody, Body, BodyExtension, BodyFields, Disposition, MessageBody, MultipartBody,
    MultipartExtension, SinglePartExtension, TextBody,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt},
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    core::{lowercase_string, nil, nstring, number, string},
    decode::{expected, IMAPResult},
    envelope::envelope,
};

const MAX_RECURSION: usize = 8;

/// `body = "(" (body-type-1part / body-type-mpart) ")"`
pub(crate) fn body(input: &[u8]) -> IMAPResult<Body> {
    body_limited(input, MAX_RECURSION)
}

fn body_limited<'a>(input: &'a [u8], remaining: usize) -> IMAPResult<'a, Body> {
    if remaining == 0 {
        return expected(input, "body (recursion limit reached)");
    }
    delimited(
        tag(b"("),
        alt((
            |i| body_type_1part(i, remaining - 1),
            |i| body_type_mpart(i, remaining - 1),
        )),
        tag(b")"),
    )(input)
}

/// `body-type-1part = (body-type-basic / body-type-msg / body-type-text) [SP body-ext-1part]`
fn body_type_1part(input: &[u8], remaining: usize) -> IMAPResult<Body> {
    let (input, single) = alt((
        |i| body_type_msg(i, remaining),
        body_type_text,
        body_type_basic,
    ))(input)?;
    let (input, extension) = opt(preceded(sp, body_ext_1part))(input)?;
    let extension = extension.unwrap_or_default();

    let body = match single {
        SinglePart::Text { subtype, fields, lines } => Body::Text(TextBody {
            media_type: "text".into(),
            media_subtype: subtype,
            fields,
            lines,
            extension,
        }),
        SinglePart::Message { fields, envelope, body, lines } => Body::Message(MessageBody {
            media_type: "message".into(),
            media_subtype: "rfc822".into(),
            fields,
            envelope,
            body: Box::new(body),
            lines,
            extension,
        }),
        SinglePart::Basic { media_type, media_subtype, fields } => Body::Basic(BasicBody {
            media_type,
            media_subtype,
            fields,
            extension,
        }),
    };

    Ok((input, body))
}

enum SinglePart {
    Text { subtype: String, fields: BodyFields, lines: u64 },
    Message { fields: BodyFields, envelope: imap_response_types::envelope::Envelope, body: Body, lines: u64 },
    Basic { media_type: String, media_subtype: String, fields: BodyFields },
}

/// `body-type-basic = media-basic SP body-fields`
fn body_type_basic(input: &[u8]) -> IMAPResult<SinglePart> {
    let (input, ((media_type, media_subtype), _, fields)) =
        tuple((media_basic, sp, body_fields))(input)?;
    Ok((input, SinglePart::Basic { media_type, media_subtype, fields }))
}

/// `body-type-msg = media-message SP body-fields SP envelope SP body SP body-fld-lines`
fn body_type_msg(input: &[u8], remaining: usize) -> IMAPResult<SinglePart> {
    let (input, (_, _, fields, _, env, _, body, _, lines)) = tuple((
        media_message,
        sp,
        body_fields,
        sp,
        envelope,
        sp,
        |i| body_limited(i, remaining),
        sp,
        number,
    ))(input)?;
    Ok((input, SinglePart::Message { fields, envelope: env, body, lines }))
}

/// `body-type-text = media-text SP body-fields SP body-fld-lines`
fn body_type_text(input: &[u8]) -> IMAPResult<SinglePart> {
    let (input, (subtype, _, fields, _, lines)) =
        tuple((media_text, sp, body_fields, sp, number))(input)?;
    Ok((input, SinglePart::Text { subtype, fields, lines }))
}

/// `body-fields = body-fld-param SP body-fld-id SP body-fld-desc SP body-fld-enc SP
///                body-fld-octets`
fn body_fields(input: &[u8]) -> IMAPResult<BodyFields> {
    let (input, (params, _, id, _, description, _, encoding, _, size)) = tuple((
        body_fld_param,
        sp,
        nstring_ascii,
        sp,
        nstring_ascii,
        sp,
        lowercase_string,
        sp,
        number,
    ))(input)?;
    Ok((
        input,
        BodyFields { params, id, description, encoding, size },
    ))
}

fn nstring_ascii(input: &[u8]) -> IMAPResult<Option<String>> {
    let (input, maybe) = nstring(input)?;
    Ok((input, maybe.map(|b| String::from_utf8_lossy(&b).into_owned())))
}

/// `body-fld-param = "(" string SP string *(SP string SP string) ")" / nil`
fn body_fld_param(input: &[u8]) -> IMAPResult<BTreeMap<String, String>> {
    alt((
        delimited(
            tag(b"("),
            map(
                separated_list0(
                    sp,
                    map(tuple((lowercase_string, sp, ascii_or_lossy)), |(k, _, v)| (k, v)),
                ),
                |pairs| pairs.into_iter().collect(),
            ),
            tag(b")"),
        ),
        map(nil, |_| BTreeMap::new()),
    ))(input)
}

fn ascii_or_lossy(input: &[u8]) -> IMAPResult<String> {
    map(string, |b| String::from_utf8_lossy(&b).into_owned())(input)
}

/// `body-ext-1part = body-fld-md5 [SP body-fld-dsp [SP body-fld-lang [SP body-fld-loc
///                    *(SP body-extension)]]]`
fn body_ext_1part(input: &[u8]) -> IMAPResult<SinglePartExtension> {
    let (input, md5) = nstring(input)?;
    let (input, disposition) = opt(preceded(sp, body_fld_dsp))(input)?;
    let (input, language) = opt(preceded(sp, body_fld_lang))(input)?;
    let (input, loc_and_ext) = opt(preceded(
        sp,
        tuple((nstring, many0(preceded(sp, |i| body_extension(i, MAX_RECURSION))))),
    ))(input)?;

    let (location, extension) = match loc_and_ext {
        Some((location, extension)) => (location, extension),
        None => (None, Vec::new()),
    };

    Ok((
        input,
        SinglePartExtension {
            md5,
            disposition: disposition.flatten(),
            language,
            location,
            extension,
        },
    ))
}

/// `body-fld-dsp = "(" string SP body-fld-param ")" / nil`
fn body_fld_dsp(input: &[u8]) -> IMAPResult<Option<Disposition>> {
    alt((
        delimited(
            tag(b"("),
            map(
                tuple((lowercase_string, sp, body_fld_param)),
                |(disposition_type, _, params)| Some(Disposition { disposition_type, params }),
            ),
            tag(b")"),
        ),
        map(nil, |_| None),
    ))(input)
}

/// `body-fld-lang = nstring / "(" string *(SP string) ")"`
fn body_fld_lang(input: &[u8]) -> IMAPResult<Option<Vec<String>>> {
    alt((
        map(nstring, |maybe| {
            maybe.map(|bytes| vec![String::from_utf8_lossy(&bytes).into_owned()])
        }),
        map(
            delimited(tag(b"("), separated_list1(sp, ascii_or_lossy), tag(b")")),
            Some,
        ),
    ))(input)
}

/// `body-extension = nstring / number / "(" body-extension *(SP body-extension) ")"`
fn body_extension(input: &[u8], remaining: usize) -> IMAPResult<BodyExtension> {
    if remaining == 0 {
        return expected(input, "body-extension (recursion limit reached)");
    }
    alt((
        map(number, BodyExtension::Number),
        map(nstring, BodyExtension::NString),
        map(
            delimited(
                tag(b"("),
                separated_list1(sp, |i| body_extension(i, remaining - 1)),
                tag(b")"),
            ),
            BodyExtension::List,
        ),
    ))(input)
}

/// `body-type-mpart = 1*body SP media-subtype [SP body-ext-mpart]`
fn body_type_mpart(input: &[u8], remaining: usize) -> IMAPResult<Body> {
    let (input, (parts, _, subtype, extension)) = tuple((
        many1(|i| body_limited(i, remaining)),
        sp,
        lowercase_string,
        opt(preceded(sp, body_ext_mpart)),
    ))(input)?;

    Ok((
        input,
        Body::Multipart(MultipartBody {
            media_type: "multipart".into(),
            media_subtype: subtype,
            parts,
            extension: extension.unwrap_or_default(),
        }),
    ))
}

/// `body-ext-mpart = body-fld-param [SP body-fld-dsp [SP body-fld-lang [SP body-fld-loc
///                    *(SP body-extension)]]]`
fn body_ext_mpart(input: &[u8]) -> IMAPResult<MultipartExtension> {
    let (input, params) = body_fld_param(input)?;
    let (input, disposition) = opt(preceded(sp, body_fld_dsp))(input)?;
    let (input, language) = opt(preceded(sp, body_fld_lang))(input)?;
    let (input, loc_and_ext) = opt(preceded(
        sp,
        tuple((nstring, many0(preceded(sp, |i| body_extension(i, MAX_RECURSION))))),
    ))(input)?;

    let (location, extension) = match loc_and_ext {
        Some((location, extension)) => (location, extension),
        None => (None, Vec::new()),
    };

    Ok((
        input,
        MultipartExtension {
            params,
            disposition: disposition.flatten(),
            language,
            location,
            extension,
        },
    ))
}

/// `media-basic = string SP media-subtype`
fn media_basic(input: &[u8]) -> IMAPResult<(String, String)> {
    let (input, (media_type, _, subtype)) = tuple((lowercase_string, sp, lowercase_string))(input)?;
    Ok((input, (media_type, subtype)))
}

/// `media-message = DQUOTE "MESSAGE" DQUOTE SP DQUOTE "RFC822" DQUOTE`
fn media_message(input: &[u8]) -> IMAPResult<&[u8]> {
    tag_no_case(b"\"MESSAGE\" \"RFC822\"")(input)
}

/// `media-text = DQUOTE "TEXT" DQUOTE SP media-subtype`
fn media_text(input: &[u8]) -> IMAPResult<String> {
    preceded(tag_no_case(b"\"TEXT\" "), lowercase_string)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_basic() {
        let (rem, val) = body(br#"("application" "octet-stream" NIL NIL NIL "base64" 4096)xxx"#).unwrap();
        assert_eq!(rem, b"xxx");
        match val {
            Body::Basic(b) => {
                assert_eq!(b.media_type, "application");
                assert_eq!(b.media_subtype, "octet-stream");
                assert_eq!(b.fields.size, 4096);
            }
            _ => panic!("expected basic body"),
        }
    }

    #[test]
    fn test_body_type_text() {
        let (rem, val) =
            body(br#"("text" "plain" ("charset" "utf-8") NIL NIL "7bit" 120 10)xxx"#).unwrap();
        assert_eq!(rem, b"xxx");
        match val {
            Body::Text(b) => {
                assert_eq!(b.media_subtype, "plain");
                assert_eq!(b.fields.params.get("charset").map(String::as_str), Some("utf-8"));
                assert_eq!(b.lines, 10);
            }
            _ => panic!("expected text body"),
        }
    }

    #[test]
    fn test_body_type_mpart() {
        let input = br#"(("text" "plain" NIL NIL NIL "7bit" 10 1)("text" "html" NIL NIL NIL "7bit" 20 2) "mixed")xxx"#;
        let (rem, val) = body(input).unwrap();
        assert_eq!(rem, b"xxx");
        match val {
            Body::Multipart(m) => {
                assert_eq!(m.media_subtype, "mixed");
                assert_eq!(m.parts.len(), 2);
            }
            _ => panic!("expected multipart body"),
        }
    }

    #[test]
    fn test_body_recursion_limit() {
        let input = "(".repeat(1_000_000);
        assert!(body(input.as_bytes()).is_err());
    }
}
