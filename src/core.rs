//! Primitive parsers: `number`, `atom`, `string`, `nstring`, `astring`, and the `cspn` text-span
//! helper used by resp-text and body-extension free text.

use abnf_core::streaming::{crlf, dquote};
use nom::{
    branch::alt,
    bytes::streaming::{escaped, tag_no_case, take, take_while1},
    character::streaming::{char, digit1, one_of},
    combinator::{map, map_res},
    sequence::{delimited, tuple},
};

use crate::decode::{IMAPErrorKind, IMAPParseError, IMAPResult};

/// `number = 1*DIGIT`, decoded to an unsigned 64-bit integer; overflow is fatal.
pub(crate) fn number(input: &[u8]) -> IMAPResult<u64> {
    map_res(digit1, |val: &[u8]| {
        // Safety: `digit1` only ever matches ASCII digits.
        std::str::from_utf8(val).unwrap().parse::<u64>()
    })(input)
}

/// `ATOM-CHAR = <any CHAR except atom-specials>`.
///
/// `atom-specials` is `( ")" "{" SP CTL list-wildcards quoted-specials resp-specials`.
pub(crate) fn is_atom_char(b: u8) -> bool {
    (0x21..=0x7e).contains(&b)
        && !matches!(b, b'(' | b')' | b'{' | b'%' | b'*' | b'"' | b'\\' | b']')
}

/// `ASTRING-CHAR = ATOM-CHAR / "]"`.
pub(crate) fn is_astring_char(b: u8) -> bool {
    is_atom_char(b) || b == b']'
}

/// `TEXT-CHAR = <any CHAR except CR and LF>`, where `CHAR = %x01-7F`.
pub(crate) fn is_text_char(b: u8) -> bool {
    (0x01..=0x7f).contains(&b) && b != b'\r' && b != b'\n'
}

/// `quoted-specials = DQUOTE / "\"`.
pub(crate) fn is_quoted_specials(b: u8) -> bool {
    b == b'"' || b == b'\\'
}

fn is_qchar(b: u8) -> bool {
    is_text_char(b) && !is_quoted_specials(b)
}

/// `atom = 1*ATOM-CHAR`.
pub(crate) fn atom(input: &[u8]) -> IMAPResult<&[u8]> {
    take_while1(is_atom_char)(input)
}

/// `quoted = DQUOTE *QUOTED-CHAR DQUOTE`.
pub(crate) fn quoted(input: &[u8]) -> IMAPResult<Vec<u8>> {
    let (rem, (_, content, _)) = tuple((
        dquote,
        escaped(take_while1(is_qchar), '\\', one_of("\\\"")),
        dquote,
    ))(input)?;
    Ok((rem, unescape_quoted(content)))
}

fn unescape_quoted(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    while let Some(b) = iter.next() {
        if b == b'\\' {
            if let Some(escaped) = iter.next() {
                out.push(escaped);
            }
        } else {
            out.push(b);
        }
    }
    out
}

/// `literal = "{" number "}" CRLF *CHAR8`.
///
/// The scanner has already guaranteed the `N` literal bytes are present in the buffer before the
/// parser ever sees this line, so — unlike a socket-facing decoder — there is no need to signal a
/// continuation request back to the caller here.
pub(crate) fn literal(input: &[u8]) -> IMAPResult<Vec<u8>> {
    let (rem, length) = delimited(char('{'), number, char('}'))(input)?;
    let (rem, _) = crlf(rem)?;

    let n = usize::try_from(length).map_err(|_| {
        nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadNumber,
        })
    })?;
    let (rem, data) = take(n)(rem)?;

    Ok((rem, data.to_vec()))
}

/// `string = quoted / literal`.
pub(crate) fn string(input: &[u8]) -> IMAPResult<Vec<u8>> {
    alt((quoted, literal))(input)
}

/// `nstring = string / nil`.
pub(crate) fn nstring(input: &[u8]) -> IMAPResult<Option<Vec<u8>>> {
    alt((map(string, Some), map(nil, |_| None)))(input)
}

/// `nil = "NIL"`.
pub(crate) fn nil(input: &[u8]) -> IMAPResult<&[u8]> {
    tag_no_case(b"NIL")(input)
}

/// `astring = 1*ASTRING-CHAR / string`.
pub(crate) fn astring(input: &[u8]) -> IMAPResult<Vec<u8>> {
    alt((map(take_while1(is_astring_char), |b: &[u8]| b.to_vec()), string))(input)
}

/// An ASCII-only `astring`, decoded to a `String`.
pub(crate) fn ascii_astring(input: &[u8]) -> IMAPResult<String> {
    let (rem, bytes) = astring(input)?;
    bytes_to_ascii(input, bytes).map(|s| (rem, s))
}

/// An ASCII-only, lower-cased `string` (used for media types, subtypes, encodings).
pub(crate) fn lowercase_string(input: &[u8]) -> IMAPResult<String> {
    let (rem, bytes) = string(input)?;
    bytes_to_ascii(input, bytes).map(|mut s| {
        s.make_ascii_lowercase();
        (rem, s)
    })
}

/// An ASCII-only `nstring`.
pub(crate) fn ascii_nstring(input: &[u8]) -> IMAPResult<Option<String>> {
    let (rem, maybe) = nstring(input)?;
    match maybe {
        None => Ok((rem, None)),
        Some(bytes) => bytes_to_ascii(input, bytes).map(|s| (rem, Some(s))),
    }
}

fn bytes_to_ascii(input: &[u8], bytes: Vec<u8>) -> Result<String, nom::Err<IMAPParseError<'_>>> {
    if bytes.is_ascii() {
        // `is_ascii` guarantees `from_utf8` succeeds.
        Ok(String::from_utf8(bytes).unwrap())
    } else {
        Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::Expected("ASCII text"),
        }))
    }
}

/// Longest nonempty run of bytes in `[0x01, 0x7F]` not in `reject`.
pub(crate) fn cspn<'a>(input: &'a [u8], reject: &[u8]) -> IMAPResult<'a, &'a [u8]> {
    let end = input
        .iter()
        .position(|b| !(0x01..=0x7f).contains(b) || reject.contains(b))
        .unwrap_or(input.len());

    if end == 0 {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::EmptySpan,
        }));
    }

    Ok((&input[end..], &input[..end]))
}

/// A maximal run of `letters / digits / "." / "-"`, the shape every grammar keyword takes.
pub(crate) fn token_text(input: &[u8]) -> IMAPResult<&[u8]> {
    take_while1(|b: u8| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(number(b"0?"), Ok((b"?".as_ref(), 0)));
        assert_eq!(number(b"123?"), Ok((b"?".as_ref(), 123)));
        assert!(number(b"?").is_err());
    }

    #[test]
    fn test_atom() {
        let (rem, val) = atom(b"a(").unwrap();
        assert_eq!(val, b"a");
        assert_eq!(rem, b"(");
    }

    #[test]
    fn test_quoted() {
        let (rem, val) = quoted(br#""Hello"???"#).unwrap();
        assert_eq!(rem, b"???");
        assert_eq!(val, b"Hello");

        let (rem, val) = quoted(br#""Hello \"World\""???"#).unwrap();
        assert_eq!(rem, b"???");
        assert_eq!(val, br#"Hello "World""#);

        assert!(matches!(quoted(br#""#), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn test_literal() {
        let (rem, val) = literal(b"{3}\r\n123xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(val, b"123");
    }

    #[test]
    fn test_nstring() {
        assert_eq!(nstring(b"NILxxx").unwrap(), (b"xxx".as_ref(), None));
        assert_eq!(
            nstring(br#""hi"xxx"#).unwrap(),
            (b"xxx".as_ref(), Some(b"hi".to_vec()))
        );
    }

    #[test]
    fn test_astring() {
        let (rem, val) = astring(b"INBOX ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(val, b"INBOX");
    }

    #[test]
    fn test_cspn() {
        let (rem, val) = cspn(b"hello]world", b"]").unwrap();
        assert_eq!(val, b"hello");
        assert_eq!(rem, b"]world");

        assert!(cspn(b"]world", b"]").is_err());
    }
}
