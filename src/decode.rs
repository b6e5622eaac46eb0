//! Internal nom error plumbing, and the public error types surfaced at the decode boundary.

use nom::error::{ErrorKind, FromExternalError, ParseError as NomParseError};

/// An extended version of [`nom::IResult`], threaded through every parser in this crate.
pub(crate) type IMAPResult<'a, O> = Result<(&'a [u8], O), nom::Err<IMAPParseError<'a>>>;

/// An extended version of [`nom::error::Error`], carrying enough detail to build a [`ParseError`].
#[derive(Debug)]
pub(crate) struct IMAPParseError<'a> {
    pub input: &'a [u8],
    pub kind: IMAPErrorKind,
}

#[derive(Debug)]
pub(crate) enum IMAPErrorKind {
    Expected(&'static str),
    EmptySpan,
    UnknownToken { token: String, context: &'static str },
    BadNumber,
    InvalidEscape,
    InvalidDate,
    TrailingBytes,
    Nom(ErrorKind),
}

impl<'a> NomParseError<&'a [u8]> for IMAPParseError<'a> {
    fn from_error_kind(input: &'a [u8], kind: ErrorKind) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }

    fn append(_input: &'a [u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> FromExternalError<&'a [u8], std::num::ParseIntError> for IMAPParseError<'a> {
    fn from_external_error(input: &'a [u8], _kind: ErrorKind, _e: std::num::ParseIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

pub(crate) fn expected<'a, O>(input: &'a [u8], what: &'static str) -> IMAPResult<'a, O> {
    Err(nom::Err::Error(IMAPParseError {
        input,
        kind: IMAPErrorKind::Expected(what),
    }))
}

pub(crate) fn invalid_date<'a, O>(input: &'a [u8]) -> IMAPResult<'a, O> {
    Err(nom::Err::Failure(IMAPParseError {
        input,
        kind: IMAPErrorKind::InvalidDate,
    }))
}

pub(crate) fn unknown_token<'a, O>(
    input: &'a [u8],
    token: &[u8],
    context: &'static str,
) -> IMAPResult<'a, O> {
    Err(nom::Err::Failure(IMAPParseError {
        input,
        kind: IMAPErrorKind::UnknownToken {
            token: String::from_utf8_lossy(token).into_owned(),
            context,
        },
    }))
}

/// Error produced by a [`crate::scanner::Scanner`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// No CRLF terminating a logical line has been seen yet; feed more bytes and retry.
    #[error("incomplete line: more bytes are required")]
    IncompleteLine,
    /// A `{N}CRLF` literal was announced but its `N` bytes have not all arrived yet.
    #[error("incomplete literal: more bytes are required")]
    IncompleteLiteral,
    /// [`crate::scanner::Scanner::consume`] was asked to drop more bytes than are buffered.
    #[error("consume({requested}) exceeds the buffered length {available}")]
    ConsumeOverflow { requested: usize, available: usize },
    /// A `{N}` literal length does not fit the host's addressable size.
    #[error("literal length {length} does not fit in memory")]
    LiteralTooLarge { length: u64 },
}

/// Error produced by the response parser.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The buffer ended before the grammar production it was parsing did.
    #[error("truncated: more bytes are required to complete this response")]
    Truncated,
    /// A specific byte or keyword was required and something else was found.
    #[error("expected {what} at byte {at}")]
    Expected { what: &'static str, at: usize },
    /// A production that requires at least one byte matched zero.
    #[error("empty span where a non-empty one was required, at byte {at}")]
    EmptySpan { at: usize },
    /// A grammar keyword was not one of the token table's recognized spellings.
    #[error("unknown token {token:?} in {context} at byte {at}")]
    UnknownToken {
        token: String,
        context: &'static str,
        at: usize,
    },
    /// A `number`/`number64` production overflowed 64 bits.
    #[error("numeric overflow at byte {at}")]
    NumberOverflow { at: usize },
    /// A quoted string contained `\` followed by something other than `"` or `\`.
    #[error("invalid escape sequence in a quoted string at byte {at}")]
    InvalidEscape { at: usize },
    /// An `INTERNALDATE`-style quoted date-time did not match its grammar.
    #[error("invalid date at byte {at}")]
    InvalidDate { at: usize },
    /// The parse completed but did not consume the whole buffer.
    #[error("trailing bytes after a complete response, at byte {at}")]
    TrailingBytes { at: usize },
}

/// Converts an internal nom-level failure into the public [`ParseError`], computing the byte
/// offset by pointer arithmetic against the original, un-consumed input slice.
pub(crate) fn to_parse_error(original: &[u8], err: nom::Err<IMAPParseError<'_>>) -> ParseError {
    match err {
        nom::Err::Incomplete(_) => ParseError::Truncated,
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let at = original.len().saturating_sub(e.input.len());
            match e.kind {
                IMAPErrorKind::Expected(what) => ParseError::Expected { what, at },
                IMAPErrorKind::EmptySpan => ParseError::EmptySpan { at },
                IMAPErrorKind::UnknownToken { token, context } => {
                    ParseError::UnknownToken { token, context, at }
                }
                IMAPErrorKind::BadNumber => ParseError::NumberOverflow { at },
                IMAPErrorKind::InvalidEscape => ParseError::InvalidEscape { at },
                IMAPErrorKind::InvalidDate => ParseError::InvalidDate { at },
                IMAPErrorKind::TrailingBytes => ParseError::TrailingBytes { at },
                IMAPErrorKind::Nom(_) => ParseError::Expected {
                    what: "valid IMAP syntax",
                    at,
                },
            }
        }
    }
}
