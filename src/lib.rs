#![deny(missing_debug_implementations)]

mod body;
mod core;
mod datetime;
mod decode;
mod envelope;
mod fetch;
mod mailbox;
mod response;
mod scanner;
mod search;
mod sequence;
mod status;

pub use decode::{ParseError, ScanError};
pub use response::parse_response_line;
pub use scanner::Scanner;

/// Parses a single IMAP `string` (quoted or literal), as found standalone outside of a full
/// response line, e.g. when a caller already split a literal out of its announcing line.
pub fn parse_imap_string(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    parse_complete(input, core::string)
}

/// Parses a single IMAP `astring` (atom, quoted string, or literal).
pub fn parse_imap_astring(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    parse_complete(input, core::astring)
}

fn parse_complete<'a, O>(
    input: &'a [u8],
    parser: impl FnOnce(&'a [u8]) -> decode::IMAPResult<'a, O>,
) -> Result<O, ParseError> {
    match parser(input) {
        Ok((remaining, value)) if remaining.is_empty() => Ok(value),
        Ok((remaining, _)) => Err(ParseError::TrailingBytes {
            at: input.len() - remaining.len(),
        }),
        Err(e) => Err(decode::to_parse_error(input, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_imap_string_quoted() {
        assert_eq!(parse_imap_string(br#""hello""#).unwrap(), b"hello");
    }

    #[test]
    fn test_parse_imap_astring_atom() {
        assert_eq!(parse_imap_astring(b"INBOX").unwrap(), b"INBOX");
    }

    #[test]
    fn test_parse_imap_string_trailing_bytes() {
        let err = parse_imap_string(br#""hello" extra"#).unwrap_err();
        assert!(matches!(err, ParseError::TrailingBytes { .. }));
    }
}
