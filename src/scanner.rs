//! Splits a byte stream into complete, literal-aware IMAP response lines.
//!
//! Unlike [`crate::decode`]'s parsers, which consume an already-framed line, the [`Scanner`] is the
//! layer that decides *where* a line ends — honoring the `{N}CRLF` literal syntax so that CRLF
//! bytes inside literal content are never mistaken for a line terminator.

use log::trace;

use crate::decode::ScanError;

/// Splits enqueued bytes into framed lines, honoring IMAP's literal syntax.
///
/// The caller drives the loop: [`Scanner::feed`] bytes in, call [`Scanner::get`] to obtain the next
/// complete line, parse it, then [`Scanner::consume`] the bytes it occupied before calling `get`
/// again.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    buffer: Vec<u8>,
    /// Offset into `buffer` from which the next CRLF search resumes; advanced past bytes already
    /// known not to contain a usable line ending, so repeated `get()` calls don't re-scan them.
    start_find: usize,
    /// Bytes of a `{N}CRLF` literal still owed before the CRLF search can resume.
    literal_remaining: u64,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` to the internal buffer, growing capacity as needed.
    ///
    /// `n` limits how many of `bytes` are appended (default: all). A negative `n` is interpreted as
    /// "all but the last `|n|`", clamped to zero.
    pub fn feed(&mut self, bytes: &[u8], n: Option<isize>) {
        let take = match n {
            None => bytes.len(),
            Some(n) if n >= 0 => (n as usize).min(bytes.len()),
            Some(n) => bytes.len().saturating_sub(n.unsigned_abs()),
        };
        self.buffer.extend_from_slice(&bytes[..take]);
    }

    /// Returns an aliased view of the next complete line, `[0, CRLF_end)`, without removing it from
    /// the buffer. A repeated call without an intervening [`Scanner::consume`] returns the same
    /// line cheaply.
    pub fn get(&mut self) -> Result<&[u8], ScanError> {
        loop {
            if self.literal_remaining > 0 {
                let available = (self.buffer.len() - self.start_find) as u64;
                if available < self.literal_remaining {
                    return Err(ScanError::IncompleteLiteral);
                }
                self.start_find += self.literal_remaining as usize;
                self.literal_remaining = 0;
            }

            let Some(crlf_at) = find_crlf(&self.buffer, self.start_find) else {
                self.start_find = self.buffer.len().saturating_sub(1).max(self.start_find);
                return Err(ScanError::IncompleteLine);
            };
            let line_end = crlf_at + 2;

            match literal_announcement(&self.buffer[..crlf_at]) {
                Some(Ok(length)) => {
                    trace!("scanner: line announces a {length}-byte literal at offset {crlf_at}");
                    self.start_find = line_end;
                    self.literal_remaining = length;
                }
                Some(Err(())) => {
                    return Err(ScanError::LiteralTooLarge { length: u64::MAX });
                }
                None => {
                    self.start_find = crlf_at;
                    return Ok(&self.buffer[..line_end]);
                }
            }
        }
    }

    /// Drops the leading `n` bytes of the buffer, shifting the remainder down, and resets the
    /// internal scan cursors.
    pub fn consume(&mut self, n: usize) -> Result<(), ScanError> {
        if n > self.buffer.len() {
            return Err(ScanError::ConsumeOverflow {
                requested: n,
                available: self.buffer.len(),
            });
        }
        self.buffer.drain(..n);
        self.start_find = 0;
        self.literal_remaining = 0;
        Ok(())
    }
}

fn find_crlf(buffer: &[u8], from: usize) -> Option<usize> {
    if from + 1 > buffer.len() {
        return None;
    }
    buffer[from..]
        .windows(2)
        .position(|w| w == b"\r\n")
        .map(|i| from + i)
}

/// If the line ending at `line` (exclusive of CRLF) ends with `{N}`, returns `N`. Scans backward
/// over the preceding run of ASCII digits from a trailing `}`.
///
/// `None` means the line isn't a literal announcement at all (no trailing `{N}`). `Some(Err(()))`
/// means it is one, but `N`'s digits overflow `u64` — a fatal condition, not "not a literal".
fn literal_announcement(line: &[u8]) -> Option<Result<u64, ()>> {
    if *line.last()? != b'}' {
        return None;
    }
    let digits_end = line.len() - 1;
    let digits_start = line[..digits_end]
        .iter()
        .rposition(|&b| !b.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    if digits_start == digits_end {
        // No digits between `{` and `}`.
        return None;
    }
    if digits_start == 0 || line[digits_start - 1] != b'{' {
        return None;
    }
    let digits = std::str::from_utf8(&line[digits_start..digits_end]).ok()?;
    Some(digits.parse().map_err(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_line() {
        let mut scanner = Scanner::new();
        scanner.feed(b"* OK hello\r\n", None);
        let line = scanner.get().unwrap();
        assert_eq!(line, b"* OK hello\r\n");
        scanner.consume(line.len()).unwrap();
        assert_eq!(scanner.get(), Err(ScanError::IncompleteLine));
    }

    #[test]
    fn test_incomplete_then_complete() {
        let mut scanner = Scanner::new();
        scanner.feed(b"* OK hel", None);
        assert_eq!(scanner.get(), Err(ScanError::IncompleteLine));
        scanner.feed(b"lo\r\n", None);
        let line = scanner.get().unwrap();
        assert_eq!(line, b"* OK hello\r\n");
    }

    #[test]
    fn test_literal_framing() {
        let mut scanner = Scanner::new();
        scanner.feed(b"* 1 FETCH (RFC822 {5}\r\n", None);
        assert_eq!(scanner.get(), Err(ScanError::IncompleteLiteral));
        scanner.feed(b"hello)\r\n", None);
        let line = scanner.get().unwrap();
        assert_eq!(line, b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n");
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut scanner = Scanner::new();
        let bytes = b"* 1 FETCH (RFC822 {3}\r\nabc)\r\n";
        for (i, &b) in bytes.iter().enumerate() {
            scanner.feed(&[b], None);
            if i + 1 < bytes.len() {
                assert!(scanner.get().is_err());
            }
        }
        let line = scanner.get().unwrap();
        assert_eq!(line, bytes.as_ref());
    }

    #[test]
    fn test_consume_overflow() {
        let mut scanner = Scanner::new();
        scanner.feed(b"abc", None);
        assert_eq!(
            scanner.consume(10),
            Err(ScanError::ConsumeOverflow {
                requested: 10,
                available: 3
            })
        );
    }

    #[test]
    fn test_literal_length_overflow_is_fatal() {
        let mut scanner = Scanner::new();
        scanner.feed(b"* 1 FETCH (RFC822 {99999999999999999999}\r\n", None);
        assert_eq!(
            scanner.get(),
            Err(ScanError::LiteralTooLarge { length: u64::MAX })
        );
    }
}
