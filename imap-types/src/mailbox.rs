//! The `LIST`/`LSUB` mailbox-data response.

use std::collections::HashSet;

/// A single `* LIST (...)` or `* LSUB (...)` response.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    /// Mailbox flags, backslash-prefixed as they appeared on the wire (e.g. `"\\HasNoChildren"`).
    pub attributes: HashSet<String>,
    /// The hierarchy delimiter, or `None` when the server sent `NIL`.
    pub delimiter: Option<u8>,
    /// Raw mailbox bytes, with "INBOX" (any case) canonicalized to upper-case `INBOX`.
    pub mailbox: Vec<u8>,
}

/// The spelling `mailbox` is canonicalized to when it is a case-insensitive match for `INBOX`.
pub const INBOX: &[u8] = b"INBOX";

/// Applies IMAP's mandatory INBOX canonicalization rule to a raw mailbox byte string.
///
/// Any case variant of the bytes `INBOX` (e.g. `iNbOx`) is interpreted as `INBOX`, not as an
/// arbitrary mailbox name; every other byte string is preserved verbatim.
pub fn canonicalize_mailbox(raw: Vec<u8>) -> Vec<u8> {
    if raw.eq_ignore_ascii_case(INBOX) {
        INBOX.to_vec()
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_mailbox_any_case() {
        for variant in ["INBOX", "inbox", "Inbox", "iNbOx"] {
            assert_eq!(
                canonicalize_mailbox(variant.as_bytes().to_vec()),
                INBOX.to_vec()
            );
        }
    }

    #[test]
    fn test_canonicalize_mailbox_preserves_other_names() {
        assert_eq!(
            canonicalize_mailbox(b"INBOX/foo".to_vec()),
            b"INBOX/foo".to_vec()
        );
        assert_eq!(canonicalize_mailbox(b"Sent".to_vec()), b"Sent".to_vec());
    }
}
