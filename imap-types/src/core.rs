//! Canonical grammar keywords.
//!
//! The wire grammar uses a closed set of case-insensitive keywords (`OK`, `FETCH`,
//! `UIDVALIDITY`, …). Comparing and hashing on the raw bytes of these keywords is wasteful and
//! error-prone (a server may write `Uidvalidity` or `UIDVALIDITY`); instead every occurrence is
//! classified once, up front, into a [`Token`], and all subsequent comparisons and map keys use
//! that canonical value.
//!
//! `Token` only covers keywords this engine's grammar recognizes. Free-form identifiers (a
//! resp-text-code this engine doesn't know, for instance) are kept as their original ASCII text
//! instead of being forced into this enum.

use std::fmt;

/// A canonical, case-insensitively resolved grammar keyword.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum Token {
    Ok,
    No,
    Bad,
    Bye,
    Preauth,
    Capability,
    Enabled,
    Esearch,
    Flags,
    List,
    Lsub,
    Search,
    Status,
    Fetch,
    Exists,
    Expunge,
    Recent,
    Uid,
    Count,
    Min,
    Max,
    All,
    Tag,
    Alert,
    Parse,
    ReadOnly,
    ReadWrite,
    TryCreate,
    HighestModSeq,
    UidNext,
    UidValidity,
    Unseen,
    Messages,
    Body,
    BodyStructure,
    Envelope,
    InternalDate,
    ModSeq,
    Rfc822,
    Rfc822Header,
    Rfc822Text,
    Rfc822Size,
    XGmMsgId,

    /// Synthetic key, never produced by [`Token::classify`]: the [`Fetch`](crate::fetch::Fetch)
    /// map key under which all `BODY[section]` responses for a message are accumulated.
    BodySections,
}

impl Token {
    /// The canonical (upper-case) spelling of this keyword, as it would appear on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Token::Ok => "OK",
            Token::No => "NO",
            Token::Bad => "BAD",
            Token::Bye => "BYE",
            Token::Preauth => "PREAUTH",
            Token::Capability => "CAPABILITY",
            Token::Enabled => "ENABLED",
            Token::Esearch => "ESEARCH",
            Token::Flags => "FLAGS",
            Token::List => "LIST",
            Token::Lsub => "LSUB",
            Token::Search => "SEARCH",
            Token::Status => "STATUS",
            Token::Fetch => "FETCH",
            Token::Exists => "EXISTS",
            Token::Expunge => "EXPUNGE",
            Token::Recent => "RECENT",
            Token::Uid => "UID",
            Token::Count => "COUNT",
            Token::Min => "MIN",
            Token::Max => "MAX",
            Token::All => "ALL",
            Token::Tag => "TAG",
            Token::Alert => "ALERT",
            Token::Parse => "PARSE",
            Token::ReadOnly => "READ-ONLY",
            Token::ReadWrite => "READ-WRITE",
            Token::TryCreate => "TRYCREATE",
            Token::HighestModSeq => "HIGHESTMODSEQ",
            Token::UidNext => "UIDNEXT",
            Token::UidValidity => "UIDVALIDITY",
            Token::Unseen => "UNSEEN",
            Token::Messages => "MESSAGES",
            Token::Body => "BODY",
            Token::BodyStructure => "BODYSTRUCTURE",
            Token::Envelope => "ENVELOPE",
            Token::InternalDate => "INTERNALDATE",
            Token::ModSeq => "MODSEQ",
            Token::Rfc822 => "RFC822",
            Token::Rfc822Header => "RFC822.HEADER",
            Token::Rfc822Text => "RFC822.TEXT",
            Token::Rfc822Size => "RFC822.SIZE",
            Token::XGmMsgId => "X-GM-MSGID",
            Token::BodySections => "BODYSECTIONS",
        }
    }

    /// Looks up `raw` case-insensitively against the fixed keyword table.
    ///
    /// Returns `None` ("token zero") when `raw` is not one of the known keywords; callers in an
    /// open context (e.g. a resp-text-code) keep the original bytes in that case instead of
    /// treating it as an error.
    pub fn classify(raw: &[u8]) -> Option<Token> {
        // `eq_ignore_ascii_case` avoids allocating an upper-cased copy for every lookup.
        const TABLE: &[(&str, Token)] = &[
            ("OK", Token::Ok),
            ("NO", Token::No),
            ("BAD", Token::Bad),
            ("BYE", Token::Bye),
            ("PREAUTH", Token::Preauth),
            ("CAPABILITY", Token::Capability),
            ("ENABLED", Token::Enabled),
            ("ESEARCH", Token::Esearch),
            ("FLAGS", Token::Flags),
            ("LIST", Token::List),
            ("LSUB", Token::Lsub),
            ("SEARCH", Token::Search),
            ("STATUS", Token::Status),
            ("FETCH", Token::Fetch),
            ("EXISTS", Token::Exists),
            ("EXPUNGE", Token::Expunge),
            ("RECENT", Token::Recent),
            ("UID", Token::Uid),
            ("COUNT", Token::Count),
            ("MIN", Token::Min),
            ("MAX", Token::Max),
            ("ALL", Token::All),
            ("TAG", Token::Tag),
            ("ALERT", Token::Alert),
            ("PARSE", Token::Parse),
            ("READ-ONLY", Token::ReadOnly),
            ("READ-WRITE", Token::ReadWrite),
            ("TRYCREATE", Token::TryCreate),
            ("HIGHESTMODSEQ", Token::HighestModSeq),
            ("UIDNEXT", Token::UidNext),
            ("UIDVALIDITY", Token::UidValidity),
            ("UNSEEN", Token::Unseen),
            ("MESSAGES", Token::Messages),
            ("BODY", Token::Body),
            ("BODYSTRUCTURE", Token::BodyStructure),
            ("ENVELOPE", Token::Envelope),
            ("INTERNALDATE", Token::InternalDate),
            ("MODSEQ", Token::ModSeq),
            ("RFC822", Token::Rfc822),
            ("RFC822.HEADER", Token::Rfc822Header),
            ("RFC822.TEXT", Token::Rfc822Text),
            ("RFC822.SIZE", Token::Rfc822Size),
            ("X-GM-MSGID", Token::XGmMsgId),
        ];

        TABLE
            .iter()
            .find(|(name, _)| raw.eq_ignore_ascii_case(name.as_bytes()))
            .map(|(_, token)| *token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(Token::classify(b"fetch"), Some(Token::Fetch));
        assert_eq!(Token::classify(b"Fetch"), Some(Token::Fetch));
        assert_eq!(Token::classify(b"FETCH"), Some(Token::Fetch));
    }

    #[test]
    fn test_classify_unknown_is_none() {
        assert_eq!(Token::classify(b"X-UNKNOWN"), None);
    }

    #[test]
    fn test_classify_dotted_keyword() {
        assert_eq!(Token::classify(b"rfc822.size"), Some(Token::Rfc822Size));
    }
}
