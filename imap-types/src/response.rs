//! The three top-level response shapes and the untagged payloads they carry.

use std::collections::HashSet;

use crate::{core::Token, fetch::Fetch, mailbox::List, search::Esearch, status::Status};

/// A resp-text-code's name: either one of the closed keywords, or free-form text the classifier
/// doesn't recognize (kept verbatim so callers can still act on vendor extensions).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Code {
    Known(Token),
    Other(String),
}

/// The payload that follows a resp-text-code, if the code takes one.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeData {
    Number(u64),
    Bytes(Vec<u8>),
}

/// `resp-text`: an optional bracketed code plus optional human-readable text.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseText {
    pub text: Option<String>,
    pub code: Option<Code>,
    pub code_data: Option<CodeData>,
}

/// The payload of an [`Response::UntaggedResponse`], keyed by the untagged keyword's [`Token`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UntaggedData {
    /// `OK`/`NO`/`BAD`/`PREAUTH`/`BYE`.
    ResponseText(ResponseText),
    Capability(HashSet<String>),
    Enabled(HashSet<String>),
    Flags(HashSet<String>),
    List(List),
    Lsub(List),
    Search(Vec<u64>),
    Status(Status),
    Esearch(Esearch),
    Fetch(Fetch),
    Exists(u64),
    Expunge(u64),
    Recent(u64),
}

/// The three top-level shapes a framed IMAP response line can take.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Response {
    /// `"+" SP resp-text CRLF`.
    ContinueReq { text: ResponseText },
    /// `tag SP ("OK" / "NO" / "BAD") SP resp-text CRLF`.
    TaggedResponse {
        tag: String,
        kind: Token,
        text: ResponseText,
    },
    /// `"*" SP ... CRLF`.
    UntaggedResponse { kind: Token, data: UntaggedData },
}
