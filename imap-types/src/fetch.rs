//! The `FETCH` message-data response (`msg-att` in the ABNF).

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::{body::Body, core::Token, envelope::Envelope};

/// The value carried by a single `TOKEN value` pair inside a `msg-att`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchItem {
    /// `FLAGS`.
    Flags(std::collections::HashSet<String>),
    /// `BODY`/`BODYSTRUCTURE` without a section: the full MIME tree.
    Body(Box<Body>),
    /// `ENVELOPE`.
    Envelope(Box<Envelope>),
    /// `INTERNALDATE`.
    InternalDate(DateTime<FixedOffset>),
    /// `MODSEQ`.
    ModSeq(u64),
    /// `RFC822`, `RFC822.HEADER`, `RFC822.TEXT`.
    NString(Option<Vec<u8>>),
    /// `RFC822.SIZE`, `UID`, `X-GM-MSGID`.
    Number(u64),
    /// The accumulated `BODY[section]` responses for this message.
    ///
    /// Keyed by the verbatim bracket content (including the empty section `""`); see
    /// [`BodySection`] for the value shape. There is always at most one entry of this variant per
    /// [`Fetch`], gathered under the synthetic [`Token::BodySections`] key regardless of how many
    /// `BODY[...]` items the server sent.
    BodySections(HashMap<String, BodySection>),
}

/// One `BODY[section]<origin>` response: the bytes returned (absent if the server answered with
/// `NIL`, e.g. for a non-existent section), and the partial-fetch byte offset if `<n>` was
/// present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodySection {
    pub content: Option<Vec<u8>>,
    pub origin: Option<u64>,
}

/// A single `* <msg> FETCH (...)` response.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fetch {
    pub msg: u64,
    pub items: HashMap<Token, FetchItem>,
}
