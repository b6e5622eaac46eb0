//! The `ENVELOPE` fetch data item.

use chrono::{DateTime, FixedOffset};

/// A single address in an envelope's `from`/`sender`/`reply-to`/`to`/`cc`/`bcc` lists.
///
/// Every field is 8-bit clean bytes (mailbox names and display names are not assumed to carry any
/// particular encoding) and independently optional, matching `(nstring nstring nstring nstring)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// The personal name, e.g. `"Fred Foobar"`.
    pub name: Option<Vec<u8>>,
    /// SMTP at-domain-list (source route), almost always absent in modern mail.
    pub adl: Option<Vec<u8>>,
    /// The mailbox name, e.g. `"fred"` in `fred@example.com`.
    pub mailbox: Option<Vec<u8>>,
    /// The host name, e.g. `"example.com"` in `fred@example.com`.
    pub host: Option<Vec<u8>>,
}

/// The structured envelope of a message, as produced by `FETCH (ENVELOPE)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    /// The message's `Date` header, parsed into a timezone-aware timestamp.
    ///
    /// Absent both when the header itself was NIL and when it was present but failed to parse as
    /// an RFC 2822 date (malformed dates are treated as absent rather than as a fatal error).
    pub date: Option<DateTime<FixedOffset>>,
    pub subject: Option<Vec<u8>>,
    pub from: Option<Vec<Address>>,
    pub sender: Option<Vec<Address>>,
    pub reply_to: Option<Vec<Address>>,
    pub to: Option<Vec<Address>>,
    pub cc: Option<Vec<Address>>,
    pub bcc: Option<Vec<Address>>,
    pub in_reply_to: Option<Vec<u8>>,
    pub message_id: Option<Vec<u8>>,
}
