//! The `ESEARCH` (RFC 4731) extended search response.

use std::collections::HashMap;

use crate::{core::Token, sequence::SequenceSet};

/// A value returned for one term of an `ESEARCH` response.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EsearchValue {
    /// `COUNT`/`MAX`/`MIN`.
    Number(u64),
    /// `ALL`.
    Sequence(SequenceSet),
}

/// A single `* ESEARCH ...` response.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Esearch {
    /// The `(TAG "...")` correlator, if present.
    pub tag: Option<String>,
    /// Whether the search was a `UID SEARCH` (the `UID` term was present).
    pub uid: bool,
    /// Keyed on `COUNT`/`MAX`/`MIN`/`ALL`.
    pub returned: HashMap<Token, EsearchValue>,
}
