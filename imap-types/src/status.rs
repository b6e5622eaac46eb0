//! The `STATUS` mailbox-data response.

use std::collections::HashMap;

use crate::core::Token;

/// A single `* STATUS <mailbox> (...)` response.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub mailbox: Vec<u8>,
    /// Keyed on `MESSAGES`/`RECENT`/`UIDNEXT`/`UIDVALIDITY`/`UNSEEN`.
    pub status: HashMap<Token, u64>,
}
