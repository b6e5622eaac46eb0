//! `sequence-set`, as used inside `ESEARCH`'s `ALL` term.

/// One item of a sequence-set: a single number or an inclusive range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceItem {
    Single(u64),
    Range(u64, u64),
}

/// An ordered, comma-separated sequence-set, preserving input order (not deduplicated or
/// coalesced).
pub type SequenceSet = Vec<SequenceItem>;
