//! `sequence-set`, as used inside an `ESEARCH` response's `ALL` term.

use imap_response_types::sequence::{SequenceItem, SequenceSet};
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::map,
    multi::separated_list1,
    sequence::tuple,
};

use crate::{core::number, decode::IMAPResult};

/// `sequence-set = seq-item *("," seq-item)`.
///
/// `*` (the "largest number in use" marker) is not supported here: this engine only parses
/// sequence-sets as emitted by a server inside `ESEARCH ALL`, which enumerates concrete numbers.
pub(crate) fn sequence_set(input: &[u8]) -> IMAPResult<SequenceSet> {
    separated_list1(tag(b","), sequence_item)(input)
}

/// `seq-item = seq-range / seq-number`
fn sequence_item(input: &[u8]) -> IMAPResult<SequenceItem> {
    alt((
        map(seq_range, |(lo, hi)| SequenceItem::Range(lo, hi)),
        map(number, SequenceItem::Single),
    ))(input)
}

/// `seq-range = seq-number ":" seq-number`
fn seq_range(input: &[u8]) -> IMAPResult<(u64, u64)> {
    let (remaining, (lo, _, hi)) = tuple((number, tag(b":"), number))(input)?;
    Ok((remaining, (lo, hi)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_set() {
        let (rem, val) = sequence_set(b"1,3:5,9xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(
            val,
            vec![
                SequenceItem::Single(1),
                SequenceItem::Range(3, 5),
                SequenceItem::Single(9),
            ]
        );
    }

    #[test]
    fn test_seq_range() {
        assert_eq!(seq_range(b"1:2?").unwrap().1, (1, 2));
    }
}
