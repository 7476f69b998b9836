//! Binary prefix tree annotated with how many keys pass through each branch.
//!
//! Built once over a set of equal-width binary strings, the trie answers
//! "which bit is more (or less) common after this prefix" in O(1), so picking
//! a rating by repeatedly keeping the majority/minority bit becomes a single
//! O(width) descent instead of repeated scans over the whole set.
//!
//! ```
//! use aoc2021_solutions::utils::bit_trie::{BitTrie, ResolveMode, bits_to_rating};
//!
//! let trie = BitTrie::from_keys(["00100", "11110", "10110", "10111", "10101", "01111",
//!                                "00111", "11100", "10000", "11001", "00010", "01010"]).unwrap();
//!
//! let oxygen = bits_to_rating(&trie.resolve(ResolveMode::Most).unwrap()).unwrap();
//! let co2 = bits_to_rating(&trie.resolve(ResolveMode::Least).unwrap()).unwrap();
//! assert_eq!((oxygen, co2), (23, 10));
//! ```

use std::fmt;
use thiserror::Error;

/// One binary symbol of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    pub fn from_char(symbol: char) -> Option<Bit> {
        u8::try_from(symbol).ok().and_then(Bit::from_ascii)
    }

    pub fn from_ascii(symbol: u8) -> Option<Bit> {
        match symbol {
            b'0' => Some(Bit::Zero),
            b'1' => Some(Bit::One),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bit::Zero => "0",
            Bit::One => "1",
        })
    }
}

/// Parse a `'0'`/`'1'` string into bits
pub fn parse_bits(key: &str) -> Result<Vec<Bit>, TrieError> {
    key.chars()
        .enumerate()
        .map(|(position, symbol)| {
            Bit::from_char(symbol).ok_or(TrieError::InvalidSymbol { position, symbol })
        })
        .collect()
}

/// Interpret bits as a big-endian base-2 number; `None` past 64 bits
pub fn bits_to_rating(bits: &[Bit]) -> Option<u64> {
    if bits.len() > u64::BITS as usize {
        return None;
    }
    Some(bits.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64))
}

/// Which branch `resolve` follows when a node has both children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Greater count wins, ties go to `1`
    Most,
    /// Smaller count wins, ties go to `0`
    Least,
}

impl ResolveMode {
    fn pick(self, zeros: usize, ones: usize) -> Bit {
        match self {
            ResolveMode::Most if zeros > ones => Bit::Zero,
            ResolveMode::Most => Bit::One,
            ResolveMode::Least if ones < zeros => Bit::One,
            ResolveMode::Least => Bit::Zero,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    #[error("invalid symbol {symbol:?} at position {position}, expected '0' or '1'")]
    InvalidSymbol { position: usize, symbol: char },
    #[error("cannot insert an empty key")]
    EmptyKey,
    #[error("key has width {found}, expected {expected}")]
    InconsistentWidth { expected: usize, found: usize },
    #[error("cannot resolve a rating from an empty trie")]
    EmptyTrie,
}

type NodeId = usize;

const ROOT: NodeId = 0;

/// Edge to a child, with the number of keys that share the prefix ending here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Branch {
    count: usize,
    child: NodeId,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Indexed by [`Bit`]
    branches: [Option<Branch>; 2],
}

/// Arena-backed binary trie over fixed-width keys.
///
/// The width is fixed by the first inserted key. Nodes are only ever added,
/// never removed, and a failed insert leaves the trie untouched.
#[derive(Debug, Clone)]
pub struct BitTrie {
    nodes: Vec<TrieNode>,
    width: Option<usize>,
    len: usize,
}

impl BitTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            width: None,
            len: 0,
        }
    }

    /// Build a trie from `'0'`/`'1'` strings, stopping at the first bad key
    pub fn from_keys<'k, I>(keys: I) -> Result<Self, TrieError>
    where
        I: IntoIterator<Item = &'k str>,
    {
        keys.into_iter().try_fold(Self::new(), |mut trie, key| {
            trie.insert(key)?;
            Ok(trie)
        })
    }

    /// Number of keys inserted (duplicates included)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Key width, once the first key has been inserted
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn insert(&mut self, key: &str) -> Result<(), TrieError> {
        let bits = parse_bits(key)?;
        self.insert_bits(&bits)
    }

    pub fn insert_bits(&mut self, bits: &[Bit]) -> Result<(), TrieError> {
        if bits.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        if let Some(expected) = self.width
            && expected != bits.len()
        {
            return Err(TrieError::InconsistentWidth {
                expected,
                found: bits.len(),
            });
        }
        self.width = Some(bits.len());

        let mut node = ROOT;
        for &bit in bits {
            let fresh = self.nodes.len();
            let branch = self.nodes[node].branches[bit.index()].get_or_insert(Branch {
                count: 0,
                child: fresh,
            });
            branch.count += 1;
            let child = branch.child;
            if child == fresh {
                self.nodes.push(TrieNode::default());
            }
            node = child;
        }
        self.len += 1;
        Ok(())
    }

    /// Number of keys starting with `prefix`; the empty prefix counts every key
    pub fn count(&self, prefix: &[Bit]) -> usize {
        let mut node = ROOT;
        let mut count = self.len;
        for &bit in prefix {
            match self.nodes[node].branches[bit.index()] {
                Some(branch) => {
                    count = branch.count;
                    node = branch.child;
                }
                None => return 0,
            }
        }
        count
    }

    /// Sum of the counts on the root's branches
    pub fn root_total(&self) -> usize {
        self.nodes[ROOT]
            .branches
            .iter()
            .flatten()
            .map(|branch| branch.count)
            .sum()
    }

    /// Descend from the root to a leaf, choosing between two children by
    /// `mode` and following a lone child unconditionally.
    ///
    /// The result is always one of the inserted keys.
    pub fn resolve(&self, mode: ResolveMode) -> Result<Vec<Bit>, TrieError> {
        if self.is_empty() {
            return Err(TrieError::EmptyTrie);
        }

        let mut bits = Vec::with_capacity(self.width.unwrap_or_default());
        let mut node = ROOT;
        loop {
            let (bit, branch) = match self.nodes[node].branches {
                [None, None] => break,
                [Some(zero), None] => (Bit::Zero, zero),
                [None, Some(one)] => (Bit::One, one),
                [Some(zero), Some(one)] => match mode.pick(zero.count, one.count) {
                    Bit::Zero => (Bit::Zero, zero),
                    Bit::One => (Bit::One, one),
                },
            };
            bits.push(bit);
            node = branch.child;
        }
        Ok(bits)
    }
}

impl Default for BitTrie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const REPORT: [&str; 12] = [
        "00100", "11110", "10110", "10111", "10101", "01111", "00111", "11100", "10000", "11001",
        "00010", "01010",
    ];

    fn bits(key: &str) -> Vec<Bit> {
        parse_bits(key).unwrap()
    }

    fn render(bits: &[Bit]) -> String {
        bits.iter().map(Bit::to_string).collect()
    }

    #[test]
    fn test_example_report_ratings() {
        let trie = BitTrie::from_keys(REPORT).unwrap();
        assert_eq!(trie.len(), 12);
        assert_eq!(trie.width(), Some(5));

        let oxygen = trie.resolve(ResolveMode::Most).unwrap();
        let co2 = trie.resolve(ResolveMode::Least).unwrap();
        assert_eq!(render(&oxygen), "10111");
        assert_eq!(render(&co2), "01010");

        let product = bits_to_rating(&oxygen).unwrap() * bits_to_rating(&co2).unwrap();
        assert_eq!(product, 230);
    }

    #[test]
    fn test_tie_breaks() {
        // Root has `0`:2 and `1`:2
        let trie = BitTrie::from_keys(["00", "01", "10", "11"]).unwrap();
        assert_eq!(render(&trie.resolve(ResolveMode::Most).unwrap()), "11");
        assert_eq!(render(&trie.resolve(ResolveMode::Least).unwrap()), "00");
    }

    #[test]
    fn test_single_child_followed_until_leaf() {
        let trie = BitTrie::from_keys(["000", "001"]).unwrap();
        assert_eq!(trie.count(&bits("00")), 2);
        assert_eq!(render(&trie.resolve(ResolveMode::Most).unwrap()), "001");
        assert_eq!(render(&trie.resolve(ResolveMode::Least).unwrap()), "000");

        // Least picks the lone `0...` record and must follow it regardless of counts below
        let trie = BitTrie::from_keys(["0110", "1000", "1001"]).unwrap();
        assert_eq!(render(&trie.resolve(ResolveMode::Least).unwrap()), "0110");
        assert_eq!(render(&trie.resolve(ResolveMode::Most).unwrap()), "1001");
    }

    #[test]
    fn test_empty_trie() {
        let trie = BitTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.root_total(), 0);
        assert_eq!(trie.resolve(ResolveMode::Most), Err(TrieError::EmptyTrie));
        assert_eq!(trie.resolve(ResolveMode::Least), Err(TrieError::EmptyTrie));
    }

    #[test]
    fn test_rejected_keys_leave_trie_untouched() {
        let mut trie = BitTrie::from_keys(["0101", "0111"]).unwrap();

        assert_eq!(
            trie.insert("01a1"),
            Err(TrieError::InvalidSymbol {
                position: 2,
                symbol: 'a'
            })
        );
        assert_eq!(
            trie.insert("011"),
            Err(TrieError::InconsistentWidth {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(trie.insert(""), Err(TrieError::EmptyKey));

        assert_eq!(trie.len(), 2);
        assert_eq!(trie.root_total(), 2);
        assert_eq!(trie.count(&bits("011")), 1);
        assert_eq!(render(&trie.resolve(ResolveMode::Most).unwrap()), "0111");
    }

    #[test]
    fn test_count_missing_prefix() {
        let trie = BitTrie::from_keys(REPORT).unwrap();
        assert_eq!(trie.count(&[]), 12);
        assert_eq!(trie.count(&bits("1")), 7);
        assert_eq!(trie.count(&bits("10")), 4);
        assert_eq!(trie.count(&bits("0110")), 0);
    }

    #[test]
    fn test_bits_to_rating() {
        assert_eq!(bits_to_rating(&bits("10110")), Some(22));
        assert_eq!(bits_to_rating(&[]), Some(0));
        assert_eq!(bits_to_rating(&vec![Bit::One; 64]), Some(u64::MAX));
        assert_eq!(bits_to_rating(&vec![Bit::One; 65]), None);
    }

    #[test]
    fn test_bit_parsing() {
        assert_eq!(Bit::from_ascii(b'0'), Some(Bit::Zero));
        assert_eq!(Bit::from_ascii(b'1'), Some(Bit::One));
        assert_eq!(Bit::from_ascii(b'2'), None);
        assert_eq!(Bit::from_char(' '), None);
        assert_eq!(Bit::from_char('\u{0131}'), None);
        assert_eq!(
            parse_bits("10x"),
            Err(TrieError::InvalidSymbol {
                position: 2,
                symbol: 'x'
            })
        );
    }

    /// The repeated-scan algorithm the trie replaces
    fn filter_rating(keys: &[Vec<Bit>], mode: ResolveMode) -> Vec<Bit> {
        let width = keys[0].len();
        let mut candidates = keys.to_vec();
        let mut position = 0;
        while candidates.len() > 1 && position < width {
            let ones = candidates.iter().filter(|k| k[position] == Bit::One).count();
            let zeros = candidates.len() - ones;
            let keep = match (zeros, ones) {
                (0, _) => Bit::One,
                (_, 0) => Bit::Zero,
                _ => mode.pick(zeros, ones),
            };
            candidates.retain(|k| k[position] == keep);
            position += 1;
        }
        candidates.swap_remove(0)
    }

    fn keys_strategy() -> impl Strategy<Value = Vec<Vec<Bit>>> {
        (1usize..8).prop_flat_map(|width| {
            prop::collection::vec(
                prop::collection::vec(
                    prop::bool::ANY.prop_map(|b| if b { Bit::One } else { Bit::Zero }),
                    width,
                ),
                1..40,
            )
        })
    }

    fn build(keys: &[Vec<Bit>]) -> BitTrie {
        let mut trie = BitTrie::new();
        for key in keys {
            trie.insert_bits(key).unwrap();
        }
        trie
    }

    proptest! {
        #[test]
        fn prop_root_total_equals_len(keys in keys_strategy()) {
            let trie = build(&keys);
            prop_assert_eq!(trie.root_total(), keys.len());
            prop_assert_eq!(trie.len(), keys.len());
        }

        #[test]
        fn prop_prefix_counts(keys in keys_strategy()) {
            let trie = build(&keys);
            for key in &keys {
                for end in 0..=key.len() {
                    let prefix = &key[..end];
                    let expected = keys.iter().filter(|k| k.starts_with(prefix)).count();
                    prop_assert_eq!(trie.count(prefix), expected);
                }
            }
        }

        #[test]
        fn prop_resolve_is_deterministic_and_inserted(keys in keys_strategy()) {
            let trie = build(&keys);
            for mode in [ResolveMode::Most, ResolveMode::Least] {
                let first = trie.resolve(mode).unwrap();
                prop_assert_eq!(&first, &trie.resolve(mode).unwrap());
                prop_assert!(keys.contains(&first));
            }
        }

        #[test]
        fn prop_resolve_matches_repeated_filtering(keys in keys_strategy()) {
            let trie = build(&keys);
            for mode in [ResolveMode::Most, ResolveMode::Least] {
                prop_assert_eq!(trie.resolve(mode).unwrap(), filter_rating(&keys, mode));
            }
        }

        #[test]
        fn prop_insertion_order_irrelevant(mut keys in keys_strategy()) {
            let forward = build(&keys);
            keys.reverse();
            let backward = build(&keys);
            for mode in [ResolveMode::Most, ResolveMode::Least] {
                prop_assert_eq!(forward.resolve(mode).unwrap(), backward.resolve(mode).unwrap());
            }
        }
    }
}
