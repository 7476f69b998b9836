//! Helpers shared between days

pub mod bit_trie;
pub mod dp_cache;
pub mod grid;
