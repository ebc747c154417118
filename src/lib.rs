//! A fixed-size array of booleans packed eight to a byte.

pub mod dsa;

pub use dsa::bitset::{BitSet, BitSetError, Result};
