//! Diff text parsing.

mod pairing;
mod unified;

pub use pairing::parse_and_pair_lines;
pub use unified::parse_diff;
