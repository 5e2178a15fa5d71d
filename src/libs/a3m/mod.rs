//! The A3M alignment codec.
//!
//! A multi-chain A3M starts with `#<lengths>\t<copies>`, then the chain-name
//! marker `>101\t102...` and the concatenated query. Uppercase letters and `-`
//! are alignment columns; lowercase letters are insertions and occupy no column.

pub mod group;
pub mod header;
pub mod merge;
pub mod pairing;
pub mod remove;
pub mod split;

pub use group::*;
pub use header::*;
pub use merge::*;
pub use pairing::*;
pub use remove::*;
pub use split::*;
