//! Subcommand modules for the `afmsa` binary.

pub mod attach;
pub mod convert;
pub mod remove;
pub mod strip;
pub mod to_a3m;
pub mod to_json;
