//! Conversion and editing of multi-chain A3M alignments for AlphaFold pipelines.
//!
//! The library side of the `afmsa` binary. Everything that touches alignment
//! columns lives in [`libs::a3m`]; JSON job shapes live in [`libs::job`].

pub mod libs;

pub use crate::libs::a3m::*;
pub use crate::libs::error::MsaError;
pub use crate::libs::io::*;
