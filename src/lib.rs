//! Aptamut - Aptamer Mutagenesis Tool
//!
//! A Rust application for enumerating or sampling substitution and deletion
//! variants of short DNA sequences for probe/primer design.

pub mod mutation;

pub use mutation::*;
