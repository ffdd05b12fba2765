//! Fuzzing library for pubmed-galaxy.
//!
//! This crate provides fuzzing targets for the E-utilities response parsers
//! and the inbound request body.
//!
//! # Usage
//!
//! ```bash
//! cd crates/galaxy-fuzz
//! cargo +nightly fuzz run fuzz_efetch_parse -- -max_total_time=60
//! ```

pub use pubmed_galaxy::client::parse;
pub use pubmed_galaxy::models;
