//! # codec-tests
//!
//! Integration tests for icc-codec.
//!
//! This crate provides:
//! - A builder for synthetic profiles with a known layout
//! - Seeded random generators for property tests
//! - Scratch files that clean up after themselves
//!
//! ## Test Categories
//!
//! 1. **End to end**: open, edit and re-open profiles on disk
//! 2. **Properties**: value round trips over seeded random inputs
//! 3. **Directory**: tag table parsing and slot bounds
//! 4. **Header edits**: builder validation and in-place header writes
//! 5. **Tag copy**: copying payloads between profiles
//! 6. **Serde**: JSON snapshots of decoded values

pub mod fixtures;
pub mod patterns;
pub mod scratch;

pub use fixtures::{ProfileBuilder, sample_profile};
pub use scratch::ScratchFile;
