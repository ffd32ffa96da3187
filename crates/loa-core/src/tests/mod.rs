//! Test module for determinism and integration tests.
//!
//! - **Determinism tests**: Verify same seed produces identical tallies and events
//! - **Integration tests**: End-to-end `play` scenarios
//! - **Helper functions**: Team factories, stub collaborators and a fixed RNG
//!
//! # Test Structure
//!
//! - `determinism.rs`: Seeded reproducibility and offense alternation
//! - `integration.rs`: Full simulator runs, fatal failures, tally properties
//! - `helpers.rs`: Test setup utilities and factory functions

mod helpers;

// Re-export for convenience
pub use helpers::*;
