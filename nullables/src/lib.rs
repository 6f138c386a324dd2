//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's external collaborators (the clock and event subscribers) sit
//! behind seams. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what they observed for later assertions
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod events;

pub use clock::NullClock;
pub use events::EventRecorder;
