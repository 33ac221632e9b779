//! Comprehensive test suite for the block editor
//!
//! This module organizes tests into logical groups: store transitions,
//! end-to-end editing scenarios, source generation, and property-based
//! invariant checks.

#[cfg(test)]
mod integration;
