//! # Engine Module
//!
//! The stateful layer: the [`molecule::Molecule`] builder and everything that enforces
//! its open/closed lifecycle.
//!
//! - [`molecule`] - Coordinate-addressed construction operations and derived queries
//! - [`request`] - Structured request records accepted by the batch operations
//! - [`saturation`] - Hydrogen fill on closure and its reversal on reopening
//! - [`transaction`] - All-or-nothing application of batch operations
//! - [`config`] - Policies for batch atomicity and hydrogen removal
//! - [`error`] - The error type reported by every operation

pub mod config;
pub mod error;
pub mod molecule;
pub mod request;
pub mod saturation;
pub mod transaction;
