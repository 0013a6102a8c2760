//! # Core Module
//!
//! Stateless building blocks for molecular graphs.
//!
//! - **Element data** ([`elements`]) - Valence, atomic weight and canonical rank per element
//! - **Graph representation** ([`models`]) - Atoms, identifiers and the atom arena
//! - **Derived properties** ([`formula`]) - Canonical formula strings and molecular weight
//!
//! Nothing in this layer knows about the open/closed lifecycle of a molecule; that
//! lives in [`crate::engine`].

pub mod elements;
pub mod formula;
pub mod models;
