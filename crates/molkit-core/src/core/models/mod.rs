//! # Core Models Module
//!
//! Data structures that represent a molecular graph.
//!
//! ## Key Components
//!
//! - [`ids`] - The integer atom identifier and the internal arena key
//! - [`atom`] - A graph node with a fixed element and a capacity-limited neighbor list
//! - [`graph`] - The arena that owns every atom and keeps bonds symmetric
//!
//! Atoms never own each other. Neighbor lists hold [`atom::NeighborRef`] records that
//! are resolved through the [`graph::MolecularGraph`] arena, so cyclic structures need
//! no reference counting.

pub mod atom;
pub mod graph;
pub mod ids;
