//! # Workflows Module
//!
//! High-level entry points that drive a [`Molecule`](crate::engine::molecule::Molecule)
//! from a declarative description instead of individual method calls.
//!
//! - **Build Workflow** ([`build`]) - Replays a TOML recipe of construction steps and
//!   reports which step failed, if any.

pub mod build;
