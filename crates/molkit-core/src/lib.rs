//! # molkit
//!
//! A library for assembling molecular graphs atom by atom, checking every bond against
//! element valence, and deriving canonical formulas and molecular weights from the result.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data: the element property tables, the
//!   capacity-limited [`Atom`](core::models::atom::Atom) node, the atom arena
//!   ([`MolecularGraph`](core::models::graph::MolecularGraph)) and formula/weight derivation.
//!
//! - **[`engine`]: The Logic Core.** The stateful [`Molecule`](engine::molecule::Molecule)
//!   builder with its open/closed lifecycle, hydrogen saturation, transactional batch
//!   application, configuration and error reporting.
//!
//! - **[`workflows`]: The Public API.** Declarative construction of a molecule from a
//!   recipe of steps, the entry point used by front ends and name parsers.
//!
//! ## Example
//!
//! ```
//! use molkit::core::elements::Element;
//! use molkit::engine::molecule::Molecule;
//! use molkit::engine::request::AddRequest;
//!
//! let mut ethanol = Molecule::new("ethanol");
//! ethanol
//!     .brancher(&[2])?
//!     .add(&[AddRequest::new(2, 1, Element::O)])?
//!     .closer()?;
//!
//! assert_eq!(ethanol.formula()?.to_string(), "C2H6O");
//! assert_eq!(ethanol.molecular_weight()?, 46.0);
//! # Ok::<(), molkit::engine::error::MoleculeError>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
