//! Abstract elements of a solve: atoms, literals, clauses, and valuations.
//!
//! Each is first a trait (where useful) with a canonical instantiation used throughout the library.

pub mod atom;
pub mod clause;
pub mod literal;
pub mod valuation;
