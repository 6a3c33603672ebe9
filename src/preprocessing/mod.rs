//! Methods applied to the clauses of a context before a solve.
//!
//! At present, the only method is the identification of [pure literals](pure).

pub mod pure;
