//! Items used across the library, in support of its parts.

pub mod log;
