//! Sorts of first-order terms.

/// A sort.
///
/// Booleans and integers are interpreted, and any other sort is interpreted by a finite universe of elements when searching for a model.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sort {
    Bool,
    Int,
    Uninterpreted(String),
}

impl Sort {
    pub fn is_uninterpreted(&self) -> bool {
        matches!(self, Sort::Uninterpreted(_))
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Int => write!(f, "Int"),
            Sort::Uninterpreted(name) => write!(f, "{name}"),
        }
    }
}
