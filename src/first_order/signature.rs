/*!
Signatures, as the sorts and symbols available to formulas.

A symbol is declared with a domain of sorts and a range sort.
Constants are symbols with an empty domain, and predicates are symbols with range [Bool](Sort::Bool).

```rust
# use otter_logic::first_order::{Signature, Sort};
let mut signature = Signature::default();
let human = signature.declare_sort("Human");
signature.declare("socrates", vec![], human.clone());
signature.declare("mortal", vec![human.clone()], Sort::Bool);

assert_eq!(signature.declaration("mortal").unwrap().arity(), 1);
assert!(signature.sort_named("Human").is_ok());
assert!(signature.sort_named("Animal").is_err());
```
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::{first_order::Sort, types::err::SortError};

/// The declaration of a symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub domain: Vec<Sort>,
    pub range: Sort,
}

impl Declaration {
    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    pub fn is_constant(&self) -> bool {
        self.domain.is_empty()
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.name)?;
        for sort in &self.domain {
            write!(f, "{sort} -> ")?;
        }
        write!(f, "{}", self.range)
    }
}

/// Declared sorts and symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    sorts: BTreeSet<String>,
    declarations: BTreeMap<String, Declaration>,
}

impl Signature {
    /// Declares an uninterpreted sort, returning the sort.
    ///
    /// Declaring a sort twice has no effect.
    pub fn declare_sort(&mut self, name: &str) -> Sort {
        self.sorts.insert(name.to_string());
        Sort::Uninterpreted(name.to_string())
    }

    /// The sort named `name`, where the names `Bool` and `Int` are always available.
    pub fn sort_named(&self, name: &str) -> Result<Sort, SortError> {
        match name {
            "Bool" => Ok(Sort::Bool),
            "Int" => Ok(Sort::Int),
            _ if self.sorts.contains(name) => Ok(Sort::Uninterpreted(name.to_string())),
            _ => Err(SortError::UnknownSort(name.to_string())),
        }
    }

    /// Declares the symbol `name`, replacing any previous declaration of `name`.
    pub fn declare(&mut self, name: &str, domain: Vec<Sort>, range: Sort) {
        let declaration = Declaration {
            name: name.to_string(),
            domain,
            range,
        };
        self.declarations.insert(name.to_string(), declaration);
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// The declarations, ordered by name.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// The uninterpreted sorts, ordered by name.
    pub fn sorts(&self) -> impl Iterator<Item = Sort> + '_ {
        self.sorts.iter().map(|name| Sort::Uninterpreted(name.clone()))
    }
}
