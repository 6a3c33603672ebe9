/*!
Clauses, aka. disjunctions of literals.

As with [literals](crate::structures::literal), a clause is anything which has methods for returning literals (and a few other useful things).
The canonical representation is [CClause], a vector of [CLiteral]s, though a single literal is also a (unit) clause.

```rust
# use otter_logic::structures::clause::Clause;
# use otter_logic::structures::literal::{CLiteral, Literal};
let p = CLiteral::new(1, true);
let q = CLiteral::new(2, false);

let clause = vec![p, q];
assert_eq!(clause.size(), 2);
assert_eq!(clause.as_dimacs(true), "1 -2 0");
assert_eq!(p.as_dimacs(), "1");
assert_eq!(Clause::as_dimacs(&p, true), "1 0");
```
*/

use crate::structures::literal::CLiteral;

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Something which has methods for returning literals, etc.
pub trait Clause {
    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// The literals of the clause.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// The clause in its canonical form.
    fn canonical(self) -> CClause;

    /// The clause in DIMACS form, optionally terminated with a zero.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = self
            .literals()
            .map(|literal| literal.as_dimacs())
            .collect::<Vec<_>>()
            .join(" ");
        if zero {
            if !dimacs.is_empty() {
                dimacs.push(' ');
            }
            dimacs.push('0');
        }
        dimacs
    }
}

impl Clause for CClause {
    fn size(&self) -> usize {
        self.len()
    }

    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn canonical(self) -> CClause {
        self
    }
}

impl Clause for CLiteral {
    fn size(&self) -> usize {
        1
    }

    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        std::iter::once(self)
    }

    fn canonical(self) -> CClause {
        vec![self]
    }
}
