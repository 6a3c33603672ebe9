/*!
Valuations, aka. (partial) functions from atoms to truth values.

The canonical representation is [CValuation], a vector indexed by atoms.

```rust
# use otter_logic::structures::valuation::{CValuation, Valuation};
let valuation: CValuation = vec![Some(true), None, Some(false), None];

assert_eq!(valuation.value_of(2), Some(Some(false)));
assert_eq!(valuation.unvalued_atoms().collect::<Vec<_>>(), vec![1, 3]);
assert_eq!(valuation.atom_count(), 4);
```
*/

use crate::structures::atom::Atom;

/// The canonical representation of a valuation.
pub type CValuation = Vec<Option<bool>>;

/// Something which may be read as a valuation.
pub trait Valuation {
    /// The value of `atom`, if `atom` is part of the valuation.
    fn value_of(&self, atom: Atom) -> Option<Option<bool>>;

    /// Atoms paired with their values, if any.
    fn atom_values(&self) -> impl Iterator<Item = (Atom, Option<bool>)>;

    /// Atoms without a value.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.atom_values()
            .filter_map(|(atom, value)| value.is_none().then_some(atom))
    }

    /// Atoms with a value, paired with that value.
    fn valued_atoms(&self) -> impl Iterator<Item = (Atom, bool)> {
        self.atom_values()
            .filter_map(|(atom, value)| value.map(|v| (atom, v)))
    }

    /// A count of the atoms of the valuation.
    fn atom_count(&self) -> usize;
}

impl Valuation for [Option<bool>] {
    fn value_of(&self, atom: Atom) -> Option<Option<bool>> {
        self.get(atom as usize).copied()
    }

    fn atom_values(&self) -> impl Iterator<Item = (Atom, Option<bool>)> {
        self.iter()
            .enumerate()
            .map(|(atom, value)| (atom as Atom, *value))
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}

impl Valuation for CValuation {
    fn value_of(&self, atom: Atom) -> Option<Option<bool>> {
        self.as_slice().value_of(atom)
    }

    fn atom_values(&self) -> impl Iterator<Item = (Atom, Option<bool>)> {
        self.as_slice().atom_values()
    }

    fn atom_count(&self) -> usize {
        self.len()
    }
}
