/*!
Methods for choosing the value of an atom.

# Overview

A decision values some atom without a value, and is represented as a literal.
For example, a decision to value *p* with value *false* is represented by the literal *-p*.

# Heuristics

## Pure literals

If [preprocessing](crate::preprocessing) found literals which occur with a unique polarity, these are decided first.

## Activity

Otherwise, the atom is the most active atom without a value.
The [atom database](crate::db::atom) keeps atoms on a max activity heap, and as atoms are removed from the heap lazily some atoms with a value may be popped before an atom without a value is found.

With probability given by [Config::random_decision_bias](crate::config::Config::random_decision_bias) an atom without a value is instead chosen at random.

## Phase saving

If phase saving is enabled, a chosen atom is given the value it previously had.
Otherwise, the value is chosen with probability given by [Config::polarity_lean](crate::config::Config::polarity_lean).
*/

use rand::seq::IteratorRandom;

use crate::{
    context::GenericContext,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A decision, or none if every atom has a value.
    pub fn make_decision(&mut self) -> Option<CLiteral> {
        while let Some(literal) = self.pure_literals.pop() {
            if self.atom_db.value_of(literal.atom()).is_none() {
                return Some(literal);
            }
        }

        let atom = self.choose_atom()?;

        let value = match self.config.phase_saving.value {
            true => self.atom_db.previous_value_of(atom),
            false => self.rng.gen_bool(self.config.polarity_lean.value),
        };

        Some(CLiteral::new(atom, value))
    }

    /// An atom without a value, if one exists.
    fn choose_atom(&mut self) -> Option<Atom> {
        let bias = self.config.random_decision_bias.value;
        if bias > 0.0 && self.rng.gen_bool(bias) {
            let mut rng = std::mem::take(&mut self.rng);
            let chosen = self
                .atom_db
                .valuation()
                .unvalued_atoms()
                .choose(&mut rng);
            self.rng = rng;
            if chosen.is_some() {
                return chosen;
            }
        }

        while let Some(atom) = self.atom_db.heap_pop_most_active() {
            if self.atom_db.value_of(atom).is_none() {
                return Some(atom);
            }
        }
        None
    }
}
