/*!
Boolean constraint propagation.

# Overview

For each literal on the trail which has not been propagated, the clauses watching the negation of the literal are inspected.
As the negation of the literal is false, each clause either:
- Is satisfied by the other watched literal, and nothing happens.
- Has some other literal which is not false, and the watch moves to that literal.
- Has only false literals other than the other watched literal, and:
  + If the other watched literal has no value, the literal is propagated with the clause as the reason.
  + Otherwise, the clause is a conflict.

The watched literals of a clause are always at positions zero and one.
And, when a literal is propagated from a clause, the literal is moved to position zero, so the propagated literal of any reason clause is the first literal of the clause.

Watch lists are taken from the database while inspected, and so keys to clauses removed from the database are dropped at the same time.
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
};

/// Ok results of BCP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ok {
    /// Every literal on the trail has been propagated without conflict.
    Exhausted,

    /// The clause of the given key is false on the current valuation.
    Conflict(ClauseKey),
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Values `literal` at the current level, and places the literal on the trail to be propagated.
    pub(crate) fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        self.atom_db.set_value(literal, self.trail.level(), reason);
        self.trail.push(literal);
    }

    /// Propagates every literal on the trail which has not been propagated.
    ///
    /// For documentation, see [procedures::bcp](crate::procedures::bcp).
    pub fn bcp(&mut self) -> Ok {
        while let Some(literal) = self.trail.next_to_propagate() {
            let false_literal = literal.negate();
            let mut watchers = std::mem::take(&mut self.clause_db.watches[false_literal.index()]);
            let mut conflict = None;
            let mut index = 0;

            'watch_loop: while index < watchers.len() {
                let key = watchers[index];
                let Some(clause) = self.clause_db.clauses.get_mut(key) else {
                    watchers.swap_remove(index);
                    continue 'watch_loop;
                };

                if clause.literals[0] == false_literal {
                    clause.literals.swap(0, 1);
                }

                let other = clause.literals[0];
                if self.atom_db.literal_value(other) == Some(true) {
                    index += 1;
                    continue 'watch_loop;
                }

                for position in 2..clause.literals.len() {
                    let candidate = clause.literals[position];
                    if self.atom_db.literal_value(candidate) != Some(false) {
                        clause.literals.swap(1, position);
                        self.clause_db.watches[candidate.index()].push(key);
                        watchers.swap_remove(index);
                        continue 'watch_loop;
                    }
                }

                match self.atom_db.literal_value(other) {
                    Some(false) => {
                        log::trace!(target: targets::PROPAGATION, "Conflict from {literal}");
                        conflict = Some(key);
                        break 'watch_loop;
                    }

                    None => {
                        log::trace!(target: targets::PROPAGATION, "{literal} propagates {other}");
                        self.assign(other, Some(key));
                        index += 1;
                    }

                    Some(true) => index += 1,
                }
            }

            let watch_list = &mut self.clause_db.watches[false_literal.index()];
            watchers.append(watch_list);
            *watch_list = watchers;

            if let Some(key) = conflict {
                return Ok::Conflict(key);
            }
        }

        Ok::Exhausted
    }
}
