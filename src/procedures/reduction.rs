//! Removal of learnt clauses.
//!
//! At a restart half of the learnt clauses are forgotten, with those of least activity forgotten first.
//!
//! A clause which is the reason for the value of some atom is kept, as are binary clauses.

use crate::{context::GenericContext, misc::log::targets::{self}, structures::literal::Literal};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Forgets (roughly) half of the learnt clauses.
    pub fn reduce_learnt(&mut self) {
        let candidates = self.clause_db.learnt_by_activity();
        let target = candidates.len() / 2;
        let mut forgotten = 0;

        for key in candidates {
            if forgotten >= target {
                break;
            }
            let Some(clause) = self.clause_db.get(key) else {
                continue;
            };
            if clause.literals.len() <= 2 {
                continue;
            }
            let locked = self.atom_db.reason_of(clause.literals[0].atom()) == Some(key);
            if locked {
                continue;
            }
            self.clause_db.remove(key);
            forgotten += 1;
        }

        self.counters.forgotten += forgotten;
        log::debug!(target: targets::REDUCTION, "Forgot {forgotten} clauses");
    }
}
