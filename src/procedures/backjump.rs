//! Recovery from a conflict.
//!
//! A backjump is a 'jump' from some (higher) level to some previous (lower) level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone.
//!
//! Passing a target level greater than or equal to the current level is safe, as nothing will happen.
//!
//! # Literature
//!
//! See [Chronological Backtracking](https://doi.org/10.1007/978-3-319-94144-8_7) for a discussion of chronological and non-chronological backjumping.

use crate::{
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets::{self},
    structures::{clause::CClause, literal::Literal},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Backjumps to the given target level.
    pub fn backjump(&mut self, target: LevelIndex) {
        if target >= self.trail.level() {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {target}", self.trail.level());

        for literal in self.trail.truncate_to(target) {
            self.atom_db.drop_value(literal.atom());
        }
    }

    /// Backjumps to `level` and asserts the first literal of `clause`, storing the clause if not a unit.
    pub(crate) fn learn(&mut self, clause: CClause, level: LevelIndex) {
        self.backjump(level);
        let asserting = clause[0];
        match clause.len() {
            1 => self.assign(asserting, None),
            _ => {
                let key = self.clause_db.store(clause, true);
                self.assign(asserting, Some(key));
            }
        }
    }
}
