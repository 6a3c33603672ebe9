/*!
Analysis of a conflict, to a clause which asserts some literal at a previous level.

# Overview

Analysis resolves the conflict clause with the reasons of literals valued at the current level, in reverse trail order, until exactly one literal of the current level remains.
This is the first unique implication point (1-UIP), and the negation of the literal is asserted by the resulting clause.

Literals valued at level zero are dropped from the clause, as these hold regardless of any decision.

The atoms of every clause used are bumped, as is the activity of the clauses themselves.

On return the asserting literal is at position zero, and (if the clause is not a unit) a literal of the highest remaining level at position one.
So, the clause is suitable for storage with these literals watched, and the level of the literal at position one is the backjump level.

# Literature

The method follows the presentation of [Conflict-driven clause learning SAT solvers](https://doi.org/10.3233/FAIA200987) in the Handbook of satisfiability.
*/

use crate::{
    context::GenericContext,
    db::{ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal},
    },
    types::err::{self, AnalysisError},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Analyses the conflict of clause `conflict`, returning an asserting clause and the level to backjump to.
    ///
    /// For documentation, see [procedures::analysis](crate::procedures::analysis).
    pub fn conflict_analysis(
        &mut self,
        conflict: ClauseKey,
    ) -> Result<(CClause, LevelIndex), err::ErrorKind> {
        let current_level = self.trail.level();
        let mut learnt: CClause = vec![CLiteral::TOP];

        let mut pending = 0_usize;
        let mut key = conflict;
        let mut skip = 0;
        let mut trail_index = self.trail.literals.len();

        let asserting = loop {
            self.clause_db.bump_activity(key);
            let clause = self
                .clause_db
                .get(key)
                .ok_or(AnalysisError::MissingClause)?;

            for literal in clause.literals.iter().skip(skip) {
                let atom = literal.atom();
                if self.seen[atom as usize] {
                    continue;
                }
                let level = self
                    .atom_db
                    .level_of(atom)
                    .ok_or(AnalysisError::MissingReason)?;
                if level == 0 {
                    continue;
                }

                self.seen[atom as usize] = true;
                self.atom_db.bump_activity(atom);
                match level == current_level {
                    true => pending += 1,
                    false => learnt.push(*literal),
                }
            }

            let resolved = loop {
                trail_index = trail_index
                    .checked_sub(1)
                    .ok_or(AnalysisError::EmptyTrail)?;
                let candidate = self.trail.literals[trail_index];
                if self.seen[candidate.atom() as usize] {
                    break candidate;
                }
            };
            self.seen[resolved.atom() as usize] = false;
            pending = pending.saturating_sub(1);

            if pending == 0 {
                break resolved.negate();
            }

            key = self
                .atom_db
                .reason_of(resolved.atom())
                .ok_or(AnalysisError::MissingReason)?;
            skip = 1;
        };

        learnt[0] = asserting;
        for literal in &learnt[1..] {
            self.seen[literal.atom() as usize] = false;
        }

        let mut backjump_level = 0;
        for position in 1..learnt.len() {
            let level = self.atom_db.level_of(learnt[position].atom()).unwrap_or(0);
            if level > backjump_level {
                backjump_level = level;
                learnt.swap(1, position);
            }
        }

        log::trace!(target: targets::ANALYSIS, "Learnt clause of size {} asserting {asserting} at {backjump_level}", learnt.len());
        Ok((learnt, backjump_level))
    }
}
