/*!
A database of clauses, accessed through [keys](ClauseKey).

Clauses of length two or more are stored in a [SlotMap] and are watched by their first two literals.
Unit clauses are not stored, and instead value an atom at level zero.

# Watches

For each literal a watch list records the keys of clauses in which the literal is watched.
When a literal becomes false the clauses watching the literal are inspected, and either a new watch is found, the remaining watch is propagated, or a conflict is noted.

Watch lists may contain keys to clauses which have since been removed, and these are dropped when encountered.
*/

use slotmap::SlotMap;

use crate::{
    config::{Activity, Config},
    db::ClauseKey,
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause},
        literal::CLiteral,
    },
};

/// A clause, as stored in the database.
pub struct DBClause {
    /// The literals of the clause, with the watched literals at positions zero and one.
    pub literals: CClause,

    /// Whether the clause was learnt during a solve, as opposed to being part of the original formula.
    pub learnt: bool,

    /// The activity of the clause, for learnt clauses.
    pub activity: Activity,
}

impl Clause for DBClause {
    fn size(&self) -> usize {
        self.literals.len()
    }

    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.literals.iter()
    }

    fn canonical(self) -> CClause {
        self.literals
    }
}

/// The clause database.
pub struct ClauseDB {
    /// Clauses of length two or more.
    pub clauses: SlotMap<ClauseKey, DBClause>,

    /// Watch lists, indexed by [literal index](CLiteral::index).
    pub watches: Vec<Vec<ClauseKey>>,

    /// A count of original clauses, including unit clauses.
    original_count: usize,

    /// A count of learnt clauses currently stored.
    learnt_count: usize,

    /// The amount to bump the activity of a clause by, inflated after each conflict.
    bump: Activity,

    /// The factor by which activity decays.
    decay: Activity,
}

impl ClauseDB {
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            clauses: SlotMap::with_key(),
            watches: Vec::default(),
            original_count: 0,
            learnt_count: 0,
            bump: 1.0,
            decay: config.clause_decay.value,
        }
    }

    /// Ensures a watch list exists for every literal of `atom_count` atoms.
    pub fn grow_watches(&mut self, atom_count: usize) {
        let required = atom_count * 2;
        if self.watches.len() < required {
            self.watches.resize_with(required, Vec::default);
        }
    }

    /// Stores `literals` as a clause, watching the first two literals.
    ///
    /// The caller is responsible for ensuring the first two literals are suitable watches.
    pub fn store(&mut self, literals: CClause, learnt: bool) -> ClauseKey {
        debug_assert!(literals.len() > 1);
        let first = literals[0];
        let second = literals[1];

        let key = self.clauses.insert(DBClause {
            literals,
            learnt,
            activity: 0.0,
        });

        self.watches[first.index()].push(key);
        self.watches[second.index()].push(key);

        match learnt {
            true => self.learnt_count += 1,
            false => self.original_count += 1,
        }
        log::trace!(target: targets::CLAUSE_DB, "Stored {key:?}");
        key
    }

    /// Notes an original unit clause, which is not stored.
    pub fn note_original_unit(&mut self) {
        self.original_count += 1;
    }

    /// The clause with key `key`, if present.
    pub fn get(&self, key: ClauseKey) -> Option<&DBClause> {
        self.clauses.get(key)
    }

    /// Removes the clause with key `key`, if present.
    /// Watches on the clause are removed lazily.
    pub fn remove(&mut self, key: ClauseKey) -> Option<DBClause> {
        let removed = self.clauses.remove(key);
        if let Some(clause) = &removed {
            if clause.learnt {
                self.learnt_count -= 1;
            }
        }
        removed
    }

    /// A count of original clauses.
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// A count of learnt clauses currently stored.
    pub fn learnt_count(&self) -> usize {
        self.learnt_count
    }

    /// All stored clauses, original and learnt.
    pub fn all_clauses(&self) -> impl Iterator<Item = (ClauseKey, &DBClause)> {
        self.clauses.iter()
    }

    /// Keys of learnt clauses, from least to most active.
    pub fn learnt_by_activity(&self) -> Vec<ClauseKey> {
        let mut learnt = self
            .clauses
            .iter()
            .filter(|(_, clause)| clause.learnt)
            .map(|(key, clause)| (key, clause.activity))
            .collect::<Vec<_>>();
        learnt.sort_by(|a, b| a.1.total_cmp(&b.1));
        learnt.into_iter().map(|(key, _)| key).collect()
    }

    /// Bumps the activity of the clause with key `key`, rescaling all activity if required.
    pub fn bump_activity(&mut self, key: ClauseKey) {
        /// The activity at which all activities are scaled down.
        const RESCALE_LIMIT: Activity = 1e20;

        let bump = self.bump;
        let Some(clause) = self.clauses.get_mut(key) else {
            return;
        };
        if !clause.learnt {
            return;
        }
        clause.activity += bump;
        if clause.activity > RESCALE_LIMIT {
            for (_, clause) in self.clauses.iter_mut() {
                clause.activity *= RESCALE_LIMIT.recip();
            }
            self.bump *= RESCALE_LIMIT.recip();
        }
    }

    /// Decays the activity of all clauses, by inflating the bump applied to future clauses.
    pub fn decay_activity(&mut self) {
        self.bump *= self.decay.recip();
    }
}
