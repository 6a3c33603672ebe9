use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail},
    reports::Report,
    structures::{atom::Atom, literal::CLiteral},
    types::err::ErrorKind,
};

use super::{ContextState, Counters};

/// A generic context, parameratised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [Default].
///
/// # Example
///
/// ```rust
/// # use otter_logic::context::GenericContext;
/// # use otter_logic::generic::random::MinimalPCG32;
/// # use otter_logic::config::Config;
/// let context = GenericContext::<MinimalPCG32>::from_config(Config::default());
/// ```
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// The trail of valued literals.
    pub trail: Trail,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// A buffer noting atoms seen during analysis, indexed by atom.
    pub(crate) seen: Vec<bool>,

    /// Literals to decide before any other, as found by [preprocessing](crate::preprocessing).
    pub(crate) pure_literals: Vec<CLiteral>,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// The value of `atom` on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// A count of atoms in the context, excluding the top atom.
    pub fn atom_count(&self) -> usize {
        self.atom_db.count() - 1
    }

    /// The current valuation, as a string of literals.
    pub fn valuation_string(&self) -> String {
        self.atom_db.valuation_string()
    }

    /// Removes all decisions, and all values derived from decisions.
    ///
    /// Values established at level zero are kept.
    pub fn clear_decisions(&mut self) {
        self.backjump(0);
        if self.state == ContextState::Satisfiable {
            self.state = ContextState::Input;
        }
    }

    /// An error if the context is known to be unsatisfiable, as no further input can change the report.
    pub fn ensure_open(&self) -> Result<(), ErrorKind> {
        match self.state {
            ContextState::Unsatisfiable => Err(ErrorKind::InvalidState),
            _ => Ok(()),
        }
    }
}
