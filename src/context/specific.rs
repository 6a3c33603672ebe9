use crate::{
    config::Config,
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail},
    generic::random::MinimalPCG32,
};

use rand::SeedableRng;

use super::{ContextState, Counters, GenericContext};

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration.
    ///
    /// The source of randomness is seeded with a fixed value, so solves are deterministic.
    pub fn from_config(config: Config) -> Self {
        let atom_db = AtomDB::new(&config);
        let mut clause_db = ClauseDB::new(&config);
        clause_db.grow_watches(atom_db.count());

        Self {
            atom_db,
            clause_db,

            config,

            counters: Counters::default(),
            trail: Trail::default(),
            seen: vec![false],
            pure_literals: Vec::default(),

            rng: MinimalPCG32::from_seed(0_u64.to_le_bytes()),
            state: ContextState::Input,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::from_config(Config::default())
    }
}
