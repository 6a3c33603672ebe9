use std::time::Duration;

use crate::generic::luby::{Luby, LubyRepresentation};

/// Tallies kept across the solves of a context, used to schedule restarts and for logs.
#[derive(Default)]
pub struct Counters {
    pub conflicts: usize,

    /// Conflicts since the most recent restart, compared against the [luby](crate::generic::luby) schedule.
    pub conflicts_since_restart: LubyRepresentation,

    pub decisions: usize,

    /// Passes through the loop of a [solve](crate::procedures::solve).
    pub iterations: usize,

    pub restarts: usize,

    /// Learnt clauses removed by [reduction](crate::procedures::reduction).
    pub forgotten: usize,

    /// Time spent within the most recent solve.
    pub time: Duration,

    /// The restart schedule.
    pub luby: Luby,
}
