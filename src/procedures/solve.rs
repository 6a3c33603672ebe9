//! Determines the satisfiability of the formula in a context.
//!
//! # Overview
//!
//! [solve](GenericContext::solve) is the conflict-driven clause-learning algorithm.
//!
//! Roughly, the loop is as diagrammed:
//!
//! ```none
//!           +---------------+
//!   +-------| make_decision |-----> satisfiable, if no decision can be made
//!   |       +---------------+
//!   |               ⌃
//!   |               | if there is no conflict
//!   ⌄   +-----+     |
//! --+-->| bcp |-----+
//!   ⌃   +-----+     |
//!   |               | if there is a conflict
//!   |               ⌄
//!   |       +---------------+
//!   +-------| analysis and  |-----> unsatisfiable, if the conflict is at level zero
//!           | backjump      |
//!           +---------------+
//! ```
//!
//! Between iterations a [restart](crate::generic::luby) may be scheduled, in which case all decisions are forgotten and (if configured) some learnt clauses are [reduced](crate::procedures::reduction).
//!
//! A solve which exceeds the time limit of the context stops with an [Unknown](Report::Unknown) report.
//!
//! # Example
//!
//! ```rust
//! # use otter_logic::config::Config;
//! # use otter_logic::context::Context;
//! # use otter_logic::reports::Report;
//! let mut the_context = Context::from_config(Config::default());
//!
//! let not_p_or_q = the_context.clause_from_string("-p q").unwrap();
//! let p_or_not_q = the_context.clause_from_string("p -q").unwrap();
//! assert!(the_context.add_clause(not_p_or_q).is_ok());
//! assert!(the_context.add_clause(p_or_not_q).is_ok());
//!
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//!
//! let p_clause = the_context.clause_from_string("p").unwrap();
//! assert!(the_context.add_clause(p_clause).is_ok());
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//!
//! let q = the_context.atom_db.atom_of("q").unwrap();
//! assert_eq!(the_context.value_of(q), Some(true));
//! ```
//!
//! # Literature
//!
//! The core solve procedure was developed by reading [Decision Procedures](https://doi.org/10.1007/978-3-662-50497-0)
//! and the [Handbook of satisfiability](https://www.iospress.com/catalog/books/handbook-of-satisfiability-2).

use crate::{
    context::{ContextState, GenericContext},
    procedures::bcp::{self},
    reports::Report,
    types::err::{self},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the formula in the context.
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        if self.state == ContextState::Unsatisfiable {
            return Ok(Report::Unsatisfiable);
        }

        let total_time = std::time::Instant::now();
        self.backjump(0);
        self.state = ContextState::Solving;

        if self.config.preprocessing.value {
            self.preprocess();
        }

        'solve_loop: loop {
            self.counters.iterations += 1;

            self.counters.time = total_time.elapsed();
            if let Some(limit) = self.config.time_limit() {
                if self.counters.time > limit {
                    log::info!("Time limit reached");
                    break 'solve_loop;
                }
            }

            match self.bcp() {
                bcp::Ok::Conflict(key) => {
                    self.counters.conflicts += 1;
                    self.counters.conflicts_since_restart += 1;

                    if self.trail.level() == 0 {
                        self.state = ContextState::Unsatisfiable;
                        break 'solve_loop;
                    }

                    let (clause, level) = self.conflict_analysis(key)?;
                    self.learn(clause, level);

                    self.atom_db.decay_activity();
                    self.clause_db.decay_activity();

                    if self.restart_scheduled() {
                        self.restart();
                    }
                }

                bcp::Ok::Exhausted => match self.make_decision() {
                    Some(decision) => {
                        self.counters.decisions += 1;
                        self.trail.open_level();
                        self.assign(decision, None);
                    }

                    None => {
                        self.state = ContextState::Satisfiable;
                        break 'solve_loop;
                    }
                },
            }
        }

        self.counters.time = total_time.elapsed();
        log::info!(
            "{} after {} conflicts and {} decisions",
            self.state,
            self.counters.conflicts,
            self.counters.decisions
        );
        Ok(self.report())
    }

    /// Whether a restart is due, following the luby sequence scaled by `luby_u`.
    fn restart_scheduled(&self) -> bool {
        self.config.restart.value
            && self.counters.conflicts_since_restart
                >= self
                    .config
                    .luby_u
                    .value
                    .saturating_mul(self.counters.luby.current())
    }

    /// Forgets all decisions, and (if configured) reduces learnt clauses.
    fn restart(&mut self) {
        self.backjump(0);
        self.counters.restarts += 1;
        self.counters.conflicts_since_restart = 0;
        self.counters.luby.next();
        if self.config.reduction.value {
            self.reduce_learnt();
        }
    }
}
