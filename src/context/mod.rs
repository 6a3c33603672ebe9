/*!
The context, to which clauses are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the source of randomness used when making decisions.
[from_config](Context::from_config) is implemented for a context rather than a generic context, to avoid requiring a source of randomness be supplied alongside a config.

# Example
```rust
# use otter_logic::context::Context;
# use otter_logic::config::Config;
# use otter_logic::reports::Report;
# use otter_logic::structures::literal::{CLiteral, Literal};
let mut the_context = Context::from_config(Config::default());

let p = the_context.fresh_atom().unwrap();
let q = the_context.fresh_atom().unwrap();

let p_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true)];
assert!(the_context.add_clause(p_q_clause).is_ok());

let not_p = CLiteral::new(p, false);

assert!(the_context.add_clause(vec![not_p]).is_ok());
assert!(the_context.solve().is_ok());
assert_eq!(the_context.report(), Report::Satisfiable);

assert_eq!(the_context.value_of(p), Some(false));
assert_eq!(the_context.value_of(q), Some(true));
```
*/

mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
mod specific;
pub use specific::Context;

/// Where a context is, with respect to its clauses.
///
/// A context accepts clauses in any state other than [Unsatisfiable](ContextState::Unsatisfiable), as a set of clauses with no model has no model with further clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Clauses may be added, and nothing is known of their consistency.
    Input,

    /// A solve is underway, or was stopped before consistency was determined.
    Solving,

    /// A model of the clauses is on the trail.
    Satisfiable,

    Unsatisfiable,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Input => "Input",
            Self::Solving => "Solving",
            Self::Satisfiable => "Satisfiable",
            Self::Unsatisfiable => "Unsatisfiable",
        };
        write!(f, "{name}")
    }
}
