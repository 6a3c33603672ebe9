/*!
First-order logic over uninterpreted sorts, booleans, and integers, with a bounded search for models.

- [Sort]s and a [Signature] of declared symbols.
- [Formula]s and [Term]s, usually read from a [Script] written in a restricted form of the Python API of an SMT solver.
- A [Solver], which checks assertions by [grounding](ground) over finite universes and solving with the SAT [context](crate::context).
- [Model]s, which evaluate formulas and display as an SMT solver displays models.

Integers are bounded, and so the solver is complete for satisfiability only in the [effectively propositional](analysis) fragment without integers.
Outside of the fragment a check may be [unknown](CheckResult::Unknown).

```rust
# use otter_logic::config::Config;
# use otter_logic::first_order::{CheckResult, Script, Solver};
let script = Script::parse(
    "Human = DeclareSort('Human')
     x, y = Consts('x y', Human)
     P = Function('P', Human, BoolSort())
     Q = Function('Q', Human, BoolSort())
     ForAll([x], Implies(P(x), Exists([y], Q(y))))",
)
.unwrap();

let mut solver = Solver::from_script(script, Config::default());
assert_eq!(solver.check(), Ok(CheckResult::Sat));
assert_eq!(solver.model().unwrap().universes.get("Human"), Some(&1));
```
*/

pub mod analysis;
pub mod formula;
pub mod ground;
pub mod model;
mod parse;
mod signature;
pub mod solver;
mod sort;

pub use analysis::Profile;
pub use formula::{Formula, Relation, Term};
pub use model::{FunctionTable, Model, Value};
pub use parse::Script;
pub use signature::{Declaration, Signature};
pub use solver::{CheckResult, Entailment, Solver};
pub use sort::Sort;
