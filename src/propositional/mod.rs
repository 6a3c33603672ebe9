/*!
Propositional logic: formulas, normal forms, minimisation, and satisfiability.

- [Expr] is a formula, built through constructors which fold constants and keep arguments in a canonical order.
- [parse] reads a formula in the notation of a symbolic algebra system.
- [transform] converts to negation, conjunctive, and disjunctive normal forms.
- [simplify] minimises by the Quine–McCluskey method.
- [satisfiability] decides satisfiability (and related questions) with the SAT [context](crate::context).
- [truth_table] tabulates a formula.

```rust
# use otter_logic::config::Config;
# use otter_logic::propositional::*;
let config = Config::default();
let formula = parse("~(P & Q)").unwrap();

assert_eq!(to_nnf(&formula).to_string(), "~P | ~Q");
assert!(is_dnf(&to_dnf(&formula, false, &config).unwrap()));
assert!(satisfiable(&formula, &config).unwrap().is_some());
```
*/

mod expr;
mod parse;
pub mod satisfiability;
pub mod simplify;
pub mod transform;
pub mod truth_table;

pub use expr::Expr;
pub use parse::parse;
pub use satisfiability::{all_models, entails, equivalent, is_tautology, satisfiable, Assignment};
pub use simplify::{simplify_logic, NormalForm};
pub use transform::{eliminate_implications, is_cnf, is_dnf, is_nnf, to_cnf, to_dnf, to_nnf};
pub use truth_table::{truth_table, TruthTable};
