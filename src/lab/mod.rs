/*!
Demonstrations of the library, as presented by the cli.

Each demonstration returns a record which displays as a short report and serialises (with [serde]) for output as JSON.

- [propositional] analyses a formula: normal forms, a simplification, and a model (if one exists).
- [first_order] checks quantified formulas against a preset signature, solves small problems over booleans, verifies a syllogism, and solves a pair of integer constraints.

```rust
# use otter_logic::config::Config;
# use otter_logic::lab::propositional::{analyse, DEFAULT_FORMULA};
let analysis = analyse(DEFAULT_FORMULA, &Config::default()).unwrap();
assert_eq!(analysis.input, "Implies(P, Q) & Implies(Q, R)");
assert!(analysis.satisfiable.is_some());
```
*/

pub mod first_order;
pub mod propositional;

use crate::config::Config;

/// The time limit of a demonstration, unless another is given.
pub const TIME_LIMIT: std::time::Duration = std::time::Duration::from_secs(10);

/// The default configuration, with each check bounded by [TIME_LIMIT].
pub fn config() -> Config {
    let mut config = Config::default();
    config.time_limit.value = TIME_LIMIT;
    config
}
