/*!
A solver for first-order assertions, in the manner of an SMT solver object.

Assertions are added to a solver, possibly within scopes, and a [check](Solver::check) searches for a finite model of the assertions.

A check grounds the assertions for a sequence of universe sizes, in order of increasing total size, with the size of each uninterpreted sort at most the [domain limit](crate::config::Config::domain_limit).
- If some grounding is satisfiable, the model of the grounding is verified against each assertion and the result is [Sat](CheckResult::Sat).
- If each grounding is unsatisfiable, the result is [Unsat](CheckResult::Unsat) only when the sizes tried are sufficient, as noted in [analysis](crate::first_order::analysis).
  Otherwise, the result is [Unknown](CheckResult::Unknown) and a reason is available from [reason_unknown](Solver::reason_unknown).

# Example

```rust
# use otter_logic::config::Config;
# use otter_logic::first_order::{CheckResult, Entailment, Script, Solver};
let script = Script::parse(
    "Human = DeclareSort('Human')
     socrates, x = Consts('socrates x', Human)
     human = Function('human', Human, BoolSort())
     mortal = Function('mortal', Human, BoolSort())
     ForAll([x], Implies(human(x), mortal(x)))
     human(socrates)",
)
.unwrap();
let conjecture = script.formula("mortal(socrates)").unwrap();

let mut solver = Solver::from_script(script, Config::default());
assert_eq!(solver.check(), Ok(CheckResult::Sat));
assert_eq!(solver.entails(conjecture), Ok(Entailment::Valid));
```
*/

use crate::{
    config::Config,
    first_order::{
        analysis::{universe_sizes, Profile},
        ground::Grounding,
        Formula, Model, Script, Signature, Sort,
    },
    misc::log::targets,
    reports::Report,
    types::err::{ErrorKind, FirstOrderError},
};

/// The result of a check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    Sat,
    Unsat,
    Unknown,
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "sat"),
            Self::Unsat => write!(f, "unsat"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Whether the assertions of a solver entail some conjecture.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entailment {
    /// The negation of the conjecture is inconsistent with the assertions.
    Valid,

    /// A model of the assertions on which the conjecture is false.
    Invalid(Model),

    Unknown,
}

impl std::fmt::Display for Entailment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid(model) => write!(f, "invalid, with counterexample {model}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A collection of assertions, and the outcome of the most recent check.
pub struct Solver {
    pub config: Config,

    signature: Signature,

    assertions: Vec<Formula>,

    /// The count of assertions at each push.
    scopes: Vec<usize>,

    /// The model found by the most recent check, if it was satisfiable.
    model: Option<Model>,

    reason_unknown: Option<String>,
}

impl Solver {
    /// A solver with an empty signature.
    pub fn new(config: Config) -> Self {
        Solver {
            config,
            signature: Signature::default(),
            assertions: Vec::default(),
            scopes: Vec::default(),
            model: None,
            reason_unknown: None,
        }
    }

    /// A solver with the signature and assertions of `script`.
    pub fn from_script(script: Script, config: Config) -> Self {
        let mut solver = Solver::new(config);
        solver.signature = script.signature;
        solver.assertions = script.assertions;
        solver
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn signature_mut(&mut self) -> &mut Signature {
        &mut self.signature
    }

    pub fn assertions(&self) -> &[Formula] {
        &self.assertions
    }

    /// Adds `formula` to the assertions, within the current scope.
    pub fn add(&mut self, formula: Formula) {
        log::trace!(target: targets::GROUND, "Assertion {formula}");
        self.assertions.push(formula);
        self.model = None;
    }

    /// Opens a scope, and the assertions added within the scope are removed when the scope is closed by a [pop](Solver::pop).
    pub fn push(&mut self) {
        self.scopes.push(self.assertions.len());
    }

    /// Closes the most recent scope.
    pub fn pop(&mut self) -> Result<(), ErrorKind> {
        match self.scopes.pop() {
            Some(count) => {
                self.assertions.truncate(count);
                self.model = None;
                Ok(())
            }
            None => Err(ErrorKind::from(FirstOrderError::PopEmpty)),
        }
    }

    /// The count of open scopes.
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// The model found by the most recent check.
    pub fn model(&self) -> Result<&Model, ErrorKind> {
        self.model
            .as_ref()
            .ok_or(ErrorKind::from(FirstOrderError::NoModel))
    }

    /// Why the most recent check was unknown, if it was.
    pub fn reason_unknown(&self) -> Option<&str> {
        self.reason_unknown.as_deref()
    }

    /// Searches for a model of the assertions.
    pub fn check(&mut self) -> Result<CheckResult, ErrorKind> {
        self.model = None;
        self.reason_unknown = None;

        let profile = Profile::of(&self.assertions, &self.signature);
        let propositional = profile.effectively_propositional();
        let domain_limit = self.config.domain_limit.value;

        let sorts = profile.bounds.keys().cloned().collect::<Vec<Sort>>();
        let limits = profile
            .bounds
            .values()
            .map(|bound| match propositional {
                true => (*bound).min(domain_limit),
                false => domain_limit,
            })
            .collect::<Vec<_>>();
        let exhaustive = propositional
            && !profile.integers
            && profile.bounds.values().all(|bound| *bound <= domain_limit);

        log::debug!(target: targets::GROUND,
            "Checking {} assertions over sorts {sorts:?} with limits {limits:?}",
            self.assertions.len()
        );

        // The time limit bounds the whole check, so each grounding is given what remains.
        let started = std::time::Instant::now();
        let mut config = self.config.clone();

        for sizes in universe_sizes(&limits) {
            if let Some(limit) = self.config.time_limit() {
                let remaining = limit.saturating_sub(started.elapsed());
                if remaining.is_zero() {
                    return Ok(self.timeout());
                }
                config.time_limit.value = remaining;
            }

            let universes = sorts.iter().cloned().zip(sizes).collect();
            let mut grounding =
                Grounding::new(&self.signature, &profile.symbols, universes, &config)?;
            for assertion in &self.assertions {
                grounding.assert(assertion)?;
            }

            match grounding.context.solve()? {
                Report::Satisfiable => {
                    let model = grounding.model();
                    for assertion in &self.assertions {
                        if !model.evaluate(assertion)? {
                            log::warn!(target: targets::GROUND, "{assertion} is false on {model}");
                            self.reason_unknown =
                                Some(format!("the model found does not satisfy {assertion}"));
                            return Ok(CheckResult::Unknown);
                        }
                    }
                    log::info!(target: targets::GROUND, "Model found: {model}");
                    self.model = Some(model);
                    return Ok(CheckResult::Sat);
                }

                Report::Unsatisfiable => {}

                Report::Unknown => return Ok(self.timeout()),
            }
        }

        if exhaustive {
            return Ok(CheckResult::Unsat);
        }

        let reason = if profile.integers {
            format!(
                "no model with integers of {} bits",
                self.config.int_width.value
            )
        } else if !propositional {
            format!(
                "no model within the domain limit, outside the effectively propositional fragment as {}",
                profile.violations.join(", and ")
            )
        } else {
            format!("no model with at most {domain_limit} elements of each sort")
        };
        log::info!(target: targets::GROUND, "Unknown: {reason}");
        self.reason_unknown = Some(reason);
        Ok(CheckResult::Unknown)
    }

    fn timeout(&mut self) -> CheckResult {
        log::info!(target: targets::GROUND, "Unknown: time limit reached");
        self.reason_unknown = Some("timeout".to_string());
        CheckResult::Unknown
    }

    /// Whether the assertions entail `conjecture`, by a check of the assertions together with the negation of `conjecture` within a scope.
    pub fn entails(&mut self, conjecture: Formula) -> Result<Entailment, ErrorKind> {
        self.push();
        self.add(conjecture.negate());
        let result = self.check();
        let model = self.model.take();
        self.pop()?;

        match result? {
            CheckResult::Unsat => Ok(Entailment::Valid),
            CheckResult::Sat => match model {
                Some(model) => Ok(Entailment::Invalid(model)),
                None => Err(ErrorKind::from(FirstOrderError::NoModel)),
            },
            CheckResult::Unknown => Ok(Entailment::Unknown),
        }
    }
}

#[cfg(test)]
mod solver_tests {
    use super::*;

    fn solver(text: &str) -> Solver {
        Solver::from_script(Script::parse(text).unwrap(), Config::default())
    }

    #[test]
    fn propositional() {
        let mut s = solver("P, Q = Bools('P Q')\nAnd(P, Not(P))");
        assert_eq!(s.check(), Ok(CheckResult::Unsat));
        assert!(s.model().is_err());

        let mut s = solver("P, Q = Bools('P Q')\nImplies(P, Q)\nP");
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        assert_eq!(s.model().unwrap().get("Q"), Some(&crate::first_order::Value::Bool(true)));
    }

    #[test]
    fn time_limit_bounds_the_check() {
        let mut s = solver("x = Int('x')\nx * x < 0");
        assert!(s.config.time_limit.set(std::time::Duration::from_millis(1)).is_ok());

        assert_eq!(s.check(), Ok(CheckResult::Unknown));
        assert_eq!(s.reason_unknown(), Some("timeout"));
        assert!(s.model().is_err());
    }

    #[test]
    fn scopes() {
        let mut s = solver("P = Bool('P')\nP");
        assert!(s.pop().is_err());

        s.push();
        s.add(Formula::Not(Box::new(Formula::Predicate("P".to_string(), vec![]))));
        assert_eq!(s.scope_depth(), 1);
        assert_eq!(s.check(), Ok(CheckResult::Unsat));
        assert!(s.pop().is_ok());

        assert_eq!(s.assertions().len(), 1);
        assert_eq!(s.check(), Ok(CheckResult::Sat));
    }

    #[test]
    fn bounded_epr() {
        // Three distinct constants of a sort with the distinction forced within a universe of two elements.
        let mut s = solver(
            "H = DeclareSort('H')
             a, b, c, x = Consts('a b c x', H)
             Distinct(a, b, c)
             ForAll([x], Or(x == a, x == b))",
        );
        assert_eq!(s.check(), Ok(CheckResult::Unsat));

        let mut s = solver(
            "H = DeclareSort('H')
             a, b, x = Consts('a b x', H)
             P = Function('P', H, BoolSort())
             P(a)
             Not(P(b))
             ForAll([x], Or(x == a, x == b))",
        );
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        assert_eq!(s.model().unwrap().universes.get("H"), Some(&2));
    }

    #[test]
    fn unknown_outside_the_fragment() {
        let mut s = solver(
            "H = DeclareSort('H')
             x, y, z = Consts('x y z', H)
             R = Function('R', H, H, BoolSort())
             ForAll([x], Exists([y], R(x, y)))
             ForAll([x], Not(R(x, x)))
             ForAll([x, y, z], Implies(And(R(x, y), R(y, z)), R(x, z)))",
        );
        // A strict order without a greatest element has no finite model.
        assert_eq!(s.check(), Ok(CheckResult::Unknown));
        assert!(s.reason_unknown().unwrap().contains("existential"));
    }

    #[test]
    fn integers() {
        let mut s = solver("x, y = Ints('x y')\nx + y == 10\nx > y\nx > 0\ny > 0");
        assert_eq!(s.check(), Ok(CheckResult::Sat));
        let model = s.model().unwrap().clone();
        let (x, y) = match (model.get("x"), model.get("y")) {
            (Some(crate::first_order::Value::Int(x)), Some(crate::first_order::Value::Int(y))) => (*x, *y),
            _ => panic!("missing values"),
        };
        assert_eq!(x + y, 10);
        assert!(x > y && y > 0);

        let mut s = solver("x = Int('x')\nx > 5\nx < 3");
        assert_eq!(s.check(), Ok(CheckResult::Unknown));
        assert!(s.reason_unknown().unwrap().contains("integers"));

        let mut s = solver("1 + 1 == 3");
        assert_eq!(s.check(), Ok(CheckResult::Unsat));
    }

    #[test]
    fn entailment() {
        let text = "Human = DeclareSort('Human')
             socrates, x = Consts('socrates x', Human)
             human = Function('human', Human, BoolSort())
             mortal = Function('mortal', Human, BoolSort())
             ForAll([x], Implies(human(x), mortal(x)))";
        let script = Script::parse(text).unwrap();
        let conjecture = script.formula("mortal(socrates)").unwrap();
        let mut s = Solver::from_script(script, Config::default());

        match s.entails(conjecture) {
            Ok(Entailment::Invalid(model)) => assert!(model.get("socrates").is_some()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.assertions().len(), 1);
        assert_eq!(s.scope_depth(), 0);
    }
}
