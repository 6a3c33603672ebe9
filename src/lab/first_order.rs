/*!
First-order demonstrations.

- Quantified formulas checked against a preset signature, with a sort `Human`, constants `x` and `y`, and predicates `P` and `Q`.
- Problems over the booleans `P`, `Q`, and `R`, in the notation of a [Script].
- The syllogism from `ForAll([x], Implies(human(x), mortal(x)))` and `human(socrates)` to `mortal(socrates)`.
- Integers `x` and `y` with `x + y == 10`, `x > y`, and both positive.

Input is always parsed as a [Script], and never evaluated as code.
*/

use serde::Serialize;

use crate::{
    config::Config,
    first_order::{CheckResult, Entailment, Model, Script, Solver, Value},
    types::err::ErrorKind,
};

/// The declarations against which quantified formulas are read.
pub const PRESET_SIGNATURE: &str = "Human = DeclareSort('Human')
x, y = Consts('x y', Human)
P = Function('P', Human, BoolSort())
Q = Function('Q', Human, BoolSort())";

/// The kinds of quantified formula offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quantifier {
    Universal,
    Existential,
    Combined,
}

impl Quantifier {
    pub fn default_formula(&self) -> &'static str {
        match self {
            Self::Universal => "ForAll([x], Implies(P(x), Q(x)))",
            Self::Existential => "Exists([x], And(P(x), Q(x)))",
            Self::Combined => "ForAll([x], Implies(P(x), Exists([y], Q(y))))",
        }
    }
}

impl std::fmt::Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Universal => write!(f, "Universal"),
            Self::Existential => write!(f, "Existential"),
            Self::Combined => write!(f, "Combined"),
        }
    }
}

/// The result of a check of a quantified formula.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuantifierAnalysis {
    pub kind: Quantifier,
    pub formula: String,
    pub result: CheckResult,
    pub model: Option<Model>,
    pub reason_unknown: Option<String>,
}

/// Checks `text`, or the default formula of `kind`, against the [preset signature](PRESET_SIGNATURE).
pub fn analyse_quantified(
    kind: Quantifier,
    text: Option<&str>,
    config: &Config,
) -> Result<QuantifierAnalysis, ErrorKind> {
    let script = Script::parse(PRESET_SIGNATURE)?;
    let formula = script.formula(text.unwrap_or(kind.default_formula()))?;

    let mut solver = Solver::from_script(script, config.clone());
    solver.add(formula.clone());
    let result = solver.check()?;

    Ok(QuantifierAnalysis {
        kind,
        formula: formula.to_string(),
        result,
        model: solver.model().ok().cloned(),
        reason_unknown: solver.reason_unknown().map(str::to_string),
    })
}

impl std::fmt::Display for QuantifierAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Formula: {}", self.formula)?;
        write!(f, "Result ({}): {}", self.kind, self.result)?;
        match &self.model {
            Some(model) => {
                let json = serde_json::to_string_pretty(model).map_err(|_| std::fmt::Error)?;
                write!(f, "\n{json}")
            }
            None => {
                write!(f, "\nThe formula is inconsistent or undetermined.")?;
                if let Some(reason) = &self.reason_unknown {
                    write!(f, " ({reason})")?;
                }
                Ok(())
            }
        }
    }
}

/// The booleans over which problems are written.
pub const PROBLEM_SIGNATURE: &str = "P, Q, R = Bools('P Q R')";

/// Prepared problems over booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Problem {
    Contradiction,
    Tautology,
    ModusPonens,
}

impl Problem {
    pub fn formula(&self) -> &'static str {
        match self {
            Self::Contradiction => "And(P, Not(P))",
            Self::Tautology => "Or(P, Not(P))",
            Self::ModusPonens => "And(Implies(P, Q), P)",
        }
    }
}

/// The result of a check of a problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub expression: String,
    pub result: CheckResult,

    /// The model found, if any, serialised as each symbol paired with its value.
    pub model: Option<Model>,

    pub reason_unknown: Option<String>,
}

/// Checks the statements of `text`, read after the [problem signature](PROBLEM_SIGNATURE).
///
/// Further declarations may be made within `text`.
///
/// ```rust
/// # use otter_logic::config::Config;
/// # use otter_logic::first_order::CheckResult;
/// # use otter_logic::lab::first_order::solve_problem;
/// let solution = solve_problem("And(Implies(P, Q), P)", &Config::default()).unwrap();
/// assert_eq!(solution.result, CheckResult::Sat);
/// assert_eq!(solution.to_string(), "Expression: And(Implies(P, Q), P)
/// The formula is satisfiable
/// P = True
/// Q = True");
/// ```
pub fn solve_problem(text: &str, config: &Config) -> Result<Solution, ErrorKind> {
    let mut script = Script::parse(PROBLEM_SIGNATURE)?;
    script.read(text)?;

    let expression = script
        .assertions
        .iter()
        .map(|assertion| assertion.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut solver = Solver::from_script(script, config.clone());
    let result = solver.check()?;

    Ok(Solution {
        expression,
        result,
        model: solver.model().ok().cloned(),
        reason_unknown: solver.reason_unknown().map(str::to_string),
    })
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Expression: {}", self.expression)?;
        match self.result {
            CheckResult::Sat => {
                write!(f, "The formula is satisfiable")?;
                let entries = self.model.as_ref().map(Model::entries).unwrap_or_default();
                for (name, value) in entries {
                    write!(f, "\n{name} = {value}")?;
                }
                Ok(())
            }
            CheckResult::Unsat => write!(f, "The formula is unsatisfiable"),
            CheckResult::Unknown => match &self.reason_unknown {
                Some(reason) => write!(f, "The formula is undetermined ({reason})"),
                None => write!(f, "The formula is undetermined"),
            },
        }
    }
}

pub const SYLLOGISM: &str = "Human = DeclareSort('Human')
socrates, x = Consts('socrates x', Human)
human = Function('human', Human, BoolSort())
mortal = Function('mortal', Human, BoolSort())
ForAll([x], Implies(human(x), mortal(x)))
human(socrates)";

pub const SYLLOGISM_CONJECTURE: &str = "mortal(socrates)";

/// Premises, a conjecture, and whether the premises entail the conjecture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Syllogism {
    pub premises: Vec<String>,
    pub conjecture: String,
    pub entailment: Entailment,
}

/// Whether socrates is mortal.
pub fn socrates(config: &Config) -> Result<Syllogism, ErrorKind> {
    let script = Script::parse(SYLLOGISM)?;
    let conjecture = script.formula(SYLLOGISM_CONJECTURE)?;
    let premises = script.assertions.iter().map(|p| p.to_string()).collect();

    let mut solver = Solver::from_script(script, config.clone());
    let entailment = solver.entails(conjecture.clone())?;

    Ok(Syllogism {
        premises,
        conjecture: conjecture.to_string(),
        entailment,
    })
}

impl std::fmt::Display for Syllogism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for premise in &self.premises {
            writeln!(f, "Premise:    {premise}")?;
        }
        writeln!(f, "Conjecture: {}", self.conjecture)?;
        match &self.entailment {
            Entailment::Valid => write!(f, "The inference is valid: socrates is mortal"),
            Entailment::Invalid(model) => write!(f, "The inference is invalid, as in {model}"),
            Entailment::Unknown => write!(f, "The inference is undetermined"),
        }
    }
}

pub const ARITHMETIC: &str = "x, y = Ints('x y')
x + y == 10
x > y
x > 0
y > 0";

/// A solution to the [arithmetic](ARITHMETIC) constraints, if one was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Arithmetic {
    pub result: CheckResult,
    pub x: Option<i64>,
    pub y: Option<i64>,
}

/// Solves the [arithmetic](ARITHMETIC) constraints.
pub fn arithmetic(config: &Config) -> Result<Arithmetic, ErrorKind> {
    let mut solver = Solver::from_script(Script::parse(ARITHMETIC)?, config.clone());
    let result = solver.check()?;

    let value_of = |name: &str| match solver.model().ok()?.get(name) {
        Some(Value::Int(value)) => Some(*value),
        _ => None,
    };

    Ok(Arithmetic {
        result,
        x: value_of("x"),
        y: value_of("y"),
    })
}

impl std::fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.x, self.y) {
            (Some(x), Some(y)) => write!(f, "Solution found: x = {x}, y = {y}"),
            _ => write!(f, "No solution found ({})", self.result),
        }
    }
}

#[cfg(test)]
mod first_order_lab_tests {
    use super::*;

    #[test]
    fn quantifier_defaults_are_sat() {
        for kind in [
            Quantifier::Universal,
            Quantifier::Existential,
            Quantifier::Combined,
        ] {
            let analysis = analyse_quantified(kind, None, &Config::default()).unwrap();
            assert_eq!(analysis.result, CheckResult::Sat);
            assert!(analysis.model.is_some());
        }
    }

    #[test]
    fn quantifier_text_is_read() {
        let analysis = analyse_quantified(
            Quantifier::Universal,
            Some("And(ForAll([x], P(x)), Exists([y], Not(P(y))))"),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(analysis.result, CheckResult::Unsat);
        assert!(analysis
            .to_string()
            .ends_with("The formula is inconsistent or undetermined."));

        assert!(analyse_quantified(Quantifier::Universal, Some("R(x)"), &Config::default()).is_err());
    }

    #[test]
    fn problems() {
        let config = Config::default();
        let contradiction = solve_problem(Problem::Contradiction.formula(), &config).unwrap();
        assert_eq!(contradiction.result, CheckResult::Unsat);
        assert!(contradiction.model.is_none());

        let tautology = solve_problem(Problem::Tautology.formula(), &config).unwrap();
        assert_eq!(tautology.result, CheckResult::Sat);

        let custom = solve_problem("solver.add(Xor(P, Q), Not(Q))", &config).unwrap();
        assert_eq!(custom.expression, "Xor(P, Q), Not(Q)");
        let model = custom.model.as_ref().unwrap();
        assert_eq!(model.get("P"), Some(&Value::Bool(true)));
        assert_eq!(model.get("Q"), Some(&Value::Bool(false)));

        assert!(solve_problem("__import__('os')", &config).is_err());
    }

    #[test]
    fn syllogism() {
        let syllogism = socrates(&Config::default()).unwrap();
        assert_eq!(syllogism.entailment, Entailment::Valid);
        assert_eq!(syllogism.conjecture, "mortal(socrates)");
    }

    #[test]
    fn integers() {
        let solution = arithmetic(&Config::default()).unwrap();
        let (x, y) = (solution.x.unwrap(), solution.y.unwrap());
        assert_eq!(x + y, 10);
        assert!(x > y && y > 0);
    }
}
