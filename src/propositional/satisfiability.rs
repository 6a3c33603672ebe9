/*!
Satisfiability of propositional formulas, by Tseitin encoding onto a [Context].

Each subformula is encoded as a literal equivalent to the subformula, and the literal of the whole formula is asserted.
As each gate is defined by an equivalence, the value of each gate atom is fixed by the values of the atoms of the formula.
So, a blocking clause over the atoms of the formula excludes exactly one model, and models may be enumerated by repeated solves of the same context.

```rust
# use otter_logic::config::Config;
# use otter_logic::propositional::{parse, satisfiable, all_models};
let config = Config::default();
let formula = parse("(P >> Q) & P").unwrap();

let model = satisfiable(&formula, &config).unwrap().unwrap();
assert_eq!(model.to_string(), "{P: True, Q: True}");

let contradiction = parse("P & ~P").unwrap();
assert!(satisfiable(&contradiction, &config).unwrap().is_none());

let excluded_middle = parse("P | ~P | Q").unwrap();
assert_eq!(all_models(&excluded_middle, 8, &config).unwrap().len(), 1);
```
*/

use std::collections::BTreeMap;

use crate::{
    config::Config,
    context::{Context, GenericContext},
    misc::log::targets::{self},
    propositional::Expr,
    reports::Report,
    structures::literal::{CLiteral, Literal},
    types::err::{ErrorKind, TransformError},
};

/// An assignment of values to named atoms.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<String, bool>);

impl Assignment {
    /// The value of the atom `name`, if assigned.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &bool)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The assignment as a map from names to values.
    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.0
    }
}

impl From<BTreeMap<String, bool>> for Assignment {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Assignment(map)
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match value {
                true => write!(f, "{name}: True")?,
                false => write!(f, "{name}: False")?,
            }
        }
        write!(f, "}}")
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A literal equivalent to `expr`, with atoms of the context named by the atoms of `expr`.
    pub fn encode_expr(&mut self, expr: &Expr) -> Result<CLiteral, ErrorKind> {
        match expr {
            Expr::True => Ok(CLiteral::TOP),
            Expr::False => Ok(CLiteral::BOTTOM),
            Expr::Atom(name) => Ok(CLiteral::new(self.atom_named(name)?, true)),
            Expr::Not(inner) => Ok(-self.encode_expr(inner)?),

            Expr::And(args) => {
                let literals = self.encode_all(args)?;
                self.and_gate(&literals)
            }

            Expr::Or(args) => {
                let literals = self.encode_all(args)?;
                self.or_gate(&literals)
            }

            Expr::Xor(args) => {
                let literals = self.encode_all(args)?;
                self.parity_gate(&literals)
            }

            Expr::Implies(antecedent, consequent) => {
                let a = self.encode_expr(antecedent)?;
                let c = self.encode_expr(consequent)?;
                self.implies_gate(a, c)
            }

            Expr::Equivalent(args) => {
                let literals = self.encode_all(args)?;
                let Some((first, rest)) = literals.split_first() else {
                    return Ok(CLiteral::TOP);
                };
                let mut equalities = Vec::with_capacity(rest.len());
                for other in rest {
                    equalities.push(self.iff_gate(*first, *other)?);
                }
                self.and_gate(&equalities)
            }

            Expr::Ite(condition, then, otherwise) => {
                let c = self.encode_expr(condition)?;
                let t = self.encode_expr(then)?;
                let e = self.encode_expr(otherwise)?;
                self.ite_gate(c, t, e)
            }
        }
    }

    fn encode_all(&mut self, args: &[Expr]) -> Result<Vec<CLiteral>, ErrorKind> {
        args.iter().map(|arg| self.encode_expr(arg)).collect()
    }

    /// The assignment to the named atoms `names` on the current valuation.
    ///
    /// An atom without a value is read as false.
    fn assignment_of<'n>(&self, names: impl Iterator<Item = &'n String>) -> Assignment {
        let map = names
            .map(|name| {
                let value = self
                    .atom_db
                    .atom_of(name)
                    .and_then(|atom| self.value_of(atom))
                    .unwrap_or(false);
                (name.clone(), value)
            })
            .collect::<BTreeMap<_, _>>();
        Assignment(map)
    }
}

/// A context with `expr` asserted.
fn context_asserting(expr: &Expr, config: &Config) -> Result<Context, ErrorKind> {
    let mut the_context = Context::from_config(config.clone());
    let literal = the_context.encode_expr(expr)?;
    the_context.assert_literal(literal)?;
    log::trace!(target: targets::TRANSFORM, "Encoded {expr} with {} atoms", the_context.atom_count());
    Ok(the_context)
}

/// Solves `the_context`, with an unknown result as an error.
fn decided_solve(the_context: &mut Context) -> Result<bool, ErrorKind> {
    match the_context.solve()? {
        Report::Satisfiable => Ok(true),
        Report::Unsatisfiable => Ok(false),
        Report::Unknown => Err(ErrorKind::from(TransformError::Undetermined)),
    }
}

/// An assignment to the atoms of `expr` on which `expr` is true, if some such assignment exists.
pub fn satisfiable(expr: &Expr, config: &Config) -> Result<Option<Assignment>, ErrorKind> {
    let mut the_context = context_asserting(expr, config)?;
    match decided_solve(&mut the_context)? {
        true => Ok(Some(the_context.assignment_of(expr.atoms().iter()))),
        false => Ok(None),
    }
}

/// Up to `limit` distinct assignments to the atoms of `expr` on which `expr` is true.
pub fn all_models(expr: &Expr, limit: usize, config: &Config) -> Result<Vec<Assignment>, ErrorKind> {
    let atoms = expr.atoms();
    let mut the_context = context_asserting(expr, config)?;
    let mut models = Vec::default();

    while models.len() < limit && decided_solve(&mut the_context)? {
        let model = the_context.assignment_of(atoms.iter());

        let mut blocking_clause = Vec::with_capacity(model.len());
        for (name, value) in model.iter() {
            let atom = the_context.atom_named(name)?;
            blocking_clause.push(CLiteral::new(atom, !value));
        }
        models.push(model);
        the_context.assert_clause(blocking_clause)?;
    }

    log::debug!(target: targets::TRANSFORM, "Found {} models of {expr}", models.len());
    Ok(models)
}

/// Whether `expr` is true on every assignment.
pub fn is_tautology(expr: &Expr, config: &Config) -> Result<bool, ErrorKind> {
    Ok(satisfiable(&Expr::not(expr.clone()), config)?.is_none())
}

/// Whether `conclusion` is true on every assignment on which each of `premises` is true.
pub fn entails(premises: &[Expr], conclusion: &Expr, config: &Config) -> Result<bool, ErrorKind> {
    let mut formulas = premises.to_vec();
    formulas.push(Expr::not(conclusion.clone()));
    Ok(satisfiable(&Expr::and(formulas), config)?.is_none())
}

/// Whether `a` and `b` have the same value on every assignment.
pub fn equivalent(a: &Expr, b: &Expr, config: &Config) -> Result<bool, ErrorKind> {
    Ok(satisfiable(&Expr::xor(vec![a.clone(), b.clone()]), config)?.is_none())
}

#[cfg(test)]
mod satisfiability_tests {
    use crate::propositional::parse;

    use super::*;

    #[test]
    fn models_satisfy() {
        let config = Config::default();
        for text in [
            "P & Q",
            "P | Q",
            "P >> Q",
            "~(P & Q)",
            "(P >> Q) & (Q >> R)",
            "P ^ Q ^ R",
            "Equivalent(P, Q, R) & ~R",
            "ITE(P, Q, ~Q) & ~Q",
        ] {
            let formula = parse(text).unwrap();
            let model = satisfiable(&formula, &config).unwrap().unwrap();
            assert!(formula.evaluate_on(model.as_map()), "{text} with {model}");
        }
    }

    #[test]
    fn contradictions() {
        let config = Config::default();
        for text in ["P & ~P", "(P >> Q) & P & ~Q", "(P ^ Q) & Equivalent(P, Q)"] {
            assert_eq!(satisfiable(&parse(text).unwrap(), &config), Ok(None), "{text}");
        }
    }

    #[test]
    fn model_counts() {
        let config = Config::default();
        let cases = [("P | Q", 3), ("P ^ Q", 2), ("(P >> Q) & (Q >> R)", 4), ("P | ~Q | Q | R", 1)];
        for (text, count) in cases {
            let models = all_models(&parse(text).unwrap(), 64, &config).unwrap();
            assert_eq!(models.len(), count, "{text}");
        }

        let tautology = parse("(P & Q) | ~P | ~Q | (R & ~R)").unwrap();
        assert!(is_tautology(&tautology, &config).unwrap());
        assert_eq!(all_models(&parse("P | Q | R").unwrap(), 3, &config).unwrap().len(), 3);
    }

    #[test]
    fn entailment_and_equivalence() {
        let config = Config::default();
        let p_implies_q = parse("P >> Q").unwrap();
        let p = parse("P").unwrap();
        let q = parse("Q").unwrap();

        assert!(entails(&[p_implies_q.clone(), p.clone()], &q, &config).unwrap());
        assert!(!entails(&[p_implies_q.clone(), q.clone()], &p, &config).unwrap());
        assert!(equivalent(&p_implies_q, &parse("~P | Q").unwrap(), &config).unwrap());
        assert!(!equivalent(&p_implies_q, &parse("Q >> P").unwrap(), &config).unwrap());
    }

    #[test]
    fn assignment_display() {
        let assignment = Assignment::from(BTreeMap::from([
            ("Q".to_string(), false),
            ("P".to_string(), true),
        ]));
        assert_eq!(assignment.to_string(), "{P: True, Q: False}");
        assert_eq!(serde_json::to_string(&assignment).unwrap(), r#"{"P":true,"Q":false}"#);
    }
}
