/*!
Models of first-order formulas.

A model has, for each uninterpreted sort, a finite universe of elements `Sort!val!0`, `Sort!val!1`, …, together with a value for each constant and a table for each function.
A table lists the arguments on which the function differs from its `else` value.

Models are displayed as an SMT solver displays models, and serialise to a JSON object from names to values, with integers as numbers and any other value as a string.

```rust
# use otter_logic::config::Config;
# use otter_logic::first_order::{CheckResult, Script, Solver};
let script = Script::parse("x, y = Ints('x y')\nx + y == 10\nx > y\ny > 3").unwrap();
let mut solver = Solver::from_script(script, Config::default());

assert_eq!(solver.check(), Ok(CheckResult::Sat));
let model = solver.model().unwrap();
assert_eq!(model.to_string(), "[x = 6, y = 4]");
assert_eq!(serde_json::to_string(model).unwrap(), r#"{"x":6,"y":4}"#);
```
*/

use std::collections::BTreeMap;

use serde::ser::SerializeMap;

use crate::{
    first_order::{Formula, Sort, Term},
    types::err::{ErrorKind, FirstOrderError},
};

/// A value of some sort.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),

    /// An element of the universe of an uninterpreted sort, by index.
    Element { sort: String, index: usize },
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Element { sort, index } => write!(f, "{sort}!val!{index}"),
        }
    }
}

/// The interpretation of a function of positive arity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionTable {
    /// Arguments paired with the value of the function on the arguments, for each value other than the `else` value.
    pub entries: Vec<(Vec<Value>, Value)>,

    /// The value on any arguments without an entry.
    pub otherwise: Value,
}

impl FunctionTable {
    /// A table from the value on each argument tuple, with the most frequent value as the `else` value.
    pub fn from_rows(rows: Vec<(Vec<Value>, Value)>) -> Option<FunctionTable> {
        let mut counts: Vec<(&Value, usize)> = Vec::default();
        for (_, value) in &rows {
            match counts.iter_mut().find(|(seen, _)| *seen == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value, 1)),
            }
        }
        let mut otherwise = counts.first()?.clone();
        for candidate in &counts {
            if candidate.1 > otherwise.1 {
                otherwise = *candidate;
            }
        }
        let otherwise = otherwise.0.clone();

        let entries = rows
            .into_iter()
            .filter(|(_, value)| *value != otherwise)
            .collect();
        Some(FunctionTable { entries, otherwise })
    }

    pub fn apply(&self, args: &[Value]) -> Value {
        self.entries
            .iter()
            .find(|(arguments, _)| arguments.as_slice() == args)
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| self.otherwise.clone())
    }
}

impl std::fmt::Display for FunctionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (args, value) in &self.entries {
            match args.as_slice() {
                [single] => write!(f, "{single} -> {value}, ")?,
                _ => {
                    write!(f, "(")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ") -> {value}, ")?;
                }
            }
        }
        write!(f, "else -> {}]", self.otherwise)
    }
}

/// A model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    /// The size of the universe of each uninterpreted sort, by name.
    pub universes: BTreeMap<String, usize>,

    pub constants: BTreeMap<String, Value>,

    pub functions: BTreeMap<String, FunctionTable>,
}

impl Model {
    /// The value of the constant `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// The elements of the universe of `sort`.
    pub fn universe(&self, sort: &str) -> Vec<Value> {
        let size = self.universes.get(sort).copied().unwrap_or(0);
        (0..size)
            .map(|index| Value::Element {
                sort: sort.to_string(),
                index,
            })
            .collect()
    }

    /// Each constant and function paired with the display of its value, ordered by name.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = self
            .constants
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .chain(
                self.functions
                    .iter()
                    .map(|(name, table)| (name.clone(), table.to_string())),
            )
            .collect::<Vec<_>>();
        entries.sort();
        entries
    }

    /// The truth value of `formula` in the model.
    pub fn evaluate(&self, formula: &Formula) -> Result<bool, ErrorKind> {
        let mut env = Vec::default();
        self.formula(formula, &mut env)
    }

    /// The value of `term` in the model.
    pub fn evaluate_term(&self, term: &Term) -> Result<Value, ErrorKind> {
        let mut env = Vec::default();
        self.term(term, &mut env)
    }

    fn formula(&self, formula: &Formula, env: &mut Vec<(String, Value)>) -> Result<bool, ErrorKind> {
        let value = match formula {
            Formula::True => true,
            Formula::False => false,

            Formula::Predicate(name, args) => match self.apply(name, args, env)? {
                Value::Bool(value) => value,
                other => return Err(evaluation(format!("{name} has value {other}, not a truth value"))),
            },

            Formula::BoolVar(name) => match lookup(env, name)? {
                Value::Bool(value) => value,
                other => return Err(evaluation(format!("{name} has value {other}, not a truth value"))),
            },

            Formula::Not(inner) => !self.formula(inner, env)?,

            Formula::And(args) => {
                for arg in args {
                    if !self.formula(arg, env)? {
                        return Ok(false);
                    }
                }
                true
            }

            Formula::Or(args) => {
                for arg in args {
                    if self.formula(arg, env)? {
                        return Ok(true);
                    }
                }
                false
            }

            Formula::Xor(a, b) => self.formula(a, env)? != self.formula(b, env)?,
            Formula::Implies(a, b) => !self.formula(a, env)? || self.formula(b, env)?,
            Formula::Iff(a, b) => self.formula(a, env)? == self.formula(b, env)?,

            Formula::Ite(condition, then, otherwise) => match self.formula(condition, env)? {
                true => self.formula(then, env)?,
                false => self.formula(otherwise, env)?,
            },

            Formula::Eq(a, b) => self.term(a, env)? == self.term(b, env)?,

            Formula::Distinct(args) => {
                let values = args
                    .iter()
                    .map(|arg| self.term(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                values
                    .iter()
                    .enumerate()
                    .all(|(index, value)| !values[index + 1..].contains(value))
            }

            Formula::Compare(relation, a, b) => {
                let a = self.int(a, env)?;
                let b = self.int(b, env)?;
                relation.holds(a, b)
            }

            Formula::ForAll(bindings, body) | Formula::Exists(bindings, body) => {
                let universal = matches!(formula, Formula::ForAll(..));
                let mut domains = Vec::with_capacity(bindings.len());
                for (variable, sort) in bindings {
                    let domain = match sort {
                        Sort::Bool => vec![Value::Bool(false), Value::Bool(true)],
                        Sort::Uninterpreted(name) => self.universe(name),
                        Sort::Int => {
                            return Err(evaluation(format!(
                                "the variable {variable} ranges over the infinite sort Int"
                            )))
                        }
                    };
                    domains.push(domain);
                }
                self.quantify(bindings, &domains, body, env, universal)?
            }
        };
        Ok(value)
    }

    /// Evaluates `body` on each assignment of the variables of `bindings` to values of `domains`.
    fn quantify(
        &self,
        bindings: &[(String, Sort)],
        domains: &[Vec<Value>],
        body: &Formula,
        env: &mut Vec<(String, Value)>,
        universal: bool,
    ) -> Result<bool, ErrorKind> {
        let Some(((variable, _), rest)) = bindings.split_first() else {
            return self.formula(body, env);
        };
        for value in &domains[0] {
            env.push((variable.clone(), value.clone()));
            let result = self.quantify(rest, &domains[1..], body, env, universal);
            env.pop();
            if result? != universal {
                return Ok(!universal);
            }
        }
        Ok(universal)
    }

    fn term(&self, term: &Term, env: &mut Vec<(String, Value)>) -> Result<Value, ErrorKind> {
        let overflow = || evaluation(format!("overflow evaluating {term}"));
        match term {
            Term::Var(name, _) => lookup(env, name),
            Term::Apply(name, args) => self.apply(name, args, env),
            Term::Int(value) => Ok(Value::Int(*value)),
            Term::Neg(inner) => Ok(Value::Int(self.int(inner, env)?.checked_neg().ok_or_else(overflow)?)),
            Term::Add(a, b) => {
                let sum = self.int(a, env)?.checked_add(self.int(b, env)?);
                Ok(Value::Int(sum.ok_or_else(overflow)?))
            }
            Term::Sub(a, b) => {
                let difference = self.int(a, env)?.checked_sub(self.int(b, env)?);
                Ok(Value::Int(difference.ok_or_else(overflow)?))
            }
            Term::Mul(a, b) => {
                let product = self.int(a, env)?.checked_mul(self.int(b, env)?);
                Ok(Value::Int(product.ok_or_else(overflow)?))
            }
            Term::Ite(condition, then, otherwise) => match self.formula(condition, env)? {
                true => self.term(then, env),
                false => self.term(otherwise, env),
            },
        }
    }

    fn int(&self, term: &Term, env: &mut Vec<(String, Value)>) -> Result<i64, ErrorKind> {
        match self.term(term, env)? {
            Value::Int(value) => Ok(value),
            other => Err(evaluation(format!("{term} has value {other}, not an integer"))),
        }
    }

    fn apply(&self, name: &str, args: &[Term], env: &mut Vec<(String, Value)>) -> Result<Value, ErrorKind> {
        if args.is_empty() {
            return match self.constants.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(evaluation(format!("{name} has no interpretation"))),
            };
        }
        let values = args
            .iter()
            .map(|arg| self.term(arg, env))
            .collect::<Result<Vec<_>, _>>()?;
        match self.functions.get(name) {
            Some(table) => Ok(table.apply(&values)),
            None => Err(evaluation(format!("{name} has no interpretation"))),
        }
    }
}

fn evaluation(message: String) -> ErrorKind {
    ErrorKind::from(FirstOrderError::Evaluation(message))
}

fn lookup(env: &[(String, Value)], name: &str) -> Result<Value, ErrorKind> {
    env.iter()
        .rev()
        .find(|(variable, _)| variable == name)
        .map(|(_, value)| value.clone())
        .ok_or_else(|| evaluation(format!("the variable {name} is not bound")))
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, (name, value)) in self.entries().iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        write!(f, "]")
    }
}

impl serde::Serialize for Model {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.constants.len() + self.functions.len()))?;
        let mut names = self
            .constants
            .keys()
            .chain(self.functions.keys())
            .collect::<Vec<_>>();
        names.sort();

        for name in names {
            match (self.constants.get(name), self.functions.get(name)) {
                (Some(Value::Int(value)), _) => map.serialize_entry(name, value)?,
                (Some(value), _) => map.serialize_entry(name, &value.to_string())?,
                (None, Some(table)) => map.serialize_entry(name, &table.to_string())?,
                (None, None) => {}
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    fn element(index: usize) -> Value {
        Value::Element {
            sort: "H".to_string(),
            index,
        }
    }

    #[test]
    fn tables() {
        let table = FunctionTable::from_rows(vec![
            (vec![element(0)], Value::Bool(true)),
            (vec![element(1)], Value::Bool(false)),
            (vec![element(2)], Value::Bool(false)),
        ])
        .unwrap();
        assert_eq!(table.to_string(), "[H!val!0 -> True, else -> False]");
        assert_eq!(table.apply(&[element(0)]), Value::Bool(true));
        assert_eq!(table.apply(&[element(2)]), Value::Bool(false));

        let constant = FunctionTable::from_rows(vec![(vec![element(0)], Value::Int(3))]).unwrap();
        assert_eq!(constant.to_string(), "[else -> 3]");
        assert!(FunctionTable::from_rows(Vec::default()).is_none());
    }

    #[test]
    fn evaluation_and_display() {
        let mut model = Model::default();
        model.universes.insert("H".to_string(), 2);
        model.constants.insert("a".to_string(), element(1));
        model.constants.insert("n".to_string(), Value::Int(-2));
        model.functions.insert(
            "P".to_string(),
            FunctionTable::from_rows(vec![
                (vec![element(0)], Value::Bool(false)),
                (vec![element(1)], Value::Bool(true)),
            ])
            .unwrap(),
        );

        let h = Sort::Uninterpreted("H".to_string());
        let x = Term::Var("x".to_string(), h.clone());
        let p = |t: Term| Formula::Predicate("P".to_string(), vec![t]);
        let a = Term::Apply("a".to_string(), vec![]);

        assert_eq!(model.evaluate(&p(a.clone())), Ok(true));
        let some = Formula::Exists(vec![("x".to_string(), h.clone())], Box::new(p(x.clone())));
        assert_eq!(model.evaluate(&some), Ok(true));
        let all = Formula::ForAll(vec![("x".to_string(), h)], Box::new(p(x)));
        assert_eq!(model.evaluate(&all), Ok(false));

        let n = Term::Apply("n".to_string(), vec![]);
        let doubled = Term::Mul(Box::new(n), Box::new(Term::Int(2)));
        assert_eq!(model.evaluate_term(&doubled), Ok(Value::Int(-4)));

        assert_eq!(
            model.to_string(),
            "[P = [H!val!1 -> True, else -> False], a = H!val!1, n = -2]"
        );
        assert_eq!(
            serde_json::to_string(&model).unwrap(),
            r#"{"P":"[H!val!1 -> True, else -> False]","a":"H!val!1","n":-2}"#
        );
    }
}
