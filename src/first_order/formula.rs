/*!
First-order terms and formulas.

Terms denote elements of a sort other than [Bool](Sort::Bool), and formulas denote truth values.
A symbol with range Bool is applied as a [predicate](Formula::Predicate), and any other symbol is applied as a [term](Term::Apply).

Terms and formulas are displayed as an SMT solver displays its expressions, e.g.

```rust
# use otter_logic::first_order::{Formula, Term, Sort};
let human = Sort::Uninterpreted("Human".to_string());
let x = Term::Var("x".to_string(), human.clone());
let formula = Formula::ForAll(
    vec![("x".to_string(), human)],
    Box::new(Formula::Implies(
        Box::new(Formula::Predicate("human".to_string(), vec![x.clone()])),
        Box::new(Formula::Predicate("mortal".to_string(), vec![x])),
    )),
);

assert_eq!(formula.to_string(), "ForAll(x, Implies(human(x), mortal(x)))");
```
*/

use std::collections::BTreeSet;

use crate::first_order::{Signature, Sort};

/// A variable bound by a quantifier, with its sort.
pub type Binding = (String, Sort);

/// A term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A variable bound by some quantifier.
    Var(String, Sort),

    /// A symbol applied to arguments, or a constant if there are no arguments.
    Apply(String, Vec<Term>),

    Int(i64),

    Neg(Box<Term>),

    Add(Box<Term>, Box<Term>),

    Sub(Box<Term>, Box<Term>),

    Mul(Box<Term>, Box<Term>),

    /// A conditional term.
    Ite(Box<Formula>, Box<Term>, Box<Term>),
}

/// An ordering relation on integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    pub fn holds(&self, a: i64, b: i64) -> bool {
        match self {
            Relation::Lt => a < b,
            Relation::Le => a <= b,
            Relation::Gt => a > b,
            Relation::Ge => a >= b,
        }
    }
}

/// A formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    True,
    False,

    /// A symbol with range Bool applied to arguments, or a Boolean constant if there are no arguments.
    Predicate(String, Vec<Term>),

    /// A variable of sort Bool bound by some quantifier.
    BoolVar(String),

    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Xor(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),

    /// Equality of formulas.
    Iff(Box<Formula>, Box<Formula>),

    Ite(Box<Formula>, Box<Formula>, Box<Formula>),

    /// Equality of terms.
    Eq(Term, Term),

    /// Pairwise distinction of terms.
    Distinct(Vec<Term>),

    Compare(Relation, Term, Term),

    ForAll(Vec<Binding>, Box<Formula>),
    Exists(Vec<Binding>, Box<Formula>),
}

impl Term {
    /// The sort of the term, if each symbol of the term is declared.
    pub fn sort(&self, signature: &Signature) -> Option<Sort> {
        match self {
            Term::Var(_, sort) => Some(sort.clone()),
            Term::Apply(name, _) => signature.declaration(name).map(|d| d.range.clone()),
            Term::Int(_) | Term::Neg(_) | Term::Add(..) | Term::Sub(..) | Term::Mul(..) => {
                Some(Sort::Int)
            }
            Term::Ite(_, then, _) => then.sort(signature),
        }
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            Term::Var(..) | Term::Int(_) => {}
            Term::Apply(name, args) => {
                symbols.insert(name.clone());
                args.iter().for_each(|arg| arg.collect_symbols(symbols));
            }
            Term::Neg(inner) => inner.collect_symbols(symbols),
            Term::Add(a, b) | Term::Sub(a, b) | Term::Mul(a, b) => {
                a.collect_symbols(symbols);
                b.collect_symbols(symbols);
            }
            Term::Ite(condition, then, otherwise) => {
                condition.collect_symbols(symbols);
                then.collect_symbols(symbols);
                otherwise.collect_symbols(symbols);
            }
        }
    }

    /// Binding strength, for parenthesising arithmetic.
    fn precedence(&self) -> u8 {
        match self {
            Term::Add(..) | Term::Sub(..) => 1,
            Term::Mul(..) => 2,
            Term::Neg(_) => 3,
            Term::Int(value) if *value < 0 => 3,
            _ => 4,
        }
    }

    fn write_operand(&self, f: &mut std::fmt::Formatter<'_>, least: u8) -> std::fmt::Result {
        match self.precedence() < least {
            true => write!(f, "({self})"),
            false => write!(f, "{self}"),
        }
    }
}

impl Formula {
    /// The symbols which occur in the formula, by name.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::default();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        match self {
            Formula::True | Formula::False | Formula::BoolVar(_) => {}
            Formula::Predicate(name, args) => {
                symbols.insert(name.clone());
                args.iter().for_each(|arg| arg.collect_symbols(symbols));
            }
            Formula::Not(inner) | Formula::ForAll(_, inner) | Formula::Exists(_, inner) => {
                inner.collect_symbols(symbols)
            }
            Formula::And(args) | Formula::Or(args) => {
                args.iter().for_each(|arg| arg.collect_symbols(symbols))
            }
            Formula::Xor(a, b) | Formula::Implies(a, b) | Formula::Iff(a, b) => {
                a.collect_symbols(symbols);
                b.collect_symbols(symbols);
            }
            Formula::Ite(condition, then, otherwise) => {
                condition.collect_symbols(symbols);
                then.collect_symbols(symbols);
                otherwise.collect_symbols(symbols);
            }
            Formula::Eq(a, b) | Formula::Compare(_, a, b) => {
                a.collect_symbols(symbols);
                b.collect_symbols(symbols);
            }
            Formula::Distinct(args) => args.iter().for_each(|arg| arg.collect_symbols(symbols)),
        }
    }

    /// The negation of the formula, with double negation removed.
    pub fn negate(self) -> Formula {
        match self {
            Formula::True => Formula::False,
            Formula::False => Formula::True,
            Formula::Not(inner) => *inner,
            other => Formula::Not(Box::new(other)),
        }
    }
}

fn write_list<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_application<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    args: &[T],
) -> std::fmt::Result {
    write!(f, "{name}(")?;
    write_list(f, args)?;
    write!(f, ")")
}

fn write_quantifier(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    bindings: &[Binding],
    body: &Formula,
) -> std::fmt::Result {
    write!(f, "{name}(")?;
    match bindings {
        [(variable, _)] => write!(f, "{variable}")?,
        _ => {
            let names = bindings.iter().map(|(name, _)| name).collect::<Vec<_>>();
            write!(f, "[")?;
            write_list(f, &names)?;
            write!(f, "]")?;
        }
    }
    write!(f, ", {body})")
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name, _) => write!(f, "{name}"),
            Term::Apply(name, args) if args.is_empty() => write!(f, "{name}"),
            Term::Apply(name, args) => write_application(f, name, args),
            Term::Int(value) => write!(f, "{value}"),
            Term::Neg(inner) => {
                write!(f, "-")?;
                inner.write_operand(f, 4)
            }
            Term::Add(a, b) => {
                a.write_operand(f, 1)?;
                write!(f, " + ")?;
                b.write_operand(f, 2)
            }
            Term::Sub(a, b) => {
                a.write_operand(f, 1)?;
                write!(f, " - ")?;
                b.write_operand(f, 2)
            }
            Term::Mul(a, b) => {
                a.write_operand(f, 2)?;
                write!(f, "*")?;
                b.write_operand(f, 3)
            }
            Term::Ite(condition, then, otherwise) => {
                write!(f, "If({condition}, {then}, {otherwise})")
            }
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::True => write!(f, "True"),
            Formula::False => write!(f, "False"),
            Formula::Predicate(name, args) if args.is_empty() => write!(f, "{name}"),
            Formula::Predicate(name, args) => write_application(f, name, args),
            Formula::BoolVar(name) => write!(f, "{name}"),
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Eq(a, b) => write!(f, "{a} != {b}"),
                _ => write!(f, "Not({inner})"),
            },
            Formula::And(args) => write_application(f, "And", args),
            Formula::Or(args) => write_application(f, "Or", args),
            Formula::Xor(a, b) => write!(f, "Xor({a}, {b})"),
            Formula::Implies(a, b) => write!(f, "Implies({a}, {b})"),
            Formula::Iff(a, b) => write!(f, "{a} == {b}"),
            Formula::Ite(c, a, b) => write!(f, "If({c}, {a}, {b})"),
            Formula::Eq(a, b) => write!(f, "{a} == {b}"),
            Formula::Distinct(args) => write_application(f, "Distinct", args),
            Formula::Compare(relation, a, b) => {
                let symbol = match relation {
                    Relation::Lt => "<",
                    Relation::Le => "<=",
                    Relation::Gt => ">",
                    Relation::Ge => ">=",
                };
                write!(f, "{a} {symbol} {b}")
            }
            Formula::ForAll(bindings, body) => write_quantifier(f, "ForAll", bindings, body),
            Formula::Exists(bindings, body) => write_quantifier(f, "Exists", bindings, body),
        }
    }
}

#[cfg(test)]
mod formula_tests {
    use super::*;

    fn int(name: &str) -> Term {
        Term::Apply(name.to_string(), vec![])
    }

    #[test]
    fn arithmetic_display() {
        let x = int("x");
        let y = int("y");
        let sum = Term::Add(Box::new(x.clone()), Box::new(y.clone()));
        assert_eq!(sum.to_string(), "x + y");

        let product = Term::Mul(Box::new(sum.clone()), Box::new(Term::Int(2)));
        assert_eq!(product.to_string(), "(x + y)*2");

        let difference = Term::Sub(Box::new(x.clone()), Box::new(sum));
        assert_eq!(difference.to_string(), "x - (x + y)");

        let negation = Term::Neg(Box::new(Term::Int(-3)));
        assert_eq!(negation.to_string(), "-(-3)");

        let equation = Formula::Eq(
            Term::Add(Box::new(x.clone()), Box::new(y.clone())),
            Term::Int(10),
        );
        assert_eq!(equation.to_string(), "x + y == 10");
        assert_eq!(Formula::Compare(Relation::Gt, x, y).to_string(), "x > y");
    }

    #[test]
    fn quantifier_display() {
        let human = Sort::Uninterpreted("Human".to_string());
        let formula = Formula::Exists(
            vec![("x".to_string(), human.clone()), ("y".to_string(), human.clone())],
            Box::new(Formula::Not(Box::new(Formula::Eq(
                Term::Var("x".to_string(), human.clone()),
                Term::Var("y".to_string(), human),
            )))),
        );
        assert_eq!(formula.to_string(), "Exists([x, y], x != y)");
    }

    #[test]
    fn symbols_exclude_variables() {
        let human = Sort::Uninterpreted("Human".to_string());
        let formula = Formula::ForAll(
            vec![("x".to_string(), human.clone())],
            Box::new(Formula::Predicate(
                "P".to_string(),
                vec![Term::Var("x".to_string(), human)],
            )),
        );
        assert_eq!(formula.symbols(), BTreeSet::from(["P".to_string()]));
    }
}
