/*!
Transformations of propositional formulas to normal forms.

- [eliminate_implications] rewrites implications, equivalences, exclusive disjunctions, and conditionals to conjunction, disjunction, and negation.
- [to_nnf] pushes negation to atoms.
- [to_cnf] and [to_dnf] distribute disjunction over conjunction (or conversely), or minimise when asked to simplify.

Distribution may produce exponentially many clauses, and so is bounded by [Config::cnf_clause_limit](crate::config::Config::cnf_clause_limit).
Exceeding the bound is an error.

```rust
# use otter_logic::config::Config;
# use otter_logic::propositional::{parse, to_cnf, to_dnf};
let config = Config::default();
let formula = parse("(P >> Q) & (Q >> R)").unwrap();

let cnf = to_cnf(&formula, false, &config).unwrap();
assert_eq!(cnf.to_string(), "(Q | ~P) & (R | ~Q)");

let dnf = to_dnf(&formula, false, &config).unwrap();
assert_eq!(dnf.to_string(), "(Q & R) | (R & ~P) | (~P & ~Q)");
```
*/

use std::collections::BTreeSet;

use crate::{
    config::Config,
    misc::log::targets::{self},
    propositional::{
        simplify::{simplify_logic, NormalForm},
        Expr,
    },
    types::err::{ErrorKind, TransformError},
};

/// A formula equivalent to `expr` using only conjunction, disjunction, and negation.
pub fn eliminate_implications(expr: &Expr) -> Expr {
    match expr {
        Expr::True | Expr::False | Expr::Atom(_) => expr.clone(),

        Expr::Not(inner) => Expr::not(eliminate_implications(inner)),

        Expr::And(args) => Expr::and(args.iter().map(eliminate_implications).collect()),

        Expr::Or(args) => Expr::or(args.iter().map(eliminate_implications).collect()),

        Expr::Implies(a, b) => Expr::or(vec![
            Expr::not(eliminate_implications(a)),
            eliminate_implications(b),
        ]),

        // Each argument implies the next, cyclically.
        Expr::Equivalent(args) => {
            let args = args.iter().map(eliminate_implications).collect::<Vec<_>>();
            let clauses = (0..args.len())
                .map(|index| {
                    let next = &args[(index + 1) % args.len()];
                    Expr::or(vec![Expr::not(args[index].clone()), next.clone()])
                })
                .collect();
            Expr::and(clauses)
        }

        Expr::Xor(args) => {
            let args = args.iter().map(eliminate_implications).collect::<Vec<_>>();
            split_xor(&args)
        }

        Expr::Ite(c, t, e) => {
            let c = eliminate_implications(c);
            Expr::and(vec![
                Expr::or(vec![Expr::not(c.clone()), eliminate_implications(t)]),
                Expr::or(vec![c, eliminate_implications(e)]),
            ])
        }
    }
}

/// The exclusive disjunction of `args`, as the exclusive disjunction of each half.
///
/// Each half appears twice, so the formula grows quadratically with the count of arguments.
fn split_xor(args: &[Expr]) -> Expr {
    match args {
        [] => Expr::False,
        [only] => only.clone(),
        _ => {
            let (left, right) = args.split_at(args.len() / 2);
            let (a, b) = (split_xor(left), split_xor(right));
            Expr::and(vec![
                Expr::or(vec![a.clone(), b.clone()]),
                Expr::or(vec![Expr::not(a), Expr::not(b)]),
            ])
        }
    }
}

/// A formula equivalent to `expr` in negation normal form.
pub fn to_nnf(expr: &Expr) -> Expr {
    nnf(&eliminate_implications(expr), false)
}

/// Negation normal form of an implication free formula, negated if `negate`.
fn nnf(expr: &Expr, negate: bool) -> Expr {
    match expr {
        Expr::True | Expr::False | Expr::Atom(_) => match negate {
            true => Expr::not(expr.clone()),
            false => expr.clone(),
        },

        Expr::Not(inner) => nnf(inner, !negate),

        Expr::And(args) => {
            let args = args.iter().map(|arg| nnf(arg, negate)).collect();
            match negate {
                true => Expr::or(args),
                false => Expr::and(args),
            }
        }

        Expr::Or(args) => {
            let args = args.iter().map(|arg| nnf(arg, negate)).collect();
            match negate {
                true => Expr::and(args),
                false => Expr::or(args),
            }
        }

        other => nnf(&eliminate_implications(other), negate),
    }
}

/// A set of literals, as an atom paired with a polarity.
type Literals = BTreeSet<(String, bool)>;

/// The clauses (if `conjunctive`) or terms of an expression in negation normal form.
///
/// Tautological clauses (and contradictory terms) are dropped, as are duplicates.
fn distribute(
    expr: &Expr,
    conjunctive: bool,
    limit: usize,
) -> Result<BTreeSet<Literals>, TransformError> {
    let literal = |name: &str, polarity: bool| {
        BTreeSet::from([Literals::from([(name.to_string(), polarity)])])
    };

    match expr {
        Expr::True | Expr::False => {
            let value = *expr == Expr::True;
            // The empty set of clauses is true, and a set containing the empty clause is false.
            match value == conjunctive {
                true => Ok(BTreeSet::default()),
                false => Ok(BTreeSet::from([Literals::default()])),
            }
        }

        Expr::Atom(name) => Ok(literal(name, true)),

        Expr::Not(inner) => match inner.as_ref() {
            Expr::Atom(name) => Ok(literal(name, false)),
            _ => distribute(&nnf(expr, false), conjunctive, limit),
        },

        Expr::And(args) | Expr::Or(args) => {
            let joins = matches!(expr, Expr::And(_)) == conjunctive;

            match joins {
                // A union of the parts.
                true => {
                    let mut collected = BTreeSet::default();
                    for arg in args {
                        collected.extend(distribute(arg, conjunctive, limit)?);
                        if collected.len() > limit {
                            return Err(TransformError::Blowup { limit });
                        }
                    }
                    Ok(collected)
                }

                // A product of the parts.
                false => {
                    let mut product = BTreeSet::from([Literals::default()]);
                    for arg in args {
                        let part = distribute(arg, conjunctive, limit)?;
                        if product.len().saturating_mul(part.len()) > limit.saturating_mul(4) {
                            return Err(TransformError::Blowup { limit });
                        }

                        let mut next = BTreeSet::default();
                        for left in &product {
                            for right in &part {
                                let mut joined = left.clone();
                                joined.extend(right.iter().cloned());
                                if !is_complementary(&joined) {
                                    next.insert(joined);
                                }
                            }
                        }
                        if next.len() > limit {
                            return Err(TransformError::Blowup { limit });
                        }
                        product = next;
                    }
                    Ok(product)
                }
            }
        }

        other => distribute(&to_nnf(other), conjunctive, limit),
    }
}

/// True if `literals` contains some atom with both polarities.
fn is_complementary(literals: &Literals) -> bool {
    literals
        .iter()
        .any(|(name, polarity)| *polarity && literals.contains(&(name.clone(), false)))
}

/// A formula from clauses (if `conjunctive`) or terms.
fn rebuild(parts: BTreeSet<Literals>, conjunctive: bool) -> Expr {
    let parts = parts
        .into_iter()
        .map(|literals| {
            let literals = literals
                .into_iter()
                .map(|(name, polarity)| match polarity {
                    true => Expr::Atom(name),
                    false => Expr::not(Expr::Atom(name)),
                })
                .collect();
            match conjunctive {
                true => Expr::or(literals),
                false => Expr::and(literals),
            }
        })
        .collect();
    match conjunctive {
        true => Expr::and(parts),
        false => Expr::or(parts),
    }
}

/// A formula equivalent to `expr` in conjunctive normal form.
///
/// If `simplify`, the form is a minimal product of sums, and otherwise the form is given by distribution.
pub fn to_cnf(expr: &Expr, simplify: bool, config: &Config) -> Result<Expr, ErrorKind> {
    normal_form(expr, simplify, config, true)
}

/// A formula equivalent to `expr` in disjunctive normal form.
///
/// If `simplify`, the form is a minimal sum of products, and otherwise the form is given by distribution.
pub fn to_dnf(expr: &Expr, simplify: bool, config: &Config) -> Result<Expr, ErrorKind> {
    normal_form(expr, simplify, config, false)
}

fn normal_form(
    expr: &Expr,
    simplify: bool,
    config: &Config,
    conjunctive: bool,
) -> Result<Expr, ErrorKind> {
    let form = match conjunctive {
        true => NormalForm::Cnf,
        false => NormalForm::Dnf,
    };

    if simplify {
        let count = expr.atoms().len();
        let limit = config.simplify_atom_limit.value;
        if count > limit {
            return Err(ErrorKind::from(TransformError::TooManyAtoms { count, limit }));
        }
        return simplify_logic(expr, Some(form), true, config);
    }

    let in_form = match conjunctive {
        true => is_cnf(expr),
        false => is_dnf(expr),
    };
    if in_form {
        return Ok(expr.clone());
    }

    let limit = config.cnf_clause_limit.value;
    let parts = distribute(&to_nnf(expr), conjunctive, limit).map_err(|e| {
        log::debug!(target: targets::TRANSFORM, "Distribution of {expr} exceeded {limit}");
        e
    })?;
    Ok(rebuild(parts, conjunctive))
}

/// True if `expr` is in negation normal form.
pub fn is_nnf(expr: &Expr) -> bool {
    match expr {
        Expr::True | Expr::False | Expr::Atom(_) => true,
        Expr::Not(inner) => matches!(inner.as_ref(), Expr::Atom(_)),
        Expr::And(args) | Expr::Or(args) => args.iter().all(is_nnf),
        _ => false,
    }
}

/// True if `expr` is a conjunction of clauses.
pub fn is_cnf(expr: &Expr) -> bool {
    is_two_level(expr, true)
}

/// True if `expr` is a disjunction of terms.
pub fn is_dnf(expr: &Expr) -> bool {
    is_two_level(expr, false)
}

fn is_two_level(expr: &Expr, conjunctive: bool) -> bool {
    let is_part = |part: &Expr| match (part, conjunctive) {
        (Expr::Or(args), true) | (Expr::And(args), false) => args.iter().all(Expr::is_literal),
        (other, _) => other.is_literal(),
    };

    match (expr, conjunctive) {
        (Expr::True | Expr::False, _) => true,
        (Expr::And(args), true) | (Expr::Or(args), false) => args.iter().all(is_part),
        (other, _) => is_part(other),
    }
}

#[cfg(test)]
mod transform_tests {
    use crate::propositional::parse;

    use super::*;

    fn equivalent_by_table(a: &Expr, b: &Expr) -> bool {
        let atoms = a.atoms().union(&b.atoms()).cloned().collect::<Vec<_>>();
        (0..1_usize << atoms.len()).all(|row| {
            let value_of = |name: &str| {
                let index = atoms.iter().position(|atom| atom == name).unwrap_or(0);
                (row >> index) & 1 == 1
            };
            a.evaluate(&value_of) == b.evaluate(&value_of)
        })
    }

    fn node_count(expr: &Expr) -> usize {
        match expr {
            Expr::True | Expr::False | Expr::Atom(_) => 1,
            Expr::Not(inner) => 1 + node_count(inner),
            Expr::And(args) | Expr::Or(args) | Expr::Xor(args) | Expr::Equivalent(args) => {
                1 + args.iter().map(node_count).sum::<usize>()
            }
            Expr::Implies(a, b) => 1 + node_count(a) + node_count(b),
            Expr::Ite(c, t, e) => 1 + node_count(c) + node_count(t) + node_count(e),
        }
    }

    #[test]
    fn forms_are_equivalent() {
        let config = Config::default();
        for text in [
            "P & Q",
            "P >> Q",
            "~(P & Q)",
            "(P >> Q) & (Q >> R)",
            "Equivalent(P, Q, R)",
            "P ^ Q ^ R",
            "ITE(P, Q, ~R)",
            "~((P | Q) >> (R & ~P))",
        ] {
            let formula = parse(text).unwrap();

            let nnf = to_nnf(&formula);
            assert!(is_nnf(&nnf), "{text}");
            assert!(equivalent_by_table(&formula, &nnf), "{text}");

            let cnf = to_cnf(&formula, false, &config).unwrap();
            assert!(is_cnf(&cnf), "{text}: {cnf}");
            assert!(equivalent_by_table(&formula, &cnf), "{text}");

            let dnf = to_dnf(&formula, false, &config).unwrap();
            assert!(is_dnf(&dnf), "{text}: {dnf}");
            assert!(equivalent_by_table(&formula, &dnf), "{text}");
        }
    }

    #[test]
    fn implication_display() {
        let config = Config::default();
        let formula = parse("P >> Q").unwrap();
        assert_eq!(to_cnf(&formula, false, &config).unwrap().to_string(), "Q | ~P");
        assert_eq!(to_dnf(&formula, false, &config).unwrap().to_string(), "Q | ~P");
    }

    #[test]
    fn blowup_is_an_error() {
        let mut config = Config::default();
        config.cnf_clause_limit.value = 16;

        let terms = (0..6)
            .map(|index| format!("(A{index} & B{index})"))
            .collect::<Vec<_>>()
            .join(" | ");
        let formula = parse(&terms).unwrap();

        assert_eq!(
            to_cnf(&formula, false, &config),
            Err(ErrorKind::from(TransformError::Blowup { limit: 16 }))
        );
        assert!(to_dnf(&formula, false, &config).is_ok());
    }

    #[test]
    fn long_exclusive_disjunctions() {
        let config = Config::default();
        let chain = (0..26)
            .map(|index| format!("A{index}"))
            .collect::<Vec<_>>()
            .join(" ^ ");
        let formula = parse(&chain).unwrap();

        let nnf = to_nnf(&formula);
        assert!(is_nnf(&nnf));
        assert!(node_count(&nnf) < 26 * 26 * 8, "{}", node_count(&nnf));

        let blowup = Err(ErrorKind::from(TransformError::Blowup {
            limit: config.cnf_clause_limit.value,
        }));
        assert_eq!(to_cnf(&formula, false, &config), blowup);
        assert_eq!(to_dnf(&formula, false, &config), blowup);

        let short = parse("A ^ B ^ C ^ D ^ E").unwrap();
        let cnf = to_cnf(&short, false, &config).unwrap();
        assert!(equivalent_by_table(&short, &cnf));
        assert!(matches!(&cnf, Expr::And(clauses) if clauses.len() == 16));
    }

    #[test]
    fn contradiction() {
        let config = Config::default();
        let formula = parse("(P | Q) & ~P & ~Q").unwrap();
        let dnf = to_dnf(&formula, false, &config).unwrap();
        assert_eq!(dnf, Expr::False);
    }
}
