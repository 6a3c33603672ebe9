/*!
Propositional formulas, as trees over named atoms.

Formulas are built through constructors which keep each formula in a normalised shape:
- Nested conjunctions (and disjunctions) are flattened, and the arguments are de-duplicated and ordered.
- Constants are absorbed, e.g. `P & True` is `P` and `P | True` is `True`.
- A conjunction containing both `x` and `~x` is `False`, and dually for disjunctions.
- A double negation is removed.

```rust
# use otter_logic::propositional::Expr;
let p = Expr::atom("P");
let q = Expr::atom("Q");

let formula = Expr::or(vec![Expr::not(p.clone()), q.clone(), Expr::False]);
assert_eq!(formula.to_string(), "Q | ~P");

assert_eq!(Expr::and(vec![p.clone(), Expr::not(p.clone())]), Expr::False);
assert_eq!(Expr::not(Expr::not(q.clone())), q);
```

Formulas are displayed in the notation of a symbolic algebra system, so `P >> Q` is displayed as `Implies(P, Q)`.
*/

use std::collections::{BTreeMap, BTreeSet};

/// A propositional formula.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    True,
    False,
    Atom(String),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Xor(Vec<Expr>),
    Implies(Box<Expr>, Box<Expr>),
    Equivalent(Vec<Expr>),
    Ite(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn atom(name: &str) -> Expr {
        Expr::Atom(name.to_string())
    }

    /// The constant of `value`.
    pub fn constant(value: bool) -> Expr {
        match value {
            true => Expr::True,
            false => Expr::False,
        }
    }

    /// The negation of `expr`, with constants folded and double negation removed.
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expr) -> Expr {
        match expr {
            Expr::True => Expr::False,
            Expr::False => Expr::True,
            Expr::Not(inner) => *inner,
            other => Expr::Not(Box::new(other)),
        }
    }

    /// The conjunction of `args`.
    pub fn and(args: Vec<Expr>) -> Expr {
        Self::lattice(args, true)
    }

    /// The disjunction of `args`.
    pub fn or(args: Vec<Expr>) -> Expr {
        Self::lattice(args, false)
    }

    /// A conjunction (if `conjunction`) or disjunction of `args`.
    ///
    /// The identity of a conjunction is true and the absorbing element false, and dually for a disjunction.
    fn lattice(args: Vec<Expr>, conjunction: bool) -> Expr {
        let identity = Expr::constant(conjunction);
        let absorbing = Expr::constant(!conjunction);

        let mut flat = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Expr::And(inner) if conjunction => flat.extend(inner),
                Expr::Or(inner) if !conjunction => flat.extend(inner),
                other if other == identity => {}
                other if other == absorbing => return absorbing,
                other => flat.push(other),
            }
        }

        Self::order(&mut flat);
        flat.dedup();

        let present = flat.iter().collect::<std::collections::HashSet<_>>();
        if flat
            .iter()
            .any(|arg| matches!(arg, Expr::Not(inner) if present.contains(inner.as_ref())))
        {
            return absorbing;
        }

        match flat.len() {
            0 => identity,
            1 => flat.pop().unwrap_or(identity),
            _ => match conjunction {
                true => Expr::And(flat),
                false => Expr::Or(flat),
            },
        }
    }

    /// The exclusive disjunction of `args`, true when an odd number of arguments are true.
    pub fn xor(args: Vec<Expr>) -> Expr {
        let mut parity = false;
        let mut counts: BTreeMap<String, (Expr, usize)> = BTreeMap::default();

        let mut pending = args;
        while let Some(arg) = pending.pop() {
            match arg {
                Expr::Xor(inner) => pending.extend(inner),
                Expr::True => parity = !parity,
                Expr::False => {}
                other => {
                    let entry = counts.entry(other.to_string()).or_insert((other, 0));
                    entry.1 += 1;
                }
            }
        }

        let mut remaining = counts
            .into_values()
            .filter(|(_, count)| count % 2 == 1)
            .map(|(arg, _)| arg)
            .collect::<Vec<_>>();
        Self::order(&mut remaining);

        let base = match remaining.len() {
            0 => Expr::False,
            1 => remaining.pop().unwrap_or(Expr::False),
            _ => Expr::Xor(remaining),
        };
        match parity {
            true => Expr::not(base),
            false => base,
        }
    }

    /// The implication from `antecedent` to `consequent`.
    pub fn implies(antecedent: Expr, consequent: Expr) -> Expr {
        match (antecedent, consequent) {
            (Expr::False, _) | (_, Expr::True) => Expr::True,
            (Expr::True, consequent) => consequent,
            (antecedent, Expr::False) => Expr::not(antecedent),
            (antecedent, consequent) if antecedent == consequent => Expr::True,
            (antecedent, consequent) => Expr::Implies(Box::new(antecedent), Box::new(consequent)),
        }
    }

    /// The equivalence of `args`, true when all arguments have the same value.
    pub fn equivalent(args: Vec<Expr>) -> Expr {
        let has_true = args.contains(&Expr::True);
        let has_false = args.contains(&Expr::False);
        let mut rest = args
            .into_iter()
            .filter(|arg| !matches!(arg, Expr::True | Expr::False))
            .collect::<Vec<_>>();

        match (has_true, has_false) {
            (true, true) => return Expr::False,
            (true, false) => return Expr::and(rest),
            (false, true) => return Expr::and(rest.into_iter().map(Expr::not).collect()),
            (false, false) => {}
        }

        Self::order(&mut rest);
        rest.dedup();

        let present = rest.iter().collect::<std::collections::HashSet<_>>();
        if rest
            .iter()
            .any(|arg| matches!(arg, Expr::Not(inner) if present.contains(inner.as_ref())))
        {
            return Expr::False;
        }

        match rest.len() {
            0 | 1 => Expr::True,
            _ => Expr::Equivalent(rest),
        }
    }

    /// If `condition` then `then` else `otherwise`.
    pub fn ite(condition: Expr, then: Expr, otherwise: Expr) -> Expr {
        match (condition, then, otherwise) {
            (Expr::True, then, _) => then,
            (Expr::False, _, otherwise) => otherwise,
            (_, then, otherwise) if then == otherwise => then,
            (condition, Expr::True, Expr::False) => condition,
            (condition, Expr::False, Expr::True) => Expr::not(condition),
            (condition, then, otherwise) => {
                Expr::Ite(Box::new(condition), Box::new(then), Box::new(otherwise))
            }
        }
    }

    /// Orders `args` canonically: constants, then atoms, then negations, then compound formulas, with ties broken by display.
    pub(super) fn order(args: &mut [Expr]) {
        args.sort_by_cached_key(|arg| (arg.rank(), arg.to_string()));
    }

    fn rank(&self) -> u8 {
        match self {
            Expr::True | Expr::False => 0,
            Expr::Atom(_) => 1,
            Expr::Not(_) => 2,
            Expr::And(_) => 3,
            Expr::Or(_) => 4,
            Expr::Xor(_) => 5,
            Expr::Implies(..) => 6,
            Expr::Equivalent(_) => 7,
            Expr::Ite(..) => 8,
        }
    }
}

impl Expr {
    /// The atoms of the formula, in order.
    pub fn atoms(&self) -> BTreeSet<String> {
        let mut atoms = BTreeSet::default();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut BTreeSet<String>) {
        match self {
            Expr::True | Expr::False => {}
            Expr::Atom(name) => {
                atoms.insert(name.clone());
            }
            Expr::Not(inner) => inner.collect_atoms(atoms),
            Expr::And(args) | Expr::Or(args) | Expr::Xor(args) | Expr::Equivalent(args) => {
                for arg in args {
                    arg.collect_atoms(atoms);
                }
            }
            Expr::Implies(a, b) => {
                a.collect_atoms(atoms);
                b.collect_atoms(atoms);
            }
            Expr::Ite(c, t, e) => {
                c.collect_atoms(atoms);
                t.collect_atoms(atoms);
                e.collect_atoms(atoms);
            }
        }
    }

    /// The value of the formula, where the value of each atom is given by `value_of`.
    pub fn evaluate(&self, value_of: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Expr::True => true,
            Expr::False => false,
            Expr::Atom(name) => value_of(name),
            Expr::Not(inner) => !inner.evaluate(value_of),
            Expr::And(args) => args.iter().all(|arg| arg.evaluate(value_of)),
            Expr::Or(args) => args.iter().any(|arg| arg.evaluate(value_of)),
            Expr::Xor(args) => args
                .iter()
                .fold(false, |parity, arg| parity ^ arg.evaluate(value_of)),
            Expr::Implies(a, b) => !a.evaluate(value_of) || b.evaluate(value_of),
            Expr::Equivalent(args) => {
                let mut values = args.iter().map(|arg| arg.evaluate(value_of));
                match values.next() {
                    Some(first) => values.all(|value| value == first),
                    None => true,
                }
            }
            Expr::Ite(c, t, e) => match c.evaluate(value_of) {
                true => t.evaluate(value_of),
                false => e.evaluate(value_of),
            },
        }
    }

    /// The value of the formula on `assignment`, with atoms absent from the assignment false.
    pub fn evaluate_on(&self, assignment: &BTreeMap<String, bool>) -> bool {
        self.evaluate(&|name| assignment.get(name).copied().unwrap_or(false))
    }

    /// True if the formula is an atom, or the negation of an atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Expr::Atom(_) => true,
            Expr::Not(inner) => matches!(inner.as_ref(), Expr::Atom(_)),
            _ => false,
        }
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        Expr::not(self)
    }
}

impl std::ops::BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::and(vec![self, rhs])
    }
}

impl std::ops::BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::or(vec![self, rhs])
    }
}

impl std::ops::BitXor for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Expr::xor(vec![self, rhs])
    }
}

/// Writes `args` separated by `separator`, with any infix argument in parentheses.
fn write_infix(
    f: &mut std::fmt::Formatter<'_>,
    args: &[Expr],
    separator: &str,
) -> std::fmt::Result {
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write!(f, " {separator} ")?;
        }
        match arg {
            Expr::And(_) | Expr::Or(_) | Expr::Xor(_) => write!(f, "({arg})")?,
            _ => write!(f, "{arg}")?,
        }
    }
    Ok(())
}

/// Writes `args` as the arguments of a function named `name`.
fn write_function(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    args: &[&Expr],
) -> std::fmt::Result {
    write!(f, "{name}(")?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::True => write!(f, "True"),
            Expr::False => write!(f, "False"),
            Expr::Atom(name) => write!(f, "{name}"),
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Atom(_) | Expr::True | Expr::False => write!(f, "~{inner}"),
                Expr::Implies(..) | Expr::Equivalent(_) | Expr::Ite(..) => write!(f, "~{inner}"),
                _ => write!(f, "~({inner})"),
            },
            Expr::And(args) => write_infix(f, args, "&"),
            Expr::Or(args) => write_infix(f, args, "|"),
            Expr::Xor(args) => write_infix(f, args, "^"),
            Expr::Implies(a, b) => write_function(f, "Implies", &[a.as_ref(), b.as_ref()]),
            Expr::Equivalent(args) => {
                write_function(f, "Equivalent", &args.iter().collect::<Vec<_>>())
            }
            Expr::Ite(c, t, e) => write_function(f, "ITE", &[c.as_ref(), t.as_ref(), e.as_ref()]),
        }
    }
}

#[cfg(test)]
mod expr_tests {
    use super::*;

    fn p() -> Expr {
        Expr::atom("P")
    }

    fn q() -> Expr {
        Expr::atom("Q")
    }

    fn r() -> Expr {
        Expr::atom("R")
    }

    #[test]
    fn flattening_and_order() {
        let formula = Expr::and(vec![r(), Expr::and(vec![q(), p()]), p()]);
        assert_eq!(formula, Expr::And(vec![p(), q(), r()]));
        assert_eq!(formula.to_string(), "P & Q & R");
    }

    #[test]
    fn display() {
        assert_eq!((!(p() & q())).to_string(), "~(P & Q)");
        assert_eq!(((p() | q()) & r()).to_string(), "R & (P | Q)");
        assert_eq!(Expr::implies(p(), q()).to_string(), "Implies(P, Q)");
        assert_eq!(Expr::equivalent(vec![q(), p()]).to_string(), "Equivalent(P, Q)");
        assert_eq!((p() ^ q()).to_string(), "P ^ Q");
        assert_eq!(Expr::ite(p(), q(), r()).to_string(), "ITE(P, Q, R)");
        assert_eq!((!Expr::implies(p(), q())).to_string(), "~Implies(P, Q)");
    }

    #[test]
    fn constants() {
        assert_eq!(p() | Expr::True, Expr::True);
        assert_eq!(p() & Expr::True, p());
        assert_eq!(p() | !p(), Expr::True);
        assert_eq!(Expr::implies(Expr::False, p()), Expr::True);
        assert_eq!(Expr::implies(p(), Expr::False), !p());
        assert_eq!(p() ^ Expr::True, !p());
        assert_eq!(p() ^ p(), Expr::False);
        assert_eq!(Expr::equivalent(vec![p(), Expr::True]), p());
        assert_eq!(Expr::ite(p(), Expr::True, Expr::False), p());
    }

    #[test]
    fn evaluation() {
        let formula = Expr::and(vec![Expr::implies(p(), q()), Expr::implies(q(), r())]);
        assert!(formula.evaluate(&|_| true));
        assert!(!formula.evaluate(&|name| name == "P"));
        assert_eq!(
            formula.atoms().into_iter().collect::<Vec<_>>(),
            vec!["P", "Q", "R"]
        );
    }
}
