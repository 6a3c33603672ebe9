/*!
Minimisation of formulas by the Quine–McCluskey method.

The truth table of a formula is built, and the prime implicants of the rows on which the formula is true are found by repeatedly merging implicants which differ in a single atom.
A cover of the rows is then chosen: first every essential prime implicant, and then (greedily) whichever prime implicant covers the most rows not yet covered.

A minimal product of sums is found in the same way from the rows on which the formula is false, with each implicant negated to a clause.

As truth tables grow exponentially, a formula with more atoms than [Config::simplify_atom_limit](crate::config::Config::simplify_atom_limit) is returned unchanged unless minimisation is forced.

```rust
# use otter_logic::config::Config;
# use otter_logic::propositional::{parse, simplify_logic};
let config = Config::default();
let formula = parse("(P & Q) | (P & ~Q)").unwrap();

assert_eq!(simplify_logic(&formula, None, false, &config).unwrap().to_string(), "P");
```
*/

use std::collections::BTreeSet;

use crate::{
    config::Config,
    misc::log::targets::{self},
    propositional::Expr,
    types::err::{ErrorKind, TransformError},
};

/// The most atoms a truth table is built for, even when forced.
pub const TRUTH_TABLE_LIMIT: usize = 20;

/// A normal form to minimise to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum NormalForm {
    /// Conjunctive normal form, as a product of sums.
    Cnf,

    /// Disjunctive normal form, as a sum of products.
    Dnf,
}

/// An implicant, as bits of a row together with a mask of the bits which are fixed.
///
/// The first atom is the most significant bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Implicant {
    bits: u32,
    mask: u32,
}

impl Implicant {
    fn covers(&self, row: u32) -> bool {
        row & self.mask == self.bits
    }

    /// The implicant from merging `self` and `other`, if the two differ on a single fixed bit.
    fn merge(&self, other: &Implicant) -> Option<Implicant> {
        if self.mask != other.mask {
            return None;
        }
        let difference = self.bits ^ other.bits;
        match difference.count_ones() == 1 {
            true => Some(Implicant {
                bits: self.bits & !difference,
                mask: self.mask & !difference,
            }),
            false => None,
        }
    }
}

/// The prime implicants covering `rows`, over `width` atoms.
fn prime_implicants(rows: &[u32], width: usize) -> BTreeSet<Implicant> {
    let full_mask = match width {
        0 => 0,
        w => u32::MAX >> (32 - w),
    };

    let mut current = rows
        .iter()
        .map(|row| Implicant {
            bits: *row,
            mask: full_mask,
        })
        .collect::<BTreeSet<_>>();
    let mut primes = BTreeSet::default();

    while !current.is_empty() {
        let mut merged = BTreeSet::default();
        let mut used = BTreeSet::default();

        let implicants = current.iter().collect::<Vec<_>>();
        for (index, a) in implicants.iter().enumerate() {
            for b in &implicants[index + 1..] {
                if let Some(combined) = a.merge(b) {
                    merged.insert(combined);
                    used.insert(**a);
                    used.insert(**b);
                }
            }
        }

        primes.extend(current.iter().filter(|implicant| !used.contains(*implicant)));
        current = merged;
    }

    primes
}

/// A cover of `rows` by prime implicants, essential implicants first.
fn cover(rows: &[u32], primes: &BTreeSet<Implicant>) -> Vec<Implicant> {
    let mut chosen = Vec::default();
    let mut uncovered = rows.iter().copied().collect::<BTreeSet<_>>();

    for row in rows {
        let mut covering = primes.iter().filter(|prime| prime.covers(*row));
        if let (Some(only), None) = (covering.next(), covering.next()) {
            if !chosen.contains(only) {
                chosen.push(*only);
            }
        }
    }
    for implicant in &chosen {
        uncovered.retain(|row| !implicant.covers(*row));
    }

    while !uncovered.is_empty() {
        let best = primes
            .iter()
            .filter(|prime| !chosen.contains(prime))
            .max_by_key(|prime| {
                (
                    uncovered.iter().filter(|row| prime.covers(**row)).count(),
                    std::cmp::Reverse(prime.mask.count_ones()),
                )
            });
        let Some(best) = best else {
            break;
        };
        uncovered.retain(|row| !best.covers(*row));
        chosen.push(*best);
    }

    chosen
}

/// The literals of `implicant` over `atoms`, negated if `negate`.
fn literals_of(implicant: &Implicant, atoms: &[String], negate: bool) -> Vec<Expr> {
    let width = atoms.len();
    atoms
        .iter()
        .enumerate()
        .filter_map(|(index, atom)| {
            let bit = 1 << (width - 1 - index);
            if implicant.mask & bit == 0 {
                return None;
            }
            let polarity = (implicant.bits & bit != 0) != negate;
            Some(match polarity {
                true => Expr::atom(atom),
                false => Expr::not(Expr::atom(atom)),
            })
        })
        .collect()
}

/// The rows of the truth table of `expr` over `atoms` on which `expr` has value `value`.
fn rows_with_value(expr: &Expr, atoms: &[String], value: bool) -> Vec<u32> {
    let width = atoms.len();
    (0..1_u32 << width)
        .filter(|row| {
            let value_of = |name: &str| match atoms.iter().position(|atom| atom == name) {
                Some(index) => row & (1 << (width - 1 - index)) != 0,
                None => false,
            };
            expr.evaluate(&value_of) == value
        })
        .collect()
}

/// A minimal formula equivalent to `expr` in the given form.
///
/// With no form given, a sum of products is found if the formula is true on at least half of the truth table, and a product of sums otherwise.
///
/// If `expr` has more atoms than [Config::simplify_atom_limit](crate::config::Config::simplify_atom_limit) and `force` is not set, `expr` is returned unchanged.
pub fn simplify_logic(
    expr: &Expr,
    form: Option<NormalForm>,
    force: bool,
    config: &Config,
) -> Result<Expr, ErrorKind> {
    let atoms = expr.atoms().into_iter().collect::<Vec<_>>();

    if atoms.len() > config.simplify_atom_limit.value && !force {
        log::debug!(target: targets::TRANSFORM, "Skipping minimisation of {} atoms", atoms.len());
        return Ok(expr.clone());
    }
    if atoms.len() > TRUTH_TABLE_LIMIT {
        return Err(ErrorKind::from(TransformError::TooManyAtoms {
            count: atoms.len(),
            limit: TRUTH_TABLE_LIMIT,
        }));
    }

    let true_rows = rows_with_value(expr, &atoms, true);
    let row_count = 1_usize << atoms.len();

    if true_rows.is_empty() {
        return Ok(Expr::False);
    }
    if true_rows.len() == row_count {
        return Ok(Expr::True);
    }

    let form = form.unwrap_or(match true_rows.len() >= row_count / 2 {
        true => NormalForm::Dnf,
        false => NormalForm::Cnf,
    });

    match form {
        NormalForm::Dnf => {
            let primes = prime_implicants(&true_rows, atoms.len());
            let terms = cover(&true_rows, &primes)
                .iter()
                .map(|implicant| Expr::and(literals_of(implicant, &atoms, false)))
                .collect();
            Ok(Expr::or(terms))
        }

        NormalForm::Cnf => {
            let false_rows = rows_with_value(expr, &atoms, false);
            let primes = prime_implicants(&false_rows, atoms.len());
            let clauses = cover(&false_rows, &primes)
                .iter()
                .map(|implicant| Expr::or(literals_of(implicant, &atoms, true)))
                .collect();
            Ok(Expr::and(clauses))
        }
    }
}

#[cfg(test)]
mod qm_tests {
    use crate::propositional::{parse, transform::{is_cnf, is_dnf}};

    use super::*;

    fn simplified(text: &str, form: Option<NormalForm>) -> Expr {
        simplify_logic(&parse(text).unwrap(), form, false, &Config::default()).unwrap()
    }

    #[test]
    fn merging() {
        let a = Implicant { bits: 0b101, mask: 0b111 };
        let b = Implicant { bits: 0b100, mask: 0b111 };
        assert_eq!(a.merge(&b), Some(Implicant { bits: 0b100, mask: 0b110 }));

        let c = Implicant { bits: 0b010, mask: 0b111 };
        assert_eq!(a.merge(&c), None);
    }

    #[test]
    fn classic_minimisations() {
        assert_eq!(simplified("(P & Q) | (P & ~Q)", None).to_string(), "P");
        assert_eq!(simplified("P | (P & Q)", None).to_string(), "P");
        assert_eq!(simplified("(P >> Q) & (Q >> R)", Some(NormalForm::Cnf)).to_string(), "(Q | ~P) & (R | ~Q)");
        assert_eq!(simplified("P & ~P", None), Expr::False);
        assert_eq!(simplified("P | ~Q | Q", None), Expr::True);
    }

    #[test]
    fn forms_and_equivalence() {
        for text in ["P ^ Q ^ R", "ITE(P, Q, R)", "~(P & Q) | (R >> S)", "Equivalent(P, Q)"] {
            let formula = parse(text).unwrap();
            let atoms = formula.atoms().into_iter().collect::<Vec<_>>();
            for form in [NormalForm::Cnf, NormalForm::Dnf] {
                let minimal =
                    simplify_logic(&formula, Some(form), false, &Config::default()).unwrap();
                match form {
                    NormalForm::Cnf => assert!(is_cnf(&minimal), "{minimal}"),
                    NormalForm::Dnf => assert!(is_dnf(&minimal), "{minimal}"),
                }
                assert_eq!(
                    rows_with_value(&formula, &atoms, true),
                    rows_with_value(&minimal, &atoms, true)
                );
            }
        }
    }

    #[test]
    fn limit_without_force() {
        let mut config = Config::default();
        config.simplify_atom_limit.value = 2;
        let formula = parse("(P & Q) | (P & ~Q) | R").unwrap();

        assert_eq!(simplify_logic(&formula, None, false, &config).unwrap(), formula);
        assert_eq!(
            simplify_logic(&formula, None, true, &config).unwrap().to_string(),
            "P | R"
        );
    }
}
