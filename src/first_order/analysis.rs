/*!
Analysis of assertions ahead of a search for a model.

A search for a finite model is complete for the effectively propositional fragment, where, once negation is pushed inwards:
- no existential quantifier over an uninterpreted sort occurs within the scope of a universal quantifier, and
- no function of positive arity has an uninterpreted range.

In the fragment, a model exists if and only if a model exists with, for each sort, at most as many elements as there are constants of the sort together with outermost existentially bound variables of the sort.
So, if no model is found for any universe within these bounds, the assertions are unsatisfiable.

The polarity of a quantifier is tracked rather than computing a negation normal form: a quantifier under an odd number of negations is of the dual kind, and a quantifier beneath an equivalence, an exclusive disjunction, or the condition of a conditional is of both kinds.
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::first_order::{Formula, Signature, Sort, Term};

/// A summary of the assertions of a solver, as relevant to a search for a model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    /// The symbols which occur in the assertions.
    pub symbols: BTreeSet<String>,

    /// For each uninterpreted sort of the assertions, the least number of elements a universe must have to be sure of finding a model in the effectively propositional fragment.
    pub bounds: BTreeMap<Sort, usize>,

    /// Descriptions of each way the assertions are outside the effectively propositional fragment.
    pub violations: Vec<String>,

    /// Whether some symbol has an integer domain or range.
    pub integers: bool,
}

impl Profile {
    /// Profiles `assertions` with respect to `signature`.
    pub fn of(assertions: &[Formula], signature: &Signature) -> Profile {
        let mut profile = Profile::default();

        for assertion in assertions {
            profile.symbols.extend(assertion.symbols());
        }

        for name in &profile.symbols {
            let Some(declaration) = signature.declaration(name) else {
                continue;
            };
            for sort in declaration.domain.iter().chain(std::iter::once(&declaration.range)) {
                match sort {
                    Sort::Int => profile.integers = true,
                    Sort::Uninterpreted(_) => {
                        profile.bounds.entry(sort.clone()).or_insert(0);
                    }
                    Sort::Bool => {}
                }
            }
            if declaration.is_constant() && declaration.range.is_uninterpreted() {
                *profile.bounds.entry(declaration.range.clone()).or_insert(0) += 1;
            }
            if !declaration.is_constant() && declaration.range.is_uninterpreted() {
                profile.violations.push(format!(
                    "{name} is a function into the uninterpreted sort {}",
                    declaration.range
                ));
            }
        }

        for assertion in assertions {
            profile.formula(assertion, Some(true), false);
        }

        for bound in profile.bounds.values_mut() {
            *bound = (*bound).max(1);
        }

        profile
    }

    /// Whether the assertions are in the effectively propositional fragment.
    pub fn effectively_propositional(&self) -> bool {
        self.violations.is_empty()
    }

    /// Notes the quantifiers of `formula`, where `polarity` is none when `formula` occurs with both polarities.
    fn formula(&mut self, formula: &Formula, polarity: Option<bool>, under_universal: bool) {
        match formula {
            Formula::True | Formula::False | Formula::BoolVar(_) => {}

            Formula::Predicate(_, args) | Formula::Distinct(args) => {
                args.iter().for_each(|arg| self.term(arg, under_universal))
            }

            Formula::Eq(a, b) | Formula::Compare(_, a, b) => {
                self.term(a, under_universal);
                self.term(b, under_universal);
            }

            Formula::Not(inner) => self.formula(inner, polarity.map(|p| !p), under_universal),

            Formula::And(args) | Formula::Or(args) => args
                .iter()
                .for_each(|arg| self.formula(arg, polarity, under_universal)),

            Formula::Implies(a, b) => {
                self.formula(a, polarity.map(|p| !p), under_universal);
                self.formula(b, polarity, under_universal);
            }

            Formula::Xor(a, b) | Formula::Iff(a, b) => {
                self.formula(a, None, under_universal);
                self.formula(b, None, under_universal);
            }

            Formula::Ite(condition, then, otherwise) => {
                self.formula(condition, None, under_universal);
                self.formula(then, polarity, under_universal);
                self.formula(otherwise, polarity, under_universal);
            }

            Formula::ForAll(bindings, body) | Formula::Exists(bindings, body) => {
                let written_universal = matches!(formula, Formula::ForAll(..));
                let (universal, existential) = match polarity {
                    Some(positive) => (positive == written_universal, positive != written_universal),
                    None => (true, true),
                };

                for (_, sort) in bindings {
                    if sort.is_uninterpreted() {
                        self.bounds.entry(sort.clone()).or_insert(0);
                    }
                }

                if existential {
                    for (variable, sort) in bindings.iter().filter(|(_, s)| s.is_uninterpreted()) {
                        match under_universal {
                            true => self.violations.push(format!(
                                "the variable {variable} of sort {sort} is existential within the scope of a universal"
                            )),
                            false => *self.bounds.entry(sort.clone()).or_insert(0) += 1,
                        }
                    }
                }

                self.formula(body, polarity, under_universal || universal);
            }
        }
    }

    fn term(&mut self, term: &Term, under_universal: bool) {
        match term {
            Term::Var(..) | Term::Int(_) => {}
            Term::Apply(_, args) => args.iter().for_each(|arg| self.term(arg, under_universal)),
            Term::Neg(inner) => self.term(inner, under_universal),
            Term::Add(a, b) | Term::Sub(a, b) | Term::Mul(a, b) => {
                self.term(a, under_universal);
                self.term(b, under_universal);
            }
            Term::Ite(condition, then, otherwise) => {
                self.formula(condition, None, under_universal);
                self.term(then, under_universal);
                self.term(otherwise, under_universal);
            }
        }
    }
}

/// Each vector of sizes with the size at each index between one and the limit at the index, in order of increasing total size.
///
/// With no limits, the only vector is empty.
pub fn universe_sizes(limits: &[usize]) -> Vec<Vec<usize>> {
    let mut vectors = vec![Vec::default()];
    for limit in limits {
        vectors = vectors
            .into_iter()
            .flat_map(|prefix| {
                (1..=(*limit).max(1)).map(move |size| {
                    let mut vector = prefix.clone();
                    vector.push(size);
                    vector
                })
            })
            .collect();
    }
    vectors.sort_by_key(|vector| vector.iter().sum::<usize>());
    vectors
}

#[cfg(test)]
mod analysis_tests {
    use crate::first_order::Script;

    use super::*;

    const PREAMBLE: &str = "H = DeclareSort('H')
        a, b, x, y = Consts('a b x y', H)
        P = Function('P', H, BoolSort())
        R = Function('R', H, H, BoolSort())
        f = Function('f', H, H)
        n = Int('n')
        ";

    fn profile(assertions: &str) -> Profile {
        let script = Script::parse(&format!("{PREAMBLE}{assertions}")).unwrap();
        Profile::of(&script.assertions, &script.signature)
    }

    fn human() -> Sort {
        Sort::Uninterpreted("H".to_string())
    }

    #[test]
    fn bounds_count_constants_and_outer_existentials() {
        let p = profile("P(a)\nP(b)\nExists([x], Exists([y], R(x, y)))");
        assert!(p.effectively_propositional());
        assert_eq!(p.bounds.get(&human()), Some(&4));
        assert!(!p.integers);

        let p = profile("ForAll([x], P(x))");
        assert_eq!(p.bounds.get(&human()), Some(&1));
    }

    #[test]
    fn negation_swaps_quantifiers() {
        let p = profile("Not(ForAll([x], Exists([y], R(x, y))))");
        assert!(p.effectively_propositional());
        assert_eq!(p.bounds.get(&human()), Some(&1));

        let p = profile("Not(Exists([x], ForAll([y], R(x, y))))");
        assert!(!p.effectively_propositional());
    }

    #[test]
    fn violations() {
        assert!(!profile("ForAll([x], Exists([y], R(x, y)))").effectively_propositional());
        assert!(!profile("P(f(a))").effectively_propositional());
        assert!(profile("ForAll([x], P(x)) == P(a)").effectively_propositional());
        assert!(!profile("ForAll([x], ForAll([y], R(x, y))) == P(a)").effectively_propositional());
        assert!(profile("n > 0").integers);
    }

    #[test]
    fn sizes_in_order() {
        assert_eq!(universe_sizes(&[]), vec![Vec::<usize>::new()]);
        assert_eq!(
            universe_sizes(&[2, 2]),
            vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]
        );
        assert_eq!(universe_sizes(&[3]).len(), 3);
    }
}
