/*!
Tseitin encoding of gates onto a context.

Each gate takes literals and returns a literal equivalent to the gate applied to those literals, adding defining clauses for a fresh atom as required.

Constants are the literals [TOP](CLiteral::TOP) and [BOTTOM](CLiteral::BOTTOM), and gates fold constants rather than introduce atoms.
For example, the conjunction of any literal with BOTTOM is BOTTOM, and the conjunction of a literal with TOP is the literal itself.
As a consequence, encoding a formula without atoms adds no clauses.

```rust
# use otter_logic::context::Context;
# use otter_logic::reports::Report;
# use otter_logic::structures::literal::{CLiteral, Literal};
let mut the_context = Context::default();
let p = the_context.fresh_literal().unwrap();
let q = the_context.fresh_literal().unwrap();

assert_eq!(the_context.and_gate(&[p, CLiteral::TOP]), Ok(p));
assert_eq!(the_context.and_gate(&[p, -p]), Ok(CLiteral::BOTTOM));

let p_xor_q = the_context.xor_gate(p, q).unwrap();
assert!(the_context.assert_literal(p_xor_q).is_ok());
assert!(the_context.assert_literal(p).is_ok());
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
assert_eq!(the_context.value_of(q.atom()), Some(false));
```

[Bit vectors](bits) are built from these gates.
*/

pub mod bits;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::{clause::CClause, literal::{CLiteral, Literal}},
    types::err::{self, ErrorKind},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Adds a clause, treating an unsatisfiable clause as a result rather than an error.
    ///
    /// An empty clause is added as the clause containing only BOTTOM.
    pub fn assert_clause(&mut self, mut clause: CClause) -> Result<(), ErrorKind> {
        if clause.is_empty() {
            clause.push(CLiteral::BOTTOM);
        }
        match self.add_clause(clause) {
            Ok(_) | Err(ErrorKind::Build(err::BuildError::Unsatisfiable)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Asserts `literal` holds.
    pub fn assert_literal(&mut self, literal: CLiteral) -> Result<(), ErrorKind> {
        self.assert_clause(vec![literal])
    }

    /// A literal equivalent to the conjunction of `literals`.
    pub fn and_gate(&mut self, literals: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let mut inputs = Vec::with_capacity(literals.len());
        for literal in literals {
            match *literal {
                CLiteral::BOTTOM => return Ok(CLiteral::BOTTOM),
                CLiteral::TOP => {}
                other => inputs.push(other),
            }
        }
        inputs.sort_unstable();
        inputs.dedup();
        if inputs.windows(2).any(|pair| pair[0].atom() == pair[1].atom()) {
            return Ok(CLiteral::BOTTOM);
        }

        match inputs.as_slice() {
            [] => Ok(CLiteral::TOP),
            [single] => Ok(*single),
            _ => {
                let gate = self.fresh_literal()?;
                log::trace!(target: targets::ENCODE, "{gate} as the conjunction of {} literals", inputs.len());

                let mut long_clause = vec![gate];
                for input in &inputs {
                    self.assert_clause(vec![-gate, *input])?;
                    long_clause.push(-*input);
                }
                self.assert_clause(long_clause)?;
                Ok(gate)
            }
        }
    }

    /// A literal equivalent to the disjunction of `literals`.
    pub fn or_gate(&mut self, literals: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let negated = literals.iter().map(|literal| -*literal).collect::<Vec<_>>();
        Ok(-self.and_gate(&negated)?)
    }

    /// A literal equivalent to the exclusive disjunction of `a` and `b`.
    pub fn xor_gate(&mut self, a: CLiteral, b: CLiteral) -> Result<CLiteral, ErrorKind> {
        match (a, b) {
            (CLiteral::TOP, other) | (other, CLiteral::TOP) => Ok(-other),
            (CLiteral::BOTTOM, other) | (other, CLiteral::BOTTOM) => Ok(other),
            _ if a == b => Ok(CLiteral::BOTTOM),
            _ if a == -b => Ok(CLiteral::TOP),
            _ => {
                let gate = self.fresh_literal()?;
                self.assert_clause(vec![-gate, a, b])?;
                self.assert_clause(vec![-gate, -a, -b])?;
                self.assert_clause(vec![gate, -a, b])?;
                self.assert_clause(vec![gate, a, -b])?;
                Ok(gate)
            }
        }
    }

    /// A literal equivalent to the exclusive disjunction of `literals`, true when an odd number of literals are true.
    pub fn parity_gate(&mut self, literals: &[CLiteral]) -> Result<CLiteral, ErrorKind> {
        let mut result = CLiteral::BOTTOM;
        for literal in literals {
            result = self.xor_gate(result, *literal)?;
        }
        Ok(result)
    }

    /// A literal equivalent to the biconditional of `a` and `b`.
    pub fn iff_gate(&mut self, a: CLiteral, b: CLiteral) -> Result<CLiteral, ErrorKind> {
        Ok(-self.xor_gate(a, b)?)
    }

    /// A literal equivalent to `a` implies `b`.
    pub fn implies_gate(&mut self, a: CLiteral, b: CLiteral) -> Result<CLiteral, ErrorKind> {
        self.or_gate(&[-a, b])
    }

    /// A literal equivalent to `then` if `condition` holds, and `otherwise` if not.
    pub fn ite_gate(
        &mut self,
        condition: CLiteral,
        then: CLiteral,
        otherwise: CLiteral,
    ) -> Result<CLiteral, ErrorKind> {
        match condition {
            CLiteral::TOP => return Ok(then),
            CLiteral::BOTTOM => return Ok(otherwise),
            _ => {}
        }
        if then == otherwise {
            return Ok(then);
        }
        if then == -otherwise {
            return self.iff_gate(condition, then);
        }
        match (then, otherwise) {
            (CLiteral::TOP, _) => return self.or_gate(&[condition, otherwise]),
            (CLiteral::BOTTOM, _) => return self.and_gate(&[-condition, otherwise]),
            (_, CLiteral::TOP) => return self.or_gate(&[-condition, then]),
            (_, CLiteral::BOTTOM) => return self.and_gate(&[condition, then]),
            _ => {}
        }

        let gate = self.fresh_literal()?;
        self.assert_clause(vec![-condition, -then, gate])?;
        self.assert_clause(vec![-condition, then, -gate])?;
        self.assert_clause(vec![condition, -otherwise, gate])?;
        self.assert_clause(vec![condition, otherwise, -gate])?;
        self.assert_clause(vec![-then, -otherwise, gate])?;
        self.assert_clause(vec![then, otherwise, -gate])?;
        Ok(gate)
    }

    /// Asserts at most one of `literals` holds, pairwise.
    pub fn assert_at_most_one(&mut self, literals: &[CLiteral]) -> Result<(), ErrorKind> {
        for (index, a) in literals.iter().enumerate() {
            for b in &literals[index + 1..] {
                self.assert_clause(vec![-*a, -*b])?;
            }
        }
        Ok(())
    }

    /// Asserts exactly one of `literals` holds.
    pub fn assert_exactly_one(&mut self, literals: &[CLiteral]) -> Result<(), ErrorKind> {
        self.assert_clause(literals.to_vec())?;
        self.assert_at_most_one(literals)
    }
}

#[cfg(test)]
mod gate_tests {
    use crate::{context::Context, reports::Report};

    use super::*;

    #[test]
    fn constants_fold() {
        let mut the_context = Context::default();
        let p = the_context.fresh_literal().unwrap();

        assert_eq!(the_context.or_gate(&[p, CLiteral::TOP]), Ok(CLiteral::TOP));
        assert_eq!(the_context.or_gate(&[]), Ok(CLiteral::BOTTOM));
        assert_eq!(the_context.xor_gate(p, p), Ok(CLiteral::BOTTOM));
        assert_eq!(the_context.iff_gate(p, CLiteral::TOP), Ok(p));
        assert_eq!(
            the_context.ite_gate(CLiteral::BOTTOM, p, -p),
            Ok(-p)
        );
        assert_eq!(the_context.atom_count(), 1);
    }

    #[test]
    fn ite_selects() {
        for condition_value in [true, false] {
            let mut the_context = Context::default();
            let c = the_context.fresh_literal().unwrap();
            let t = the_context.fresh_literal().unwrap();
            let e = the_context.fresh_literal().unwrap();
            let gate = the_context.ite_gate(c, t, e).unwrap();

            let c_literal = match condition_value {
                true => c,
                false => -c,
            };
            assert!(the_context.assert_literal(c_literal).is_ok());
            assert!(the_context.assert_literal(gate).is_ok());
            assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

            let selected = match condition_value {
                true => t,
                false => e,
            };
            assert_eq!(the_context.value_of(selected.atom()), Some(true));
        }
    }

    #[test]
    fn exactly_one_of_three() {
        let mut the_context = Context::default();
        let literals = (0..3)
            .map(|_| the_context.fresh_literal().unwrap())
            .collect::<Vec<_>>();
        assert!(the_context.assert_exactly_one(&literals).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

        let true_count = literals
            .iter()
            .filter(|literal| the_context.value_of(literal.atom()) == Some(true))
            .count();
        assert_eq!(true_count, 1);
    }

    #[test]
    fn asserting_bottom_is_unsatisfiable() {
        let mut the_context = Context::default();
        assert!(the_context.assert_literal(CLiteral::BOTTOM).is_ok());
        assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    }
}
