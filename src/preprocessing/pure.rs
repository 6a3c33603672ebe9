/*!
Pure literals, aka. literals whose atom occurs with a unique polarity.

If an atom occurs only with a single polarity in clauses not already satisfied, then valuing the atom to make those occurrences true cannot lead to a conflict.

Pure literals are decided before any other atom, rather than fixed, so clauses added after a solve may freely use the atom.
*/

use std::collections::HashSet;

use crate::{
    context::GenericContext,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Notes the pure literals of clauses not satisfied without decision, to be decided first.
    pub fn preprocess(&mut self) {
        let mut positive = HashSet::new();
        let mut negative = HashSet::new();

        for (_, clause) in self.clause_db.all_clauses() {
            if clause
                .literals
                .iter()
                .any(|literal| self.atom_db.literal_value(*literal) == Some(true))
            {
                continue;
            }
            for literal in &clause.literals {
                if self.atom_db.value_of(literal.atom()).is_some() {
                    continue;
                }
                match literal.polarity() {
                    true => positive.insert(literal.atom()),
                    false => negative.insert(literal.atom()),
                };
            }
        }

        let mut pure = positive
            .symmetric_difference(&negative)
            .map(|atom| CLiteral::new(*atom, positive.contains(atom)))
            .collect::<Vec<_>>();
        pure.sort_unstable();

        log::debug!(target: targets::PREPROCESSING, "{} pure literals", pure.len());
        self.pure_literals = pure;
    }
}

#[cfg(test)]
mod pure_tests {
    use crate::{
        config::Config, context::Context, reports::Report, structures::literal::Literal,
    };

    #[test]
    fn pure_literals_are_found() {
        let mut config = Config::default();
        config.preprocessing.value = true;
        let mut the_context = Context::from_config(config);

        for clause in ["p q", "p -q", "-r q"] {
            let clause = the_context.clause_from_string(clause).unwrap();
            assert!(the_context.add_clause(clause).is_ok());
        }

        the_context.preprocess();
        let p = the_context.atom_db.atom_of("p").unwrap();
        let r = the_context.atom_db.atom_of("r").unwrap();
        let found = the_context
            .pure_literals
            .iter()
            .map(|literal| literal.as_int())
            .collect::<Vec<_>>();
        assert_eq!(found, vec![p as isize, -(r as isize)]);

        assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
        assert_eq!(the_context.value_of(p), Some(true));
    }
}
