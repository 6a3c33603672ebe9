/*!
Tools for building a context.

# Basic methods

The library has two basic methods for building a context:
- [fresh_atom](crate::context::GenericContext::fresh_atom), to obtain a fresh atom.
- [add_clause](crate::context::GenericContext::add_clause), to add a clause.

A formula may be added to a context by interweaving these two methods.
In rough strokes, the pattern is to:
- Obtain a collection of atoms to represent a clause.
- Create [CLiteral]s from the atoms.
- Bundle the literals into a [CClause].
- Add the clause to the context.

Clauses may be added after a solve, in which case any decisions made are cleared first.

# Examples

A clause built using basic methods.

```rust
# use otter_logic::context::Context;
# use otter_logic::config::Config;
# use otter_logic::reports::Report;
# use otter_logic::structures::{clause::CClause, literal::{CLiteral, Literal}};
#
let mut the_context = Context::from_config(Config::default());
let p = the_context.fresh_atom().unwrap();
let q = the_context.fresh_atom().unwrap();

let clause_a = CClause::from([CLiteral::new(p, true), CLiteral::new(q, false)]);
let clause_b = CClause::from([CLiteral::new(p, false), CLiteral::new(q, true)]);

assert!(the_context.add_clause(clause_a).is_ok());
assert!(the_context.add_clause(clause_b).is_ok());
assert!(the_context.solve().is_ok());
assert_eq!(the_context.report(), Report::Satisfiable)
```

A build from strings, with atoms named as they are read.

```rust
# use otter_logic::context::Context;
# use otter_logic::reports::Report;
let mut the_context = Context::default();

let clause = the_context.clause_from_string("p -q").unwrap();
assert!(the_context.add_clause(clause).is_ok());
let clause = the_context.clause_from_string("q").unwrap();
assert!(the_context.add_clause(clause).is_ok());

assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
let p = the_context.atom_db.atom_of("p").unwrap();
assert_eq!(the_context.value_of(p), Some(true));
```
*/

mod dimacs;

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// Ok results when adding a clause to the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the context.
    Added,

    /// The clause was a tautology (and so was not added to the context).
    Tautology,

    /// The clause is satisfied by a value fixed without decision (and so was not added to the context).
    Satisfied,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Returns a fresh atom.
    ///
    /// The previous value of the atom, used when phase saving, is chosen with the configured polarity lean.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::AtomDBError> {
        let previous_value = self.rng.gen_bool(self.config.polarity_lean.value);
        let atom = self.atom_db.fresh_atom(previous_value)?;
        self.clause_db.grow_watches(self.atom_db.count());
        self.seen.push(false);
        Ok(atom)
    }

    /// Returns a fresh literal, of positive polarity.
    pub fn fresh_literal(&mut self) -> Result<CLiteral, err::AtomDBError> {
        Ok(CLiteral::new(self.fresh_atom()?, true))
    }

    /// The atom with external name `name`, created if required.
    pub fn atom_named(&mut self, name: &str) -> Result<Atom, err::AtomDBError> {
        match self.atom_db.atom_of(name) {
            Some(atom) => Ok(atom),
            None => {
                let atom = self.fresh_atom()?;
                self.atom_db.name_atom(atom, name);
                Ok(atom)
            }
        }
    }

    /// A clause from a string of whitespace separated literals, where a literal is a name optionally prefixed by '-'.
    ///
    /// Atoms are created for names not previously seen.
    pub fn clause_from_string(&mut self, string: &str) -> Result<CClause, ErrorKind> {
        let mut the_clause = CClause::default();

        for item in string.split_whitespace() {
            let (polarity, name) = match item.strip_prefix('-') {
                Some(name) => (false, name),
                None => (true, item),
            };
            if name.is_empty() {
                return Err(err::ErrorKind::from(err::ParseError::Negation));
            }
            let atom = self.atom_named(name)?;
            the_clause.push(CLiteral::new(atom, polarity));
        }

        match the_clause.is_empty() {
            true => Err(err::ErrorKind::from(err::ParseError::Empty)),
            false => Ok(the_clause),
        }
    }

    /// Adds a clause to the context.
    ///
    /// Any decisions made are cleared, and the clause is then simplified against values fixed without decision:
    /// - Duplicate literals are removed, and a tautology is not added.
    /// - A literal fixed false is removed, and a clause with a literal fixed true is not added.
    ///
    /// What remains of the clause is then either:
    /// - Empty, and the context is unsatisfiable.
    /// - A unit, and the literal is fixed.
    /// - Stored, and watched.
    pub fn add_clause(&mut self, clause: impl Clause) -> Result<ClauseOk, ErrorKind> {
        let mut clause = clause.canonical();
        if clause.is_empty() {
            return Err(err::ErrorKind::from(err::ClauseDBError::EmptyClause));
        }
        if clause
            .iter()
            .any(|literal| literal.atom() as usize >= self.atom_db.count())
        {
            return Err(err::ErrorKind::from(err::ClauseDBError::UnknownAtom));
        }

        self.clear_decisions();
        if self.state == ContextState::Unsatisfiable {
            return Err(err::ErrorKind::from(err::BuildError::Unsatisfiable));
        }
        self.state = ContextState::Input;

        clause.sort_unstable();
        clause.dedup();
        if clause
            .windows(2)
            .any(|pair| pair[0].atom() == pair[1].atom())
        {
            return Ok(ClauseOk::Tautology);
        }

        let mut the_clause = CClause::with_capacity(clause.len());
        for literal in clause {
            match self.atom_db.literal_value(literal) {
                Some(true) => return Ok(ClauseOk::Satisfied),
                Some(false) => {}
                None => the_clause.push(literal),
            }
        }

        match the_clause.len() {
            0 => {
                log::info!(target: targets::CLAUSE_DB, "Unsatisfiable clause added");
                self.state = ContextState::Unsatisfiable;
                Err(err::ErrorKind::from(err::BuildError::Unsatisfiable))
            }

            1 => {
                self.clause_db.note_original_unit();
                self.assign(the_clause[0], None);
                Ok(ClauseOk::Added)
            }

            _ => {
                self.clause_db.store(the_clause, false);
                Ok(ClauseOk::Added)
            }
        }
    }
}
