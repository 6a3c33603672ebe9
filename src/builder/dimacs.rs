use crate::{
    context::GenericContext,
    structures::{
        atom::Atom,
        clause::CClause,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

use std::{collections::HashMap, io::BufRead};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Reads a DIMACS file into the context, returning a map from the integers of the file to atoms of the context.
    ///
    /// ```rust,ignore
    /// context.read_dimacs(BufReader::new(&file))?;
    /// ```
    ///
    /// A clause which is found to be unsatisfiable while reading is not an error, as the context records the result.
    ///
    /// ```rust
    /// # use otter_logic::context::Context;
    /// # use otter_logic::config::Config;
    /// # use otter_logic::reports::Report;
    /// # use std::io::Write;
    /// let mut the_context = Context::from_config(Config::default());
    ///
    /// let mut dimacs = vec![];
    /// let _ = dimacs.write(b"
    /// p cnf 4 7
    ///  1  2       0
    ///  1 -2       0
    /// -1  2       0
    /// -1 -2       0
    ///  1  2  3    0
    /// -1  2 -3    0
    ///        3 -4 0
    /// ");
    ///
    /// assert!(the_context.read_dimacs(dimacs.as_slice()).is_ok());
    /// assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
    /// ```
    pub fn read_dimacs(
        &mut self,
        mut reader: impl BufRead,
    ) -> Result<HashMap<isize, Atom>, err::ErrorKind> {
        let mut atom_map = HashMap::<isize, Atom>::default();
        let mut buffer = String::with_capacity(1024);
        let mut clause_buffer: CClause = Vec::default();

        let mut line_counter = 0;
        let mut clause_counter = 0;

        loop {
            buffer.clear();
            match reader.read_line(&mut buffer) {
                Ok(0) => break,
                Ok(_) => line_counter += 1,
                Err(_) => return Err(err::ErrorKind::from(err::ParseError::Line(line_counter))),
            }

            match buffer.trim_start().chars().next() {
                None | Some('c') => continue,

                Some('%') => break,

                Some('p') => {
                    let mut problem_details = buffer.split_whitespace().skip(2);
                    let mut expected = [0_usize; 2];
                    for slot in expected.iter_mut() {
                        *slot = match problem_details.next().map(|count| count.parse()) {
                            Some(Ok(count)) => count,
                            _ => {
                                return Err(err::ErrorKind::from(
                                    err::ParseError::ProblemSpecification,
                                ))
                            }
                        };
                    }
                    log::info!("Expecting {} atoms and {} clauses", expected[0], expected[1]);
                }

                _ => {
                    for item in buffer.split_whitespace() {
                        let parsed_int = match item.parse::<isize>() {
                            Ok(int) => int,
                            Err(_) => {
                                return Err(err::ErrorKind::from(err::ParseError::Line(
                                    line_counter,
                                )))
                            }
                        };

                        if parsed_int == 0 {
                            let the_clause = std::mem::take(&mut clause_buffer);
                            clause_counter += 1;
                            match self.add_clause(the_clause) {
                                Ok(_) => {}
                                Err(err::ErrorKind::Build(err::BuildError::Unsatisfiable)) => {}
                                Err(e) => return Err(e),
                            }
                            continue;
                        }

                        let the_literal = match atom_map.get(&parsed_int.abs()) {
                            Some(atom) => CLiteral::new(*atom, parsed_int.is_positive()),
                            None => {
                                let fresh_atom = self.fresh_atom()?;
                                self.atom_db
                                    .name_atom(fresh_atom, &parsed_int.abs().to_string());
                                atom_map.insert(parsed_int.abs(), fresh_atom);
                                CLiteral::new(fresh_atom, parsed_int.is_positive())
                            }
                        };
                        clause_buffer.push(the_literal);
                    }
                }
            }
        }

        if !clause_buffer.is_empty() {
            return Err(err::ErrorKind::from(err::ParseError::Line(line_counter)));
        }

        log::info!("Read {} atoms and {clause_counter} clauses", atom_map.len());
        Ok(atom_map)
    }
}
