//! A library for exploring propositional and first-order logic: normal forms, minimisation, satisfiability, and bounded reasoning with quantifiers.
//!
//! otter_logic is developed as a companion for anyone learning logic, in the manner of the exercises of an introductory text on artificial intelligence.
//! Each operation is decided by a small conflict-driven clause-learning solver, kept in-tree, so the path from a formula to a result can be followed from start to finish.
//!
//! # Orientation
//!
//! The library is layered:
//! - A [context] holds clauses over atoms and determines whether the clauses are satisfiable.
//!   Clauses may be added through the [DIMACS](crate::context::GenericContext::read_dimacs) representation of a formula or [programatically](crate::context::GenericContext::add_clause).
//! - [encode] builds gates and bit vectors on a context, so richer formulas may be represented as clauses.
//! - [propositional] formulas are transformed to normal forms, minimised, tabulated, and checked through the encodings.
//! - [first_order] formulas over finite universes and bounded integers are grounded to a context by a [Solver](first_order::Solver).
//! - [lab] gathers demonstrations of the layers, as used by the cli.
//!
//! Useful starting points, then, may be:
//! - The [solve procedure](crate::procedures::solve) to inspect the dynamics of a solve.
//! - The [database module](crate::db) to inspect the data considered during a solve.
//! - The [grounding](crate::first_order::ground) of quantified formulas.
//! - The [configuration](crate::config) to see what may be adjusted.
//!
//! # Examples
//!
//! + Transform and check a propositional formula.
//!
//! ```rust
//! # use otter_logic::config::Config;
//! # use otter_logic::propositional::{parse, to_cnf, is_tautology};
//! let config = Config::default();
//! let formula = parse("(P >> Q) & (Q >> R)").unwrap();
//!
//! assert_eq!(to_cnf(&formula, false, &config).unwrap().to_string(), "(Q | ~P) & (R | ~Q)");
//! assert!(!is_tautology(&formula, &config).unwrap());
//! ```
//!
//! + Find (a count of) all valuations of some collection of atoms.
//!
//! ```rust
//! # use otter_logic::config::Config;
//! # use otter_logic::context::Context;
//! # use otter_logic::reports::Report;
//! # use otter_logic::structures::literal::{CLiteral, Literal};
//! let mut the_context = Context::from_config(Config::default());
//! let atoms = "logic".chars().map(|_| the_context.fresh_atom().unwrap()).collect::<Vec<_>>();
//!
//! let mut count = 0;
//! while the_context.solve() == Ok(Report::Satisfiable) {
//!     count += 1;
//!
//!     let clause = atoms
//!         .iter()
//!         .map(|atom| CLiteral::new(*atom, !the_context.value_of(*atom).unwrap_or(false)))
//!         .collect::<Vec<_>>();
//!
//!     the_context.clear_decisions();
//!     if the_context.add_clause(clause).is_err() {
//!         break;
//!     }
//! }
//!
//! assert_eq!(count, 2_usize.pow(5));
//! ```
//!
//! + Check a syllogism.
//!
//! ```rust
//! # use otter_logic::config::Config;
//! # use otter_logic::first_order::Entailment;
//! # use otter_logic::lab::first_order::socrates;
//! let syllogism = socrates(&Config::default()).unwrap();
//! assert_eq!(syllogism.entailment, Entailment::Valid);
//! ```
//!
//! # Logs
//!
//! Calls to the [log] macros are made throughout the library, with targets listed in [misc::log].
//! No log implementation is provided by the library, though the cli installs [env_logger](https://docs.rs/env_logger/latest/env_logger/), and so, e.g., `RUST_LOG=ground=debug` shows the universes tried by a first-order check.

pub mod builder;
pub mod config;
pub mod context;
pub mod db;
pub mod encode;
pub mod first_order;
pub mod generic;
pub mod lab;
pub mod misc;
pub mod preprocessing;
pub mod procedures;
pub mod propositional;
pub mod reports;
pub mod structures;
pub mod syntax;
pub mod types;
