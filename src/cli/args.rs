use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use otter_logic::{
    config::Config,
    lab::first_order::{Problem, Quantifier},
    propositional::NormalForm,
    types::err::ConfigError,
};

/// Normal forms, satisfiability, and bounded first-order reasoning
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Write results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the help of each command as markdown
    #[arg(long, hide = true, default_value_t = false)]
    pub markdown_help: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse a propositional formula: normal forms, a simplification, and a model
    Analyse {
        /// The formula, e.g. "(P >> Q) & (Q >> R)"
        formula: Option<String>,

        /// Analyse the example at the given index
        #[arg(short, long, conflicts_with = "formula")]
        example: Option<usize>,

        /// List the examples
        #[arg(short, long, default_value_t = false)]
        list: bool,
    },

    /// Conjunctive normal form of a propositional formula
    Cnf {
        formula: String,

        /// Give a minimal product of sums, rather than the form from distribution
        #[arg(short, long, default_value_t = false)]
        simplify: bool,
    },

    /// Disjunctive normal form of a propositional formula
    Dnf {
        formula: String,

        /// Give a minimal sum of products, rather than the form from distribution
        #[arg(short, long, default_value_t = false)]
        simplify: bool,
    },

    /// Minimise a propositional formula
    Simplify {
        formula: String,

        /// The form to minimise to, by default whichever has fewer rows to cover
        #[arg(long, value_enum)]
        form: Option<NormalForm>,

        /// Minimise regardless of the atom limit
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Satisfiability of a propositional formula
    Sat {
        formula: String,

        /// List each model, up to the limit
        #[arg(short, long, default_value_t = false)]
        all: bool,

        /// The most models to list
        #[arg(long, requires = "all")]
        limit: Option<usize>,
    },

    /// Truth table of a propositional formula
    Table { formula: String },

    /// Check a quantified formula over the sort Human, with constants x and y and predicates P and Q
    Quantifier {
        #[arg(value_enum)]
        kind: Quantifier,

        /// The formula to check, by default the example of the kind
        #[arg(short, long)]
        formula: Option<String>,
    },

    /// Check a problem over the booleans P, Q, and R
    ///
    /// Problems are written in a restricted form of the Python API of an SMT solver, e.g.
    ///   And(Implies(P, Q), P)
    /// or a script of declarations and assertions, one per line.
    #[command(verbatim_doc_comment)]
    Solve {
        /// A prepared problem
        #[arg(short, long, value_enum)]
        example: Option<Problem>,

        /// The problem, as text
        #[arg(short, long, conflicts_with = "example")]
        formula: Option<String>,

        /// A file containing the problem
        #[arg(long, conflicts_with_all = ["example", "formula"])]
        file: Option<PathBuf>,
    },

    /// Whether socrates is mortal, given all humans are mortal and socrates is human
    Socrates,

    /// Solve x + y == 10 with x > y > 0 over the integers
    Arithmetic,

    /// Determine the satisfiability of a formula in DIMACS form
    Dimacs {
        /// The DIMACS file, possibly compressed with xz (given the xz feature)
        path: PathBuf,

        /// Write a model, if one is found
        #[arg(short, long, default_value_t = false)]
        model: bool,
    },

    /// A line-oriented session
    Interactive,
}

/// Options of a [Config], each checked against the bounds of the option.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Time limit for each check, in seconds, with 0 for no limit [default: 10]
    #[arg(long, global = true)]
    pub time_limit: Option<u64>,

    /// Largest universe to try for an uninterpreted sort
    #[arg(long, global = true)]
    pub domain_limit: Option<usize>,

    /// Width in bits of integer symbols
    #[arg(long, global = true)]
    pub int_width: Option<usize>,

    /// Most atoms to minimise without --force
    #[arg(long, global = true)]
    pub simplify_limit: Option<usize>,

    /// Most clauses distribution may produce
    #[arg(long, global = true)]
    pub cnf_limit: Option<usize>,

    /// The chance of choosing true when deciding an atom
    #[arg(long, global = true)]
    pub polarity_lean: Option<f64>,

    /// The chance of deciding on an atom at random
    #[arg(long, global = true)]
    pub random_decision_bias: Option<f64>,

    /// Permit restarts
    #[arg(long, global = true)]
    pub restarts: Option<bool>,

    /// Decide atoms on their previous value
    #[arg(long, global = true)]
    pub phase_saving: Option<bool>,

    /// Decide atoms of a unique polarity before others
    #[arg(long, global = true, default_value_t = false)]
    pub preprocessing: bool,
}

impl ConfigArgs {
    /// Updates `config` with each given option.
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(seconds) = self.time_limit {
            config.time_limit.set(std::time::Duration::from_secs(seconds))?;
        }
        if let Some(limit) = self.domain_limit {
            config.domain_limit.set(limit)?;
        }
        if let Some(width) = self.int_width {
            config.int_width.set(width)?;
        }
        if let Some(limit) = self.simplify_limit {
            config.simplify_atom_limit.set(limit)?;
        }
        if let Some(limit) = self.cnf_limit {
            config.cnf_clause_limit.set(limit)?;
        }
        if let Some(lean) = self.polarity_lean {
            config.polarity_lean.set(lean)?;
        }
        if let Some(bias) = self.random_decision_bias {
            config.random_decision_bias.set(bias)?;
        }
        if let Some(restarts) = self.restarts {
            config.restart.set(restarts)?;
        }
        if let Some(saving) = self.phase_saving {
            config.phase_saving.set(saving)?;
        }
        if self.preprocessing {
            config.preprocessing.set(true)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod args_tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn options_apply() {
        let cli = Cli::parse_from(["otter_logic", "--domain-limit", "6", "--restarts", "false", "socrates"]);
        let mut config = Config::default();
        assert!(cli.config.apply(&mut config).is_ok());
        assert_eq!(config.domain_limit.value, 6);
        assert!(!config.restart.value);
        assert!(matches!(cli.command, Some(Command::Socrates)));
    }

    #[test]
    fn time_limits() {
        let cli = Cli::parse_from(["otter_logic", "arithmetic"]);
        let mut config = otter_logic::lab::config();
        assert!(cli.config.apply(&mut config).is_ok());
        assert_eq!(config.time_limit(), Some(otter_logic::lab::TIME_LIMIT));

        let cli = Cli::parse_from(["otter_logic", "--time-limit", "0", "arithmetic"]);
        assert!(cli.config.apply(&mut config).is_ok());
        assert_eq!(config.time_limit(), None);
    }

    #[test]
    fn options_are_bounded() {
        let cli = Cli::parse_from(["otter_logic", "--polarity-lean", "2.0", "socrates"]);
        let mut config = Config::default();
        assert!(cli.config.apply(&mut config).is_err());
    }
}
