#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::{IsTerminal, Write};

use clap::{CommandFactory, Parser};

use otter_logic::{
    config::Config,
    lab::{
        self,
        first_order::{analyse_quantified, arithmetic, socrates, solve_problem},
        propositional::{analyse, DEFAULT_FORMULA, EXAMPLES},
    },
    propositional::{all_models, parse, satisfiable, simplify_logic, to_cnf, to_dnf, truth_table},
    types::err::ErrorKind,
};

mod args;
mod dimacs;
mod interactive;
mod render;

use args::{Cli, Command};
use render::{emit, Form, Models};

/// Errors which end the cli.
#[derive(Debug)]
pub enum CliError {
    Logic(ErrorKind),
    Io(std::io::Error),
    Json(serde_json::Error),
    Unsupported(&'static str),
}

impl From<ErrorKind> for CliError {
    fn from(e: ErrorKind) -> Self {
        CliError::Logic(e)
    }
}

impl From<otter_logic::types::err::ConfigError> for CliError {
    fn from(e: otter_logic::types::err::ConfigError) -> Self {
        CliError::Logic(ErrorKind::from(e))
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logic(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "{e}"),
            Self::Unsupported(what) => write!(f, "{what}"),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return;
    }

    let mut config = lab::config();
    if let Err(e) = cli.config.apply(&mut config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };

    match run(command, config, cli.json) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Runs `command`, returning the exit code.
fn run(command: Command, config: Config, json: bool) -> Result<i32, CliError> {
    let mut out = std::io::stdout().lock();

    match command {
        Command::Analyse {
            formula,
            example,
            list,
        } => {
            if list {
                for (index, example) in EXAMPLES.iter().enumerate() {
                    writeln!(out, "{index}: {example}")?;
                }
                return Ok(0);
            }
            let text = match (formula, example) {
                (Some(formula), _) => formula,
                (None, Some(index)) => match EXAMPLES.get(index) {
                    Some(example) => example.to_string(),
                    None => return Err(CliError::Unsupported("no example has the given index")),
                },
                (None, None) => DEFAULT_FORMULA.to_string(),
            };
            emit(&mut out, &analyse(&text, &config)?, json)?;
        }

        Command::Cnf { formula, simplify } => {
            let expr = parse(&formula)?;
            let form = Form {
                input: expr.to_string(),
                form: "CNF",
                output: to_cnf(&expr, simplify, &config)?.to_string(),
            };
            emit(&mut out, &form, json)?;
        }

        Command::Dnf { formula, simplify } => {
            let expr = parse(&formula)?;
            let form = Form {
                input: expr.to_string(),
                form: "DNF",
                output: to_dnf(&expr, simplify, &config)?.to_string(),
            };
            emit(&mut out, &form, json)?;
        }

        Command::Simplify {
            formula,
            form,
            force,
        } => {
            let expr = parse(&formula)?;
            let form = Form {
                input: expr.to_string(),
                form: "Simplified",
                output: simplify_logic(&expr, form, force, &config)?.to_string(),
            };
            emit(&mut out, &form, json)?;
        }

        Command::Sat {
            formula,
            all,
            limit,
        } => {
            let expr = parse(&formula)?;
            let models = match all {
                true => {
                    let limit = limit.unwrap_or(config.model_limit.value);
                    all_models(&expr, limit, &config)?
                }
                false => satisfiable(&expr, &config)?.into_iter().collect(),
            };
            emit(&mut out, &Models(models), json)?;
        }

        Command::Table { formula } => {
            let expr = parse(&formula)?;
            emit(&mut out, &truth_table(&expr, &config)?, json)?;
        }

        Command::Quantifier { kind, formula } => {
            let analysis = analyse_quantified(kind, formula.as_deref(), &config)?;
            emit(&mut out, &analysis, json)?;
        }

        Command::Solve {
            example,
            formula,
            file,
        } => {
            let text = match (example, formula, file) {
                (Some(problem), _, _) => problem.formula().to_string(),
                (None, Some(formula), _) => formula,
                (None, None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None, None) => "And(P, Q)".to_string(),
            };
            emit(&mut out, &solve_problem(&text, &config)?, json)?;
        }

        Command::Socrates => emit(&mut out, &socrates(&config)?, json)?,

        Command::Arithmetic => emit(&mut out, &arithmetic(&config)?, json)?,

        Command::Dimacs { path, model } => {
            drop(out);
            return dimacs::solve_file(&path, model, config);
        }

        Command::Interactive => {
            let styled = std::io::stdout().is_terminal();
            interactive::session(std::io::stdin().lock(), &mut out, &config, styled)?;
        }
    }

    Ok(0)
}
