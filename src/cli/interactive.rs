use std::io::{BufRead, Write};

use crossterm::style::Color;

use otter_logic::{
    config::Config,
    first_order::CheckResult,
    lab::{
        first_order::{analyse_quantified, arithmetic, socrates, solve_problem, Problem, Quantifier},
        propositional::{analyse, DEFAULT_FORMULA, EXAMPLES},
    },
    types::err::ErrorKind,
};

use crate::render::{colour_of, coloured};

const HELP: &str = "Enter a formula to analyse it in the current mode, or an empty line for the example of the mode.

:propositional            propositional formulas, e.g. (P >> Q) & (Q >> R)
:universal                quantified formulas over Human, x, y, P, and Q
:existential
:combined
:solve                    problems over the booleans P, Q, and R
:examples                 examples of the current mode
:socrates                 whether socrates is mortal
:arithmetic               x + y == 10 with x > y > 0
:help
:quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Propositional,
    Quantified(Quantifier),
    Solve,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Propositional => write!(f, "propositional"),
            Mode::Quantified(kind) => write!(f, "{}", kind.to_string().to_lowercase()),
            Mode::Solve => write!(f, "solve"),
        }
    }
}

/// Reads lines from `input` until the end of input or a quit, writing a response to each line to `out`.
///
/// Responses are coloured only if `styled`.
pub fn session(
    input: impl BufRead,
    out: &mut impl Write,
    config: &Config,
    styled: bool,
) -> std::io::Result<()> {
    let mut mode = Mode::Propositional;
    writeln!(out, "Type :help for commands.")?;
    prompt(out, styled, mode)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        match line {
            ":quit" | ":q" => break,
            ":help" => writeln!(out, "{HELP}")?,
            ":propositional" => mode = Mode::Propositional,
            ":universal" => mode = Mode::Quantified(Quantifier::Universal),
            ":existential" => mode = Mode::Quantified(Quantifier::Existential),
            ":combined" => mode = Mode::Quantified(Quantifier::Combined),
            ":solve" => mode = Mode::Solve,
            ":examples" => examples(out, mode)?,
            ":socrates" => respond(
                out,
                styled,
                socrates(config).map(|s| (s.to_string(), None)),
            )?,
            ":arithmetic" => respond(
                out,
                styled,
                arithmetic(config).map(|a| (a.to_string(), Some(a.result))),
            )?,
            command if command.starts_with(':') => {
                coloured(out, styled, Color::Red, format!("Unknown command {command}"))?;
                writeln!(out)?;
            }
            text => run(out, styled, mode, text, config)?,
        }

        prompt(out, styled, mode)?;
    }
    writeln!(out)?;
    out.flush()
}

fn prompt(out: &mut impl Write, styled: bool, mode: Mode) -> std::io::Result<()> {
    coloured(out, styled, Color::Cyan, format!("[{mode}]> "))?;
    out.flush()
}

fn examples(out: &mut impl Write, mode: Mode) -> std::io::Result<()> {
    match mode {
        Mode::Propositional => {
            for example in EXAMPLES {
                writeln!(out, "  {example}")?;
            }
        }
        Mode::Quantified(kind) => writeln!(out, "  {}", kind.default_formula())?,
        Mode::Solve => {
            for problem in [Problem::Contradiction, Problem::Tautology, Problem::ModusPonens] {
                writeln!(out, "  {}", problem.formula())?;
            }
        }
    }
    Ok(())
}

fn run(
    out: &mut impl Write,
    styled: bool,
    mode: Mode,
    text: &str,
    config: &Config,
) -> std::io::Result<()> {
    match mode {
        Mode::Propositional => {
            let text = match text.is_empty() {
                true => DEFAULT_FORMULA,
                false => text,
            };
            respond(out, styled, analyse(text, config).map(|a| (a.to_string(), None)))
        }

        Mode::Quantified(kind) => {
            let text = match text.is_empty() {
                true => None,
                false => Some(text),
            };
            respond(
                out,
                styled,
                analyse_quantified(kind, text, config).map(|a| (a.to_string(), Some(a.result))),
            )
        }

        Mode::Solve => {
            let text = match text.is_empty() {
                true => Problem::ModusPonens.formula(),
                false => text,
            };
            respond(
                out,
                styled,
                solve_problem(text, config).map(|s| (s.to_string(), Some(s.result))),
            )
        }
    }
}

/// Writes a report, coloured by the result if there is one, or an error.
fn respond(
    out: &mut impl Write,
    styled: bool,
    response: Result<(String, Option<CheckResult>), ErrorKind>,
) -> std::io::Result<()> {
    match response {
        Ok((report, Some(result))) => coloured(out, styled, colour_of(result), report)?,
        Ok((report, None)) => write!(out, "{report}")?,
        Err(e) => coloured(out, styled, Color::Red, format!("Error: {e}"))?,
    }
    writeln!(out)
}
