use std::fmt::Display;
use std::io::Write;

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use serde::Serialize;

use otter_logic::{first_order::CheckResult, propositional::Assignment};

/// A propositional formula together with some form of the formula.
#[derive(Serialize)]
pub struct Form {
    pub input: String,
    pub form: &'static str,
    pub output: String,
}

impl Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.form, self.output)
    }
}

/// Models of a propositional formula.
#[derive(Serialize)]
#[serde(transparent)]
pub struct Models(pub Vec<Assignment>);

impl Display for Models {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "Unsatisfiable"),
            models => {
                let lines = models.iter().map(|model| model.to_string()).collect::<Vec<_>>();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}

/// Writes `value` to `out` as pretty JSON, or through [Display].
pub fn emit<T: Serialize + Display>(
    out: &mut impl Write,
    value: &T,
    json: bool,
) -> Result<(), crate::CliError> {
    match json {
        true => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        false => writeln!(out, "{value}")?,
    }
    Ok(())
}

/// The colour of a result, on a terminal.
pub fn colour_of(result: CheckResult) -> Color {
    match result {
        CheckResult::Sat => Color::Green,
        CheckResult::Unsat => Color::Red,
        CheckResult::Unknown => Color::Yellow,
    }
}

/// Writes `text` in `colour` and then resets the colour, or writes plain `text` if not `styled`.
pub fn coloured(
    out: &mut impl Write,
    styled: bool,
    colour: Color,
    text: impl Display,
) -> std::io::Result<()> {
    match styled {
        true => {
            out.queue(SetForegroundColor(colour))?;
            out.queue(Print(text))?;
            out.queue(ResetColor)?;
        }
        false => write!(out, "{text}")?,
    }
    Ok(())
}
