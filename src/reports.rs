/*!
The verdict of a solve.

A [Report] is the answer of the SAT [context](crate::context).
First-order checks answer with a [CheckResult](crate::first_order::CheckResult) instead, as an unknown result there usually follows from a bound rather than a timeout.
*/

use crate::context::ContextState;

/// Whether the clauses of a context have a model.
#[derive(PartialEq, Eq, Clone, Copy, Debug, serde::Serialize)]
pub enum Report {
    Satisfiable,

    Unsatisfiable,

    /// The most recent solve stopped before a verdict, e.g. on reaching the time limit.
    Unknown,
}

impl Report {
    /// The exit code conventional for the verdict among SAT solvers: 10, 20, or 30 for unknown.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Satisfiable => 10,
            Self::Unsatisfiable => 20,
            Self::Unknown => 30,
        }
    }
}

impl From<ContextState> for Report {
    fn from(state: ContextState) -> Self {
        match state {
            ContextState::Satisfiable => Self::Satisfiable,
            ContextState::Unsatisfiable => Self::Unsatisfiable,
            ContextState::Input | ContextState::Solving => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = match self {
            Self::Satisfiable => "Satisfiable",
            Self::Unsatisfiable => "Unsatisfiable",
            Self::Unknown => "Unknown",
        };
        write!(f, "{verdict}")
    }
}
