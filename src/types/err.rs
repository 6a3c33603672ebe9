//! Error types used in the library.
//!
//! - Most errors are external, e.g. a formula which fails to parse, or a sort mismatch in an application.
//!   These are returned to the caller and rendered through [Display](std::fmt::Display).
//! - Some errors are internal and very unlikely to occur, e.g. a conflict clause without a reason during analysis.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use std::fmt;

/// The error type of the library, wrapping the specific errors of each part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    AtomDB(AtomDBError),
    Build(BuildError),
    ClauseDB(ClauseDBError),
    Config(ConfigError),
    FirstOrder(FirstOrderError),
    Parse(ParseError),
    Sort(SortError),
    Transform(TransformError),

    /// A method was called on a context in a state which does not support the method.
    InvalidState,
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// A literal on the trail was expected to have been propagated from some clause, though no clause was recorded.
    MissingReason,

    /// The clause a key was expected to refer to is missing from the clause database.
    MissingClause,

    /// Resolution ran off the end of the trail.
    EmptyTrail,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors when building a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A clear instance of an unsatisfiable clause, e.g. a unit clause which conflicts with the (level zero) valuation.
    Unsatisfiable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// A literal refers to an atom which is not part of the context.
    UnknownAtom,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors when revising a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The value given for the named option is outside of the bounds of the option.
    OutOfBounds { name: &'static str, min: String, max: String },
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Errors from the first-order solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FirstOrderError {
    /// A construct outside of the fragment supported by grounding.
    Unsupported(String),

    /// An attempt to pop more scopes than have been pushed.
    PopEmpty,

    /// A model was requested, though the last check was not satisfiable.
    NoModel,

    /// Evaluation of a quantifier over an infinite sort, or similar.
    Evaluation(String),
}

impl From<FirstOrderError> for ErrorKind {
    fn from(e: FirstOrderError) -> Self {
        ErrorKind::FirstOrder(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// An empty string, where some non-empty string was required.
    Empty,

    /// A character which is not part of the language, at the given (character) position.
    UnexpectedCharacter { position: usize, character: char },

    /// A token which does not fit the grammar at the given position.
    UnexpectedToken { position: usize, found: String },

    /// The input ended where more was expected.
    UnexpectedEnd,

    /// A name which has not been declared, or is otherwise unknown.
    UnknownName(String),

    /// A function was applied to the wrong number of arguments.
    Arity { name: String, expected: usize, found: usize },

    /// Some construct which parses, but has no meaning in the current dialect.
    Unsupported(String),

    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// A negation character was read, but no candidate for negation was found.
    Negation,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors when checking the sorts of a first-order expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortError {
    /// An expression of the first sort was required, but the expression has the second sort.
    Mismatch { expected: String, found: String, context: String },

    /// A sort name was used which has not been declared.
    UnknownSort(String),
}

impl From<SortError> for ErrorKind {
    fn from(e: SortError) -> Self {
        ErrorKind::Sort(e)
    }
}

/// Errors when transforming propositional formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformError {
    /// Distribution would produce more clauses (or terms) than permitted.
    Blowup { limit: usize },

    /// The formula has more atoms than a truth table is built for.
    TooManyAtoms { count: usize, limit: usize },

    /// A solve ended without determining satisfiability, e.g. as the time limit was reached.
    Undetermined,
}

impl From<TransformError> for ErrorKind {
    fn from(e: TransformError) -> Self {
        ErrorKind::Transform(e)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analysis(e) => write!(f, "analysis failed: {e:?}"),
            Self::AtomDB(AtomDBError::AtomsExhausted) => write!(f, "no fresh atoms remain"),
            Self::Build(BuildError::Unsatisfiable) => write!(f, "the formula is trivially unsatisfiable"),
            Self::ClauseDB(ClauseDBError::EmptyClause) => write!(f, "an empty clause was given"),
            Self::ClauseDB(ClauseDBError::UnknownAtom) => write!(f, "a literal refers to an unknown atom"),
            Self::Config(e) => write!(f, "{e}"),
            Self::FirstOrder(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Sort(e) => write!(f, "{e}"),
            Self::Transform(e) => write!(f, "{e}"),
            Self::InvalidState => write!(f, "the context is not in a state which supports the request"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { name, min, max } => {
                write!(f, "{name} requires a value between {min} and {max}")
            }
        }
    }
}

impl fmt::Display for FirstOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
            Self::PopEmpty => write!(f, "pop without a matching push"),
            Self::NoModel => write!(f, "model is not available"),
            Self::Evaluation(what) => write!(f, "evaluation failed: {what}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::UnexpectedCharacter { position, character } => {
                write!(f, "unexpected character '{character}' at position {position}")
            }
            Self::UnexpectedToken { position, found } => {
                write!(f, "unexpected '{found}' at position {position}")
            }
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::UnknownName(name) => write!(f, "name '{name}' is not defined"),
            Self::Arity { name, expected, found } => {
                write!(f, "{name} takes {expected} argument(s) but {found} were given")
            }
            Self::Unsupported(what) => write!(f, "{what}"),
            Self::ProblemSpecification => write!(f, "malformed DIMACS problem line"),
            Self::Line(line) => write!(f, "unable to parse line {line}"),
            Self::Negation => write!(f, "negation without an atom"),
        }
    }
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { expected, found, context } => {
                write!(f, "sort mismatch in {context}: expected {expected}, found {found}")
            }
            Self::UnknownSort(name) => write!(f, "unknown sort '{name}'"),
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blowup { limit } => {
                write!(f, "conversion would exceed {limit} clauses, try the simplified form")
            }
            Self::TooManyAtoms { count, limit } => {
                write!(f, "{count} atoms exceeds the limit of {limit} for a truth table")
            }
            Self::Undetermined => write!(f, "satisfiability was not determined"),
        }
    }
}

impl std::error::Error for ErrorKind {}
