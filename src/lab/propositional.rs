//! Analysis of a propositional formula.

use serde::Serialize;

use crate::{
    config::Config,
    propositional::{parse, satisfiable, simplify_logic, to_cnf, to_dnf, Assignment},
    types::err::ErrorKind,
};

/// Formulas offered for analysis.
pub const EXAMPLES: [&str; 6] = [
    "P & Q",
    "P | Q",
    "P >> Q",
    "~(P & Q)",
    "(P >> Q) & (Q >> R)",
    "P & ~P",
];

pub const DEFAULT_FORMULA: &str = "(P >> Q) & (Q >> R)";

/// The forms of a formula, and a model of the formula if one exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub input: String,
    pub cnf: String,
    pub dnf: String,
    pub simplified: String,

    /// A model, or none if the formula is unsatisfiable.
    pub satisfiable: Option<Assignment>,
}

/// Analyses the formula written as `text`.
pub fn analyse(text: &str, config: &Config) -> Result<Analysis, ErrorKind> {
    let expr = parse(text)?;

    Ok(Analysis {
        input: expr.to_string(),
        cnf: to_cnf(&expr, false, config)?.to_string(),
        dnf: to_dnf(&expr, false, config)?.to_string(),
        simplified: simplify_logic(&expr, None, false, config)?.to_string(),
        satisfiable: satisfiable(&expr, config)?,
    })
}

impl std::fmt::Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Input:        {}", self.input)?;
        writeln!(f, "CNF:          {}", self.cnf)?;
        writeln!(f, "DNF:          {}", self.dnf)?;
        writeln!(f, "Simplified:   {}", self.simplified)?;
        match &self.satisfiable {
            Some(model) => write!(f, "Satisfiable:  {model}"),
            None => write!(f, "Satisfiable:  Unsatisfiable"),
        }
    }
}

#[cfg(test)]
mod propositional_lab_tests {
    use super::*;

    #[test]
    fn examples() {
        let config = Config::default();
        for example in EXAMPLES {
            let analysis = analyse(example, &config).unwrap();
            assert_eq!(analysis.satisfiable.is_none(), example == "P & ~P");
        }
    }

    #[test]
    fn chain() {
        let analysis = analyse(DEFAULT_FORMULA, &Config::default()).unwrap();
        assert_eq!(analysis.cnf, "(Q | ~P) & (R | ~Q)");

        let config = Config::default();
        let simplified = parse(&analysis.simplified).unwrap();
        assert!(crate::propositional::is_dnf(&simplified));
        assert!(crate::propositional::equivalent(&simplified, &parse(DEFAULT_FORMULA).unwrap(), &config).unwrap());

        let model = analysis.satisfiable.unwrap();
        let value = |name: &str| model.get(name).unwrap();
        assert!(!value("P") || value("Q"));
        assert!(!value("Q") || value("R"));
    }

    #[test]
    fn contradiction() {
        let analysis = analyse("P & ~P", &Config::default()).unwrap();
        assert_eq!(analysis.input, "False");
        assert!(analysis.to_string().ends_with("Satisfiable:  Unsatisfiable"));
    }

    #[test]
    fn parse_errors() {
        assert!(analyse("P &", &Config::default()).is_err());
    }
}
