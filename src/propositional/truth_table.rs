//! Truth tables of formulas.
//!
//! Rows are over the atoms of a formula in order, with the first atom varying slowest and false before true.

use crate::{
    config::Config,
    propositional::Expr,
    types::err::{ErrorKind, TransformError},
};

/// A row of a truth table, as the values of the atoms and the value of the formula.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Row {
    pub values: Vec<bool>,
    pub result: bool,
}

/// The truth table of a formula.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TruthTable {
    pub atoms: Vec<String>,
    pub rows: Vec<Row>,
}

impl TruthTable {
    /// A count of rows on which the formula is true.
    pub fn true_count(&self) -> usize {
        self.rows.iter().filter(|row| row.result).count()
    }
}

/// The truth table of `expr`.
///
/// Tables are built for at most [Config::simplify_atom_limit](crate::config::Config::simplify_atom_limit) atoms.
///
/// ```rust
/// # use otter_logic::config::Config;
/// # use otter_logic::propositional::{parse, truth_table};
/// let table = truth_table(&parse("P >> Q").unwrap(), &Config::default()).unwrap();
/// assert_eq!(table.rows.len(), 4);
/// assert_eq!(table.true_count(), 3);
/// ```
pub fn truth_table(expr: &Expr, config: &Config) -> Result<TruthTable, ErrorKind> {
    let atoms = expr.atoms().into_iter().collect::<Vec<_>>();
    let limit = config.simplify_atom_limit.value;
    if atoms.len() > limit {
        return Err(ErrorKind::from(TransformError::TooManyAtoms {
            count: atoms.len(),
            limit,
        }));
    }

    let width = atoms.len();
    let rows = (0..1_usize << width)
        .map(|index| {
            let values = (0..width)
                .map(|position| index & (1 << (width - 1 - position)) != 0)
                .collect::<Vec<_>>();
            let value_of = |name: &str| match atoms.iter().position(|atom| atom == name) {
                Some(position) => values[position],
                None => false,
            };
            let result = expr.evaluate(&value_of);
            Row { values, result }
        })
        .collect();

    Ok(TruthTable { atoms, rows })
}

impl std::fmt::Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths = self
            .atoms
            .iter()
            .map(|atom| atom.len().max(1))
            .collect::<Vec<_>>();

        for (atom, width) in self.atoms.iter().zip(&widths) {
            write!(f, "{atom:<width$} ")?;
        }
        writeln!(f, "| result")?;

        for row in &self.rows {
            for (value, width) in row.values.iter().zip(&widths) {
                let mark = if *value { "T" } else { "F" };
                write!(f, "{mark:<width$} ")?;
            }
            match row.result {
                true => writeln!(f, "| T")?,
                false => writeln!(f, "| F")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod truth_table_tests {
    use crate::propositional::parse;

    use super::*;

    #[test]
    fn display() {
        let table = truth_table(&parse("P & Q").unwrap(), &Config::default()).unwrap();
        assert_eq!(
            table.to_string(),
            "P Q | result\nF F | F\nF T | F\nT F | F\nT T | T\n"
        );
    }

    #[test]
    fn constant_table() {
        let table = truth_table(&Expr::True, &Config::default()).unwrap();
        assert!(table.atoms.is_empty());
        assert_eq!(table.rows, vec![Row { values: vec![], result: true }]);
    }

    #[test]
    fn limit() {
        let mut config = Config::default();
        config.simplify_atom_limit.value = 2;
        assert!(matches!(
            truth_table(&parse("P & Q & R").unwrap(), &config),
            Err(ErrorKind::Transform(TransformError::TooManyAtoms { count: 3, limit: 2 }))
        ));
    }
}
