/*!
Grounding of first-order assertions onto a SAT [context](crate::context), for fixed universe sizes.

- An element of an uninterpreted sort with a universe of `n` elements is a one-hot vector of `n` literals, and the `i`th element of the universe is the vector with [TOP](CLiteral::TOP) at `i` and [BOTTOM](CLiteral::BOTTOM) elsewhere.
- Each symbol has a table with a cell for each tuple of arguments.
  A cell of a predicate is a literal, a cell with an uninterpreted range is a one-hot vector with exactly one literal true, and a cell with range Int is a [bit vector](crate::encode::bits) of the configured integer width.
- An application selects a cell by the arguments, and as the elements of quantified variables are constant the selection of a cell is usually resolved when encoding.
- Quantifiers are expanded over universes.

Quantifiers over Int, and symbols with an Int or Bool argument, are not supported.
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    config::Config,
    context::Context,
    encode::bits::BitVector,
    first_order::{
        formula::{Binding, Relation},
        model::{FunctionTable, Model, Value},
        Formula, Signature, Sort, Term,
    },
    misc::log::targets,
    structures::literal::CLiteral,
    types::err::{ErrorKind, FirstOrderError},
};

/// A grounded term.
#[derive(Clone, Debug)]
enum Grounded {
    /// A one-hot vector over the universe of the sort.
    Element(Vec<CLiteral>),

    Int(BitVector),
}

/// A cell of a symbol table.
#[derive(Clone, Debug)]
enum Cell {
    Bool(CLiteral),
    Element(Vec<CLiteral>),
    Int(BitVector),
}

/// The cells of a symbol, one for each tuple of arguments.
struct Table {
    domain: Vec<Sort>,
    range: Sort,
    cells: Vec<Cell>,
}

/// The value of a bound variable.
#[derive(Clone, Debug)]
enum Bound {
    Bool(CLiteral),
    Element(Vec<CLiteral>),
}

type Env = Vec<(String, Bound)>;

/// A context together with the tables of symbols for some universe sizes.
pub struct Grounding {
    pub context: Context,
    universes: BTreeMap<Sort, usize>,
    tables: BTreeMap<String, Table>,
}

/// The `index`th element of a universe of `size` elements.
fn element(index: usize, size: usize) -> Vec<CLiteral> {
    (0..size)
        .map(|position| match position == index {
            true => CLiteral::TOP,
            false => CLiteral::BOTTOM,
        })
        .collect()
}

fn unsupported(what: String) -> ErrorKind {
    ErrorKind::from(FirstOrderError::Unsupported(what))
}

impl Grounding {
    /// A grounding with tables for each of `symbols`, where `universes` gives the size of each uninterpreted sort.
    pub fn new(
        signature: &Signature,
        symbols: &BTreeSet<String>,
        universes: BTreeMap<Sort, usize>,
        config: &Config,
    ) -> Result<Self, ErrorKind> {
        let mut grounding = Grounding {
            context: Context::from_config(config.clone()),
            universes,
            tables: BTreeMap::default(),
        };

        for name in symbols {
            let Some(declaration) = signature.declaration(name) else {
                return Err(unsupported(format!("the symbol {name} is not declared")));
            };
            let table = grounding.table(name, &declaration.domain, &declaration.range)?;
            grounding.tables.insert(name.clone(), table);
        }

        log::debug!(target: targets::GROUND,
            "Grounded {} symbols over {:?} with {} atoms",
            grounding.tables.len(), grounding.universes, grounding.context.atom_count()
        );
        Ok(grounding)
    }

    fn size_of(&self, sort: &Sort) -> Result<usize, ErrorKind> {
        match self.universes.get(sort) {
            Some(size) => Ok(*size),
            None => Err(unsupported(format!("no universe is given for the sort {sort}"))),
        }
    }

    fn table(&mut self, name: &str, domain: &[Sort], range: &Sort) -> Result<Table, ErrorKind> {
        let mut tuples = 1_usize;
        for sort in domain {
            match sort {
                Sort::Uninterpreted(_) => tuples *= self.size_of(sort)?,
                _ => {
                    return Err(unsupported(format!(
                        "{name} has an argument of sort {sort}, and only uninterpreted sorts are supported as arguments"
                    )))
                }
            }
        }

        let mut cells = Vec::with_capacity(tuples);
        for _ in 0..tuples {
            let cell = match range {
                Sort::Bool => Cell::Bool(self.context.fresh_literal()?),
                Sort::Int => Cell::Int(self.context.bv_fresh(self.context.config.int_width.value)?),
                Sort::Uninterpreted(_) => {
                    let size = self.size_of(range)?;
                    match size {
                        1 => Cell::Element(vec![CLiteral::TOP]),
                        _ => {
                            let mut bits = Vec::with_capacity(size);
                            for _ in 0..size {
                                bits.push(self.context.fresh_literal()?);
                            }
                            self.context.assert_exactly_one(&bits)?;
                            Cell::Element(bits)
                        }
                    }
                }
            };
            cells.push(cell);
        }

        Ok(Table {
            domain: domain.to_vec(),
            range: range.clone(),
            cells,
        })
    }

    /// Asserts `formula` holds.
    pub fn assert(&mut self, formula: &Formula) -> Result<(), ErrorKind> {
        let mut env = Env::default();
        let literal = self.formula(formula, &mut env)?;
        self.context.assert_literal(literal)
    }

    fn formula(&mut self, formula: &Formula, env: &mut Env) -> Result<CLiteral, ErrorKind> {
        match formula {
            Formula::True => Ok(CLiteral::TOP),
            Formula::False => Ok(CLiteral::BOTTOM),

            Formula::Predicate(name, args) => match self.apply(name, args, env)? {
                Cell::Bool(literal) => Ok(literal),
                _ => Err(unsupported(format!("{name} is not a predicate"))),
            },

            Formula::BoolVar(name) => match env.iter().rev().find(|(variable, _)| variable == name) {
                Some((_, Bound::Bool(literal))) => Ok(*literal),
                _ => Err(unsupported(format!("the variable {name} is not a bound Bool"))),
            },

            Formula::Not(inner) => Ok(-self.formula(inner, env)?),

            Formula::And(args) => {
                let literals = self.formulas(args, env)?;
                self.context.and_gate(&literals)
            }

            Formula::Or(args) => {
                let literals = self.formulas(args, env)?;
                self.context.or_gate(&literals)
            }

            Formula::Xor(a, b) => {
                let a = self.formula(a, env)?;
                let b = self.formula(b, env)?;
                self.context.xor_gate(a, b)
            }

            Formula::Implies(a, b) => {
                let a = self.formula(a, env)?;
                let b = self.formula(b, env)?;
                self.context.implies_gate(a, b)
            }

            Formula::Iff(a, b) => {
                let a = self.formula(a, env)?;
                let b = self.formula(b, env)?;
                self.context.iff_gate(a, b)
            }

            Formula::Ite(condition, then, otherwise) => {
                let c = self.formula(condition, env)?;
                let t = self.formula(then, env)?;
                let e = self.formula(otherwise, env)?;
                self.context.ite_gate(c, t, e)
            }

            Formula::Eq(a, b) => {
                let a = self.term(a, env)?;
                let b = self.term(b, env)?;
                self.equal(&a, &b)
            }

            Formula::Distinct(args) => {
                let terms = args
                    .iter()
                    .map(|arg| self.term(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut distinctions = Vec::default();
                for (index, a) in terms.iter().enumerate() {
                    for b in &terms[index + 1..] {
                        distinctions.push(-self.equal(a, b)?);
                    }
                }
                self.context.and_gate(&distinctions)
            }

            Formula::Compare(relation, a, b) => {
                let a = self.int(a, env)?;
                let b = self.int(b, env)?;
                match relation {
                    Relation::Lt => self.context.bv_lt(&a, &b),
                    Relation::Le => self.context.bv_le(&a, &b),
                    Relation::Gt => self.context.bv_lt(&b, &a),
                    Relation::Ge => self.context.bv_le(&b, &a),
                }
            }

            Formula::ForAll(bindings, body) | Formula::Exists(bindings, body) => {
                let universal = matches!(formula, Formula::ForAll(..));
                let mut instances = Vec::default();
                self.expand(bindings, body, env, &mut instances)?;
                log::trace!(target: targets::GROUND, "Expanded {formula} to {} instances", instances.len());
                match universal {
                    true => self.context.and_gate(&instances),
                    false => self.context.or_gate(&instances),
                }
            }
        }
    }

    fn formulas(&mut self, formulas: &[Formula], env: &mut Env) -> Result<Vec<CLiteral>, ErrorKind> {
        formulas.iter().map(|f| self.formula(f, env)).collect()
    }

    /// Grounds `body` on each assignment of elements to the variables of `bindings`.
    fn expand(
        &mut self,
        bindings: &[Binding],
        body: &Formula,
        env: &mut Env,
        instances: &mut Vec<CLiteral>,
    ) -> Result<(), ErrorKind> {
        let Some(((variable, sort), rest)) = bindings.split_first() else {
            instances.push(self.formula(body, env)?);
            return Ok(());
        };

        let values = match sort {
            Sort::Bool => vec![Bound::Bool(CLiteral::BOTTOM), Bound::Bool(CLiteral::TOP)],
            Sort::Uninterpreted(_) => {
                let size = self.size_of(sort)?;
                (0..size).map(|index| Bound::Element(element(index, size))).collect()
            }
            Sort::Int => {
                return Err(unsupported(format!(
                    "the variable {variable} is quantified over Int"
                )))
            }
        };

        for value in values {
            env.push((variable.clone(), value));
            let result = self.expand(rest, body, env, instances);
            env.pop();
            result?;
        }
        Ok(())
    }

    fn term(&mut self, term: &Term, env: &mut Env) -> Result<Grounded, ErrorKind> {
        match term {
            Term::Var(name, _) => match env.iter().rev().find(|(variable, _)| variable == name) {
                Some((_, Bound::Element(bits))) => Ok(Grounded::Element(bits.clone())),
                _ => Err(unsupported(format!("the variable {name} is not a bound element"))),
            },

            Term::Apply(name, args) => match self.apply(name, args, env)? {
                Cell::Element(bits) => Ok(Grounded::Element(bits)),
                Cell::Int(bits) => Ok(Grounded::Int(bits)),
                Cell::Bool(_) => Err(unsupported(format!("{name} is a predicate, not a term"))),
            },

            Term::Int(value) => Ok(Grounded::Int(self.context.bv_const(*value))),

            Term::Neg(inner) => {
                let inner = self.int(inner, env)?;
                Ok(Grounded::Int(self.context.bv_neg(&inner)?))
            }

            Term::Add(a, b) | Term::Sub(a, b) | Term::Mul(a, b) => {
                let a = self.int(a, env)?;
                let b = self.int(b, env)?;
                let result = match term {
                    Term::Add(..) => self.context.bv_add(&a, &b)?,
                    Term::Sub(..) => self.context.bv_sub(&a, &b)?,
                    _ => self.context.bv_mul(&a, &b)?,
                };
                Ok(Grounded::Int(result))
            }

            Term::Ite(condition, then, otherwise) => {
                let c = self.formula(condition, env)?;
                let t = self.term(then, env)?;
                let e = self.term(otherwise, env)?;
                match (t, e) {
                    (Grounded::Int(t), Grounded::Int(e)) => Ok(Grounded::Int(self.context.bv_ite(c, &t, &e)?)),
                    (Grounded::Element(t), Grounded::Element(e)) => {
                        let mut bits = Vec::with_capacity(t.len());
                        for (t_bit, e_bit) in t.iter().zip(&e) {
                            bits.push(self.context.ite_gate(c, *t_bit, *e_bit)?);
                        }
                        Ok(Grounded::Element(bits))
                    }
                    _ => Err(unsupported(format!("the branches of {term} differ in sort"))),
                }
            }
        }
    }

    fn int(&mut self, term: &Term, env: &mut Env) -> Result<BitVector, ErrorKind> {
        match self.term(term, env)? {
            Grounded::Int(bits) => Ok(bits),
            Grounded::Element(_) => Err(unsupported(format!("{term} is not an integer"))),
        }
    }

    fn equal(&mut self, a: &Grounded, b: &Grounded) -> Result<CLiteral, ErrorKind> {
        match (a, b) {
            (Grounded::Int(a), Grounded::Int(b)) => self.context.bv_eq(a, b),
            (Grounded::Element(a), Grounded::Element(b)) => {
                let mut agreements = Vec::with_capacity(a.len());
                for (a_bit, b_bit) in a.iter().zip(b) {
                    agreements.push(self.context.and_gate(&[*a_bit, *b_bit])?);
                }
                self.context.or_gate(&agreements)
            }
            _ => Err(unsupported("an equality between different sorts".to_string())),
        }
    }

    /// The cell of `name` selected by `args`.
    fn apply(&mut self, name: &str, args: &[Term], env: &mut Env) -> Result<Cell, ErrorKind> {
        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            match self.term(arg, env)? {
                Grounded::Element(bits) => arguments.push(bits),
                Grounded::Int(_) => {
                    return Err(unsupported(format!("{name} is applied to an integer")))
                }
            }
        }

        let Some(table) = self.tables.get(name) else {
            return Err(unsupported(format!("{name} has no table")));
        };
        let range = table.range.clone();

        // Selectors paired with cells, for each tuple which may be selected.
        let mut selected = Vec::default();
        for (index, cell) in table.cells.clone().into_iter().enumerate() {
            let mut remainder = index;
            let mut positions = vec![0; arguments.len()];
            for (position, bits) in positions.iter_mut().zip(&arguments).rev() {
                *position = remainder % bits.len().max(1);
                remainder /= bits.len().max(1);
            }

            let bits = positions
                .iter()
                .zip(&arguments)
                .map(|(position, bits)| bits[*position])
                .collect::<Vec<_>>();
            let selector = self.context.and_gate(&bits)?;
            match selector {
                CLiteral::BOTTOM => {}
                CLiteral::TOP => return Ok(cell),
                _ => selected.push((selector, cell)),
            }
        }

        match range {
            Sort::Bool => {
                let mut options = Vec::with_capacity(selected.len());
                for (selector, cell) in &selected {
                    if let Cell::Bool(literal) = cell {
                        options.push(self.context.and_gate(&[*selector, *literal])?);
                    }
                }
                Ok(Cell::Bool(self.context.or_gate(&options)?))
            }

            Sort::Uninterpreted(_) => {
                let size = self.size_of(&range)?;
                let mut bits = Vec::with_capacity(size);
                for bit in 0..size {
                    let mut options = Vec::with_capacity(selected.len());
                    for (selector, cell) in &selected {
                        if let Cell::Element(cell_bits) = cell {
                            options.push(self.context.and_gate(&[*selector, cell_bits[bit]])?);
                        }
                    }
                    bits.push(self.context.or_gate(&options)?);
                }
                Ok(Cell::Element(bits))
            }

            Sort::Int => {
                let mut result = vec![CLiteral::BOTTOM];
                for (selector, cell) in selected.iter().rev() {
                    if let Cell::Int(cell_bits) = cell {
                        result = self.context.bv_ite(*selector, cell_bits, &result)?;
                    }
                }
                Ok(Cell::Int(result))
            }
        }
    }

    /// The model given by the current valuation of the context.
    pub fn model(&self) -> Model {
        let mut model = Model::default();
        for (sort, size) in &self.universes {
            model.universes.insert(sort.to_string(), *size);
        }

        for (name, table) in &self.tables {
            let values = table
                .cells
                .iter()
                .map(|cell| self.cell_value(cell, &table.range))
                .collect::<Vec<_>>();

            if table.domain.is_empty() {
                if let Some(value) = values.into_iter().next() {
                    model.constants.insert(name.clone(), value);
                }
                continue;
            }

            let sizes = table
                .domain
                .iter()
                .map(|sort| self.universes.get(sort).copied().unwrap_or(1))
                .collect::<Vec<_>>();
            let rows = values
                .into_iter()
                .enumerate()
                .map(|(index, value)| {
                    let mut remainder = index;
                    let mut args = Vec::with_capacity(sizes.len());
                    for (sort, size) in table.domain.iter().zip(&sizes).rev() {
                        args.push(Value::Element {
                            sort: sort.to_string(),
                            index: remainder % size,
                        });
                        remainder /= size;
                    }
                    args.reverse();
                    (args, value)
                })
                .collect();
            if let Some(function) = FunctionTable::from_rows(rows) {
                model.functions.insert(name.clone(), function);
            }
        }
        model
    }

    fn cell_value(&self, cell: &Cell, range: &Sort) -> Value {
        let literal_value = |literal: CLiteral| {
            self.context.atom_db.literal_value(literal).unwrap_or(false)
        };
        match cell {
            Cell::Bool(literal) => Value::Bool(literal_value(*literal)),
            Cell::Int(bits) => Value::Int(self.context.bv_value(bits)),
            Cell::Element(bits) => Value::Element {
                sort: range.to_string(),
                index: bits.iter().position(|bit| literal_value(*bit)).unwrap_or(0),
            },
        }
    }
}

#[cfg(test)]
mod ground_tests {
    use crate::{first_order::Script, reports::Report};

    use super::*;

    fn ground(text: &str, size: usize) -> Grounding {
        let script = Script::parse(text).unwrap();
        let symbols = script
            .assertions
            .iter()
            .flat_map(|a| a.symbols())
            .collect::<BTreeSet<_>>();
        let universes = script.signature.sorts().map(|sort| (sort, size)).collect();
        let mut grounding =
            Grounding::new(&script.signature, &symbols, universes, &Config::default()).unwrap();
        for assertion in &script.assertions {
            grounding.assert(assertion).unwrap();
        }
        grounding
    }

    const PIGEONS: &str = "H = DeclareSort('H')
        a, b, c, x = Consts('a b c x', H)
        Distinct(a, b, c)";

    #[test]
    fn pigeonhole() {
        assert_eq!(ground(PIGEONS, 2).context.solve(), Ok(Report::Unsatisfiable));

        let mut grounding = ground(PIGEONS, 3);
        assert_eq!(grounding.context.solve(), Ok(Report::Satisfiable));
        let model = grounding.model();
        let values = ["a", "b", "c"].map(|name| model.get(name).cloned());
        assert!(values[0] != values[1] && values[1] != values[2] && values[0] != values[2]);
    }

    #[test]
    fn functions_are_functional() {
        let text = "H = DeclareSort('H')
            a, b, x = Consts('a b x', H)
            f = Function('f', H, H)
            a == b
            Not(f(a) == f(b))";
        assert_eq!(ground(text, 3).context.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn integer_tables() {
        let text = "H = DeclareSort('H')
            a, b = Consts('a b', H)
            age = Function('age', H, IntSort())
            age(a) == 30
            age(b) == age(a) + 5";
        let mut grounding = ground(text, 2);
        assert_eq!(grounding.context.solve(), Ok(Report::Satisfiable));

        let model = grounding.model();
        let b = Term::Apply("b".to_string(), vec![]);
        let age_of_b = Term::Apply("age".to_string(), vec![b]);
        assert_eq!(model.evaluate_term(&age_of_b), Ok(Value::Int(35)));
    }

    #[test]
    fn int_quantifier_is_unsupported() {
        let script = Script::parse("n = Int('n')\nForAll([n], n == n)").unwrap();
        let mut grounding = Grounding::new(
            &script.signature,
            &BTreeSet::default(),
            BTreeMap::default(),
            &Config::default(),
        )
        .unwrap();
        assert!(matches!(
            grounding.assert(&script.assertions[0]),
            Err(ErrorKind::FirstOrder(FirstOrderError::Unsupported(_)))
        ));
    }
}
