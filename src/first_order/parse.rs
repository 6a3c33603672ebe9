/*!
Scripts, as declarations and assertions written in a restricted subset of the Python interface of an SMT solver.

A script is read one statement per line, and each statement is either a declaration or an assertion.
Nothing is evaluated: the only statements understood are those below.

Declarations:
- `S = DeclareSort('S')`
- `x = Const('x', S)` and `x, y = Consts('x y', S)`
- `x = Int('x')`, `x, y = Ints('x y')`, `P = Bool('P')`, `P, Q = Bools('P Q')`
- `f = Function('f', S, IntSort(), BoolSort())`, with the range last
- `s = Solver()`, which is noted and otherwise ignored
- `F = <formula>`, which names a formula (or term) for later use without asserting it

Any other statement is an assertion, optionally written as `s.add(...)` or `add(...)` to assert several formulas at once.
A call to `s.check()` is ignored.

Formulas are sort checked as they are read.

```rust
# use otter_logic::first_order::Script;
let script = Script::parse(
    "Human = DeclareSort('Human')
     socrates, x = Consts('socrates x', Human)
     human = Function('human', Human, BoolSort())
     mortal = Function('mortal', Human, BoolSort())
     s = Solver()
     s.add(ForAll([x], Implies(human(x), mortal(x))), human(socrates))",
)
.unwrap();

assert_eq!(script.assertions.len(), 2);
assert_eq!(script.assertions[1].to_string(), "human(socrates)");
assert!(Script::parse("x = Int('x')\nx + True").is_err());
```
*/

use std::collections::HashMap;

use crate::{
    first_order::{formula::Relation, Formula, Signature, Sort, Term},
    syntax::{parse_expression, parse_statement, BinaryOp, CompareOp, Statement, Syntax, UnaryOp},
    types::err::{ErrorKind, ParseError, SortError},
};

/// What a name of a script refers to.
#[derive(Clone, Debug)]
enum Entry {
    Sort(Sort),

    /// A declared symbol, by the name of the declaration.
    Symbol(String),

    Formula(Formula),

    Term(Term),

    Solver,
}

/// An expression read from a script, as a formula or a term.
enum Elaborated {
    Formula(Formula),
    Term(Term),
}

/// Declarations and assertions read from text.
#[derive(Clone, Debug, Default)]
pub struct Script {
    pub signature: Signature,
    pub assertions: Vec<Formula>,
    names: HashMap<String, Entry>,
}

impl Script {
    /// Reads a script from `text`.
    pub fn parse(text: &str) -> Result<Script, ErrorKind> {
        let mut script = Script::default();
        script.read(text)?;
        Ok(script)
    }

    /// An empty script in which each sort and symbol of `signature` is available under its own name.
    pub fn with_signature(signature: Signature) -> Script {
        let mut names = HashMap::default();
        for sort in signature.sorts() {
            names.insert(sort.to_string(), Entry::Sort(sort));
        }
        for declaration in signature.declarations() {
            names.insert(declaration.name.clone(), Entry::Symbol(declaration.name.clone()));
        }
        Script {
            signature,
            assertions: Vec::default(),
            names,
        }
    }

    /// Reads each line of `text` as a statement.
    pub fn read(&mut self, text: &str) -> Result<(), ErrorKind> {
        for line in text.lines() {
            if let Some(statement) = parse_statement(line)? {
                self.statement(statement)?;
            }
        }
        Ok(())
    }

    /// Reads `text` as a single formula, without asserting the formula.
    pub fn formula(&self, text: &str) -> Result<Formula, ErrorKind> {
        let syntax = parse_expression(text)?;
        let mut scope = Vec::default();
        self.elaborate_formula(&syntax, &mut scope, "the formula")
    }

    fn statement(&mut self, statement: Statement) -> Result<(), ErrorKind> {
        match statement {
            Statement::Assign(targets, syntax) => self.assign(targets, &syntax),

            Statement::Expression(Syntax::Call(name, args)) if is_method(&name, "add") => {
                let mut scope = Vec::default();
                for arg in &args {
                    let formula = self.elaborate_formula(arg, &mut scope, "an assertion")?;
                    self.assertions.push(formula);
                }
                Ok(())
            }

            Statement::Expression(Syntax::Call(name, _)) if is_method(&name, "check") => Ok(()),

            Statement::Expression(syntax) => {
                let mut scope = Vec::default();
                let formula = self.elaborate_formula(&syntax, &mut scope, "an assertion")?;
                self.assertions.push(formula);
                Ok(())
            }
        }
    }

    fn assign(&mut self, targets: Vec<String>, syntax: &Syntax) -> Result<(), ErrorKind> {
        let Syntax::Call(function, args) = syntax else {
            return self.assign_value(targets, syntax);
        };

        match function.as_str() {
            "DeclareSort" => {
                let [target] = single(&targets)?;
                let [name] = strings::<1>(function, args)?;
                let sort = self.signature.declare_sort(&name);
                self.names.insert(target, Entry::Sort(sort));
                Ok(())
            }

            "Const" | "Int" | "Bool" => {
                let [target] = single(&targets)?;
                let name = string_arg(function, args, 0)?;
                let sort = match function.as_str() {
                    "Int" => Sort::Int,
                    "Bool" => Sort::Bool,
                    _ => {
                        arity(function, args, 2)?;
                        self.sort(&args[1])?
                    }
                };
                self.declare(target, &name, Vec::default(), sort);
                Ok(())
            }

            "Consts" | "Ints" | "Bools" => {
                let names = string_arg(function, args, 0)?;
                let names = names.split_whitespace().collect::<Vec<_>>();
                if names.len() != targets.len() {
                    return Err(ErrorKind::from(ParseError::Arity {
                        name: function.clone(),
                        expected: targets.len(),
                        found: names.len(),
                    }));
                }
                let sort = match function.as_str() {
                    "Ints" => Sort::Int,
                    "Bools" => Sort::Bool,
                    _ => {
                        arity(function, args, 2)?;
                        self.sort(&args[1])?
                    }
                };
                for (target, name) in targets.into_iter().zip(names) {
                    self.declare(target, name, Vec::default(), sort.clone());
                }
                Ok(())
            }

            "Function" => {
                let [target] = single(&targets)?;
                let name = string_arg(function, args, 0)?;
                if args.len() < 3 {
                    return Err(ErrorKind::from(ParseError::Arity {
                        name: function.clone(),
                        expected: 3,
                        found: args.len(),
                    }));
                }
                let mut sorts = args[1..]
                    .iter()
                    .map(|arg| self.sort(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let range = sorts.pop().unwrap_or(Sort::Bool);
                self.declare(target, &name, sorts, range);
                Ok(())
            }

            "Solver" => {
                let [target] = single(&targets)?;
                self.names.insert(target, Entry::Solver);
                Ok(())
            }

            _ => self.assign_value(targets, syntax),
        }
    }

    /// Names the formula or term of `syntax`.
    fn assign_value(&mut self, targets: Vec<String>, syntax: &Syntax) -> Result<(), ErrorKind> {
        let [target] = single(&targets)?;
        let mut scope = Vec::default();
        let entry = match self.elaborate(syntax, &mut scope)? {
            Elaborated::Formula(formula) => Entry::Formula(formula),
            Elaborated::Term(term) => Entry::Term(term),
        };
        self.names.insert(target, entry);
        Ok(())
    }

    fn declare(&mut self, target: String, name: &str, domain: Vec<Sort>, range: Sort) {
        self.signature.declare(name, domain, range);
        self.names.insert(target, Entry::Symbol(name.to_string()));
    }

    /// The sort given by `syntax`.
    fn sort(&mut self, syntax: &Syntax) -> Result<Sort, ErrorKind> {
        match syntax {
            Syntax::Call(name, args) if args.is_empty() && name == "IntSort" => Ok(Sort::Int),
            Syntax::Call(name, args) if args.is_empty() && name == "BoolSort" => Ok(Sort::Bool),
            Syntax::Call(name, args) if name == "DeclareSort" => {
                let [sort_name] = strings::<1>(name, args)?;
                Ok(self.signature.declare_sort(&sort_name))
            }
            Syntax::Name(name) => match self.names.get(name) {
                Some(Entry::Sort(sort)) => Ok(sort.clone()),
                _ => Ok(self.signature.sort_named(name)?),
            },
            other => Err(ErrorKind::from(ParseError::Unsupported(format!(
                "expected a sort, found {other:?}"
            )))),
        }
    }

    fn elaborate_formula(
        &self,
        syntax: &Syntax,
        scope: &mut Vec<(String, Sort)>,
        context: &str,
    ) -> Result<Formula, ErrorKind> {
        match self.elaborate(syntax, scope)? {
            Elaborated::Formula(formula) => Ok(formula),
            Elaborated::Term(term) => Err(ErrorKind::from(SortError::Mismatch {
                expected: Sort::Bool.to_string(),
                found: self.sort_name(&term),
                context: context.to_string(),
            })),
        }
    }

    fn elaborate_term(
        &self,
        syntax: &Syntax,
        scope: &mut Vec<(String, Sort)>,
        context: &str,
    ) -> Result<Term, ErrorKind> {
        match self.elaborate(syntax, scope)? {
            Elaborated::Term(term) => Ok(term),
            Elaborated::Formula(_) => Err(ErrorKind::from(SortError::Mismatch {
                expected: "a term".to_string(),
                found: Sort::Bool.to_string(),
                context: context.to_string(),
            })),
        }
    }

    fn elaborate_int(
        &self,
        syntax: &Syntax,
        scope: &mut Vec<(String, Sort)>,
        context: &str,
    ) -> Result<Term, ErrorKind> {
        let term = self.elaborate_term(syntax, scope, context)?;
        self.expect_sort(&term, &Sort::Int, context)?;
        Ok(term)
    }

    fn sort_name(&self, term: &Term) -> String {
        match term.sort(&self.signature) {
            Some(sort) => sort.to_string(),
            None => "an unknown sort".to_string(),
        }
    }

    fn expect_sort(&self, term: &Term, expected: &Sort, context: &str) -> Result<(), ErrorKind> {
        match term.sort(&self.signature) {
            Some(sort) if sort == *expected => Ok(()),
            _ => Err(ErrorKind::from(SortError::Mismatch {
                expected: expected.to_string(),
                found: self.sort_name(term),
                context: context.to_string(),
            })),
        }
    }

    fn elaborate(
        &self,
        syntax: &Syntax,
        scope: &mut Vec<(String, Sort)>,
    ) -> Result<Elaborated, ErrorKind> {
        match syntax {
            Syntax::Name(name) => self.name(name, scope),

            Syntax::Int(value) => Ok(Elaborated::Term(Term::Int(*value))),

            Syntax::Str(_) | Syntax::List(_) => Err(ErrorKind::from(ParseError::Unsupported(
                "strings and lists may only be used in declarations and quantifiers".to_string(),
            ))),

            Syntax::Unary(UnaryOp::Invert, inner) => {
                let inner = self.elaborate_formula(inner, scope, "~")?;
                Ok(Elaborated::Formula(Formula::Not(Box::new(inner))))
            }

            Syntax::Unary(UnaryOp::Negate, inner) => match self.elaborate_int(inner, scope, "-")? {
                Term::Int(value) => Ok(Elaborated::Term(Term::Int(-value))),
                term => Ok(Elaborated::Term(Term::Neg(Box::new(term)))),
            },

            Syntax::Binary(op, left, right) => match op {
                BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => {
                    let context = match op {
                        BinaryOp::And => "&",
                        BinaryOp::Or => "|",
                        _ => "^",
                    };
                    let a = self.elaborate_formula(left, scope, context)?;
                    let b = self.elaborate_formula(right, scope, context)?;
                    Ok(Elaborated::Formula(match op {
                        BinaryOp::And => Formula::And(vec![a, b]),
                        BinaryOp::Or => Formula::Or(vec![a, b]),
                        _ => Formula::Xor(Box::new(a), Box::new(b)),
                    }))
                }

                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => {
                    let a = Box::new(self.elaborate_int(left, scope, "arithmetic")?);
                    let b = Box::new(self.elaborate_int(right, scope, "arithmetic")?);
                    Ok(Elaborated::Term(match op {
                        BinaryOp::Add => Term::Add(a, b),
                        BinaryOp::Sub => Term::Sub(a, b),
                        _ => Term::Mul(a, b),
                    }))
                }

                BinaryOp::ShiftLeft | BinaryOp::ShiftRight => Err(ErrorKind::from(
                    ParseError::Unsupported("shifts are not supported, use Implies".to_string()),
                )),
            },

            Syntax::Compare(op, left, right) => {
                let a = self.elaborate(left, scope)?;
                let b = self.elaborate(right, scope)?;
                self.compare(*op, a, b)
            }

            Syntax::Call(name, args) => self.call(name, args, scope),
        }
    }

    fn name(&self, name: &str, scope: &[(String, Sort)]) -> Result<Elaborated, ErrorKind> {
        if let Some((variable, sort)) = scope.iter().rev().find(|(variable, _)| variable == name) {
            return Ok(match sort {
                Sort::Bool => Elaborated::Formula(Formula::BoolVar(variable.clone())),
                _ => Elaborated::Term(Term::Var(variable.clone(), sort.clone())),
            });
        }

        match (name, self.names.get(name)) {
            (_, Some(Entry::Symbol(symbol))) => self.apply(symbol, Vec::default()),
            (_, Some(Entry::Formula(formula))) => Ok(Elaborated::Formula(formula.clone())),
            (_, Some(Entry::Term(term))) => Ok(Elaborated::Term(term.clone())),
            (_, Some(Entry::Sort(sort))) => Err(ErrorKind::from(ParseError::Unsupported(format!(
                "the sort {sort} is not a formula or term"
            )))),
            (_, Some(Entry::Solver)) => Err(ErrorKind::from(ParseError::Unsupported(format!(
                "the solver {name} is not a formula or term"
            )))),
            ("True", None) => Ok(Elaborated::Formula(Formula::True)),
            ("False", None) => Ok(Elaborated::Formula(Formula::False)),
            (_, None) => Err(ErrorKind::from(ParseError::UnknownName(name.to_string()))),
        }
    }

    /// The symbol `symbol` applied to `args`, as a predicate or a term.
    fn apply(&self, symbol: &str, args: Vec<Elaborated>) -> Result<Elaborated, ErrorKind> {
        let Some(declaration) = self.signature.declaration(symbol) else {
            return Err(ErrorKind::from(ParseError::UnknownName(symbol.to_string())));
        };
        if declaration.arity() != args.len() {
            return Err(ErrorKind::from(ParseError::Arity {
                name: symbol.to_string(),
                expected: declaration.arity(),
                found: args.len(),
            }));
        }

        let mut terms = Vec::with_capacity(args.len());
        for (index, (arg, sort)) in args.into_iter().zip(&declaration.domain).enumerate() {
            let context = format!("argument {} of {symbol}", index + 1);
            match arg {
                Elaborated::Term(term) => {
                    self.expect_sort(&term, sort, &context)?;
                    terms.push(term);
                }
                Elaborated::Formula(_) if *sort == Sort::Bool => {
                    return Err(ErrorKind::from(ParseError::Unsupported(format!(
                        "{context} has sort Bool, which is not supported as an argument"
                    ))));
                }
                Elaborated::Formula(_) => {
                    return Err(ErrorKind::from(SortError::Mismatch {
                        expected: sort.to_string(),
                        found: Sort::Bool.to_string(),
                        context,
                    }));
                }
            }
        }

        Ok(match declaration.range {
            Sort::Bool => Elaborated::Formula(Formula::Predicate(symbol.to_string(), terms)),
            _ => Elaborated::Term(Term::Apply(symbol.to_string(), terms)),
        })
    }

    fn compare(&self, op: CompareOp, a: Elaborated, b: Elaborated) -> Result<Elaborated, ErrorKind> {
        let relation = match op {
            CompareOp::Eq | CompareOp::NotEq => {
                let equality = match (a, b) {
                    (Elaborated::Formula(a), Elaborated::Formula(b)) => {
                        Formula::Iff(Box::new(a), Box::new(b))
                    }
                    (Elaborated::Term(a), Elaborated::Term(b)) => {
                        let sort = a.sort(&self.signature);
                        match &sort {
                            Some(sort) => self.expect_sort(&b, sort, "==")?,
                            None => {
                                return Err(ErrorKind::from(ParseError::UnknownName(a.to_string())))
                            }
                        }
                        Formula::Eq(a, b)
                    }
                    (Elaborated::Term(term), Elaborated::Formula(_))
                    | (Elaborated::Formula(_), Elaborated::Term(term)) => {
                        return Err(ErrorKind::from(SortError::Mismatch {
                            expected: Sort::Bool.to_string(),
                            found: self.sort_name(&term),
                            context: "==".to_string(),
                        }))
                    }
                };
                return Ok(Elaborated::Formula(match op {
                    CompareOp::Eq => equality,
                    _ => Formula::Not(Box::new(equality)),
                }));
            }
            CompareOp::Lt => Relation::Lt,
            CompareOp::Le => Relation::Le,
            CompareOp::Gt => Relation::Gt,
            CompareOp::Ge => Relation::Ge,
        };

        let int_of = |elaborated: Elaborated| -> Result<Term, ErrorKind> {
            match elaborated {
                Elaborated::Term(term) => {
                    self.expect_sort(&term, &Sort::Int, "a comparison")?;
                    Ok(term)
                }
                Elaborated::Formula(_) => Err(ErrorKind::from(SortError::Mismatch {
                    expected: Sort::Int.to_string(),
                    found: Sort::Bool.to_string(),
                    context: "a comparison".to_string(),
                })),
            }
        };
        let a = int_of(a)?;
        let b = int_of(b)?;
        Ok(Elaborated::Formula(Formula::Compare(relation, a, b)))
    }

    fn call(
        &self,
        name: &str,
        args: &[Syntax],
        scope: &mut Vec<(String, Sort)>,
    ) -> Result<Elaborated, ErrorKind> {
        match name {
            "And" | "Or" => {
                let args = match args {
                    [Syntax::List(items)] => items.as_slice(),
                    _ => args,
                };
                let formulas = args
                    .iter()
                    .map(|arg| self.elaborate_formula(arg, scope, name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Elaborated::Formula(match name {
                    "And" => Formula::And(formulas),
                    _ => Formula::Or(formulas),
                }))
            }

            "Not" => {
                arity(name, args, 1)?;
                let inner = self.elaborate_formula(&args[0], scope, name)?;
                Ok(Elaborated::Formula(Formula::Not(Box::new(inner))))
            }

            "Implies" | "Xor" => {
                arity(name, args, 2)?;
                let a = Box::new(self.elaborate_formula(&args[0], scope, name)?);
                let b = Box::new(self.elaborate_formula(&args[1], scope, name)?);
                Ok(Elaborated::Formula(match name {
                    "Implies" => Formula::Implies(a, b),
                    _ => Formula::Xor(a, b),
                }))
            }

            "If" => {
                arity(name, args, 3)?;
                let condition = Box::new(self.elaborate_formula(&args[0], scope, name)?);
                match self.elaborate(&args[1], scope)? {
                    Elaborated::Formula(then) => {
                        let otherwise = self.elaborate_formula(&args[2], scope, name)?;
                        Ok(Elaborated::Formula(Formula::Ite(
                            condition,
                            Box::new(then),
                            Box::new(otherwise),
                        )))
                    }
                    Elaborated::Term(then) => {
                        let otherwise = self.elaborate_term(&args[2], scope, name)?;
                        if let Some(sort) = then.sort(&self.signature) {
                            self.expect_sort(&otherwise, &sort, name)?;
                        }
                        Ok(Elaborated::Term(Term::Ite(
                            condition,
                            Box::new(then),
                            Box::new(otherwise),
                        )))
                    }
                }
            }

            "Distinct" => {
                let mut terms = Vec::with_capacity(args.len());
                for arg in args {
                    let term = self.elaborate_term(arg, scope, name)?;
                    if let Some(sort) = terms.first().and_then(|t: &Term| t.sort(&self.signature)) {
                        self.expect_sort(&term, &sort, name)?;
                    }
                    terms.push(term);
                }
                Ok(Elaborated::Formula(Formula::Distinct(terms)))
            }

            "ForAll" | "Exists" => self.quantifier(name, args, scope),

            _ => match self.names.get(name) {
                Some(Entry::Symbol(symbol)) => {
                    let args = args
                        .iter()
                        .map(|arg| self.elaborate(arg, scope))
                        .collect::<Result<Vec<_>, _>>()?;
                    self.apply(symbol, args)
                }
                Some(Entry::Sort(sort)) => Err(ErrorKind::from(ParseError::Unsupported(format!(
                    "{name} is the sort {sort}, and a sort is not a predicate"
                )))),
                _ => Err(ErrorKind::from(ParseError::UnknownName(name.to_string()))),
            },
        }
    }

    fn quantifier(
        &self,
        name: &str,
        args: &[Syntax],
        scope: &mut Vec<(String, Sort)>,
    ) -> Result<Elaborated, ErrorKind> {
        arity(name, args, 2)?;
        let variables = match &args[0] {
            Syntax::List(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };

        let mut bindings = Vec::with_capacity(variables.len());
        for variable in variables {
            let Syntax::Name(variable) = variable else {
                return Err(ErrorKind::from(ParseError::Unsupported(format!(
                    "{name} binds constants, given by name"
                ))));
            };
            let declaration = match self.names.get(variable) {
                Some(Entry::Symbol(symbol)) => self.signature.declaration(symbol),
                _ => None,
            };
            match declaration {
                Some(declaration) if declaration.is_constant() => {
                    bindings.push((variable.clone(), declaration.range.clone()));
                }
                _ => {
                    return Err(ErrorKind::from(ParseError::Unsupported(format!(
                        "{name} binds constants, and {variable} is not a constant"
                    ))))
                }
            }
        }

        let depth = scope.len();
        scope.extend(bindings.iter().cloned());
        let body = self.elaborate_formula(&args[1], scope, name);
        scope.truncate(depth);
        let body = Box::new(body?);

        Ok(Elaborated::Formula(match name {
            "ForAll" => Formula::ForAll(bindings, body),
            _ => Formula::Exists(bindings, body),
        }))
    }
}

/// True if `name` is `method` or a call of `method` on some object.
fn is_method(name: &str, method: &str) -> bool {
    name == method || name.rsplit_once('.').is_some_and(|(_, last)| last == method)
}

fn arity(name: &str, args: &[Syntax], expected: usize) -> Result<(), ErrorKind> {
    match args.len() == expected {
        true => Ok(()),
        false => Err(ErrorKind::from(ParseError::Arity {
            name: name.to_string(),
            expected,
            found: args.len(),
        })),
    }
}

/// The single target of an assignment.
fn single(targets: &[String]) -> Result<[String; 1], ErrorKind> {
    match targets {
        [target] => Ok([target.clone()]),
        _ => Err(ErrorKind::from(ParseError::Unsupported(format!(
            "expected a single name to assign, found {}",
            targets.len()
        )))),
    }
}

/// The string argument at `index`.
fn string_arg(function: &str, args: &[Syntax], index: usize) -> Result<String, ErrorKind> {
    match args.get(index) {
        Some(Syntax::Str(string)) => Ok(string.clone()),
        Some(_) => Err(ErrorKind::from(ParseError::Unsupported(format!(
            "argument {} of {function} should be a quoted name",
            index + 1
        )))),
        None => Err(ErrorKind::from(ParseError::Arity {
            name: function.to_string(),
            expected: index + 1,
            found: args.len(),
        })),
    }
}

/// Exactly `N` string arguments.
fn strings<const N: usize>(function: &str, args: &[Syntax]) -> Result<[String; N], ErrorKind> {
    arity(function, args, N)?;
    let mut strings: [String; N] = std::array::from_fn(|_| String::default());
    for (index, string) in strings.iter_mut().enumerate() {
        *string = string_arg(function, args, index)?;
    }
    Ok(strings)
}

#[cfg(test)]
mod script_tests {
    use super::*;

    #[test]
    fn declarations() {
        let script = Script::parse(
            "S = DeclareSort('S')
             a, b = Consts('a b', S)
             n = Int('n')
             P, Q = Bools('P Q')
             f = Function('f', S, IntSort())
             g = Function('g', S, S, BoolSort())",
        )
        .unwrap();

        let signature = &script.signature;
        assert_eq!(signature.declaration("a").unwrap().range, Sort::Uninterpreted("S".to_string()));
        assert_eq!(signature.declaration("n").unwrap().range, Sort::Int);
        assert_eq!(signature.declaration("Q").unwrap().range, Sort::Bool);
        assert_eq!(signature.declaration("f").unwrap().range, Sort::Int);
        assert_eq!(signature.declaration("g").unwrap().arity(), 2);
        assert!(script.assertions.is_empty());
    }

    #[test]
    fn assertions() {
        let script = Script::parse(
            "x, y = Ints('x y')
             s = Solver()
             s.add(x + y == 10, x > y, x > 0, y > 0)
             s.check()
             P = Bool('P')
             Q = Bool('Q')
             F = And(Implies(P, Q), P)
             F
             P != Q
             Distinct(x, y, -3)",
        )
        .unwrap();

        let displayed = script
            .assertions
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            displayed,
            vec![
                "x + y == 10",
                "x > y",
                "x > 0",
                "y > 0",
                "And(Implies(P, Q), P)",
                "Not(P == Q)",
                "Distinct(x, y, -3)",
            ]
        );
    }

    #[test]
    fn quantifiers_bind_constants() {
        let script = Script::parse(
            "H = DeclareSort('H')
             x, y = Consts('x y', H)
             P = Function('P', H, BoolSort())
             ForAll([x], Implies(P(x), Exists(y, P(y))))
             P(x)",
        )
        .unwrap();

        let Formula::ForAll(bindings, _) = &script.assertions[0] else {
            panic!("expected a universal");
        };
        assert_eq!(bindings[0].0, "x");
        assert!(script.assertions[0].symbols().iter().eq(["P"]));
        assert_eq!(script.assertions[1].symbols().len(), 2);
    }

    #[test]
    fn errors() {
        let base = "H = DeclareSort('H')\nx = Const('x', H)\nn = Int('n')\nP = Function('P', H, BoolSort())\n";
        let cases = [
            "P(n)",
            "P(x, x)",
            "x + 1 == n",
            "Human(x)",
            "P(y)",
            "n",
            "ForAll([P], P(x))",
            "__import__('os')",
            "Consts('a b c', H)",
        ];
        for case in cases {
            let text = format!("{base}{case}");
            assert!(Script::parse(&text).is_err(), "{case}");
        }

        assert!(matches!(
            Script::parse(&format!("{base}P(n)")),
            Err(ErrorKind::Sort(SortError::Mismatch { .. }))
        ));
        assert!(matches!(
            Script::parse(&format!("{base}P(x, x)")),
            Err(ErrorKind::Parse(ParseError::Arity { expected: 1, found: 2, .. }))
        ));
    }

    #[test]
    fn preset_signature() {
        let mut signature = Signature::default();
        let human = signature.declare_sort("Human");
        signature.declare("x", vec![], human.clone());
        signature.declare("P", vec![human], Sort::Bool);

        let script = Script::with_signature(signature);
        let formula = script.formula("Exists([x], P(x))").unwrap();
        assert_eq!(formula.to_string(), "Exists(x, P(x))");
    }
}
