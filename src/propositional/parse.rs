//! Reading propositional formulas from text.
//!
//! The dialect is that of a symbolic algebra system:
//! - `~`, `&`, `|`, `^` are negation, conjunction, disjunction, and exclusive disjunction.
//! - `P >> Q` is `Implies(P, Q)` and `P << Q` is `Implies(Q, P)`.
//! - Functions `And`, `Or`, `Not`, `Implies`, `Equivalent`, `Xor`, `Nand`, `Nor`, `Xnor`, and `ITE` may be applied.
//! - `True` and `False` (or `true` and `false`) are constants, and any other name is an atom.
//!
//! Numerals and comparisons have no propositional meaning, and are errors.
//!
//! ```rust
//! # use otter_logic::propositional::parse;
//! let formula = parse("(P >> Q) & (Q >> R)").unwrap();
//! assert_eq!(formula.to_string(), "Implies(P, Q) & Implies(Q, R)");
//!
//! assert!(parse("x > 1").is_err());
//! ```

use crate::{
    propositional::Expr,
    syntax::{parse_expression, BinaryOp, Syntax, UnaryOp},
    types::err::{ErrorKind, ParseError},
};

/// Parses `text` as a propositional formula.
pub fn parse(text: &str) -> Result<Expr, ErrorKind> {
    let syntax = parse_expression(text)?;
    Ok(elaborate(&syntax)?)
}

/// Elaborates a syntax tree to a formula.
fn elaborate(syntax: &Syntax) -> Result<Expr, ParseError> {
    match syntax {
        Syntax::Name(name) => match name.as_str() {
            "True" | "true" => Ok(Expr::True),
            "False" | "false" => Ok(Expr::False),
            _ if name.contains('.') => Err(ParseError::Unsupported(format!(
                "'{name}' is not a propositional atom"
            ))),
            _ => Ok(Expr::atom(name)),
        },

        Syntax::Int(int) => Err(ParseError::Unsupported(format!(
            "the numeral {int} has no propositional meaning"
        ))),

        Syntax::Str(_) | Syntax::List(_) => Err(ParseError::Unsupported(
            "strings and lists have no propositional meaning".to_string(),
        )),

        Syntax::Compare(..) => Err(ParseError::Unsupported(
            "relational expressions have no propositional meaning".to_string(),
        )),

        Syntax::Unary(UnaryOp::Invert, inner) => Ok(Expr::not(elaborate(inner)?)),

        Syntax::Unary(UnaryOp::Negate, _) => Err(ParseError::Unsupported(
            "unary minus has no propositional meaning, use ~ for negation".to_string(),
        )),

        Syntax::Binary(op, left, right) => {
            let left = elaborate(left)?;
            let right = elaborate(right)?;
            match op {
                BinaryOp::And => Ok(Expr::and(vec![left, right])),
                BinaryOp::Or => Ok(Expr::or(vec![left, right])),
                BinaryOp::Xor => Ok(Expr::xor(vec![left, right])),
                BinaryOp::ShiftRight => Ok(Expr::implies(left, right)),
                BinaryOp::ShiftLeft => Ok(Expr::implies(right, left)),
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => Err(ParseError::Unsupported(
                    "arithmetic has no propositional meaning".to_string(),
                )),
            }
        }

        Syntax::Call(name, arguments) => {
            let args = arguments
                .iter()
                .map(elaborate)
                .collect::<Result<Vec<_>, _>>()?;
            apply(name, args)
        }
    }
}

/// Applies the function `name` to `args`.
fn apply(name: &str, mut args: Vec<Expr>) -> Result<Expr, ParseError> {
    let arity = |expected: usize, args: &[Expr]| match args.len() == expected {
        true => Ok(()),
        false => Err(ParseError::Arity {
            name: name.to_string(),
            expected,
            found: args.len(),
        }),
    };

    match name {
        "And" => Ok(Expr::and(args)),
        "Or" => Ok(Expr::or(args)),
        "Xor" => Ok(Expr::xor(args)),
        "Nand" => Ok(Expr::not(Expr::and(args))),
        "Nor" => Ok(Expr::not(Expr::or(args))),
        "Xnor" => Ok(Expr::not(Expr::xor(args))),
        "Equivalent" => Ok(Expr::equivalent(args)),

        "Not" => {
            arity(1, &args)?;
            Ok(Expr::not(args.remove(0)))
        }

        "Implies" => {
            arity(2, &args)?;
            let consequent = args.remove(1);
            Ok(Expr::implies(args.remove(0), consequent))
        }

        "ITE" => {
            arity(3, &args)?;
            let otherwise = args.remove(2);
            let then = args.remove(1);
            Ok(Expr::ite(args.remove(0), then, otherwise))
        }

        _ => Err(ParseError::UnknownName(name.to_string())),
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn examples() {
        let cases = [
            ("P & Q", "P & Q"),
            ("P | Q", "P | Q"),
            ("P >> Q", "Implies(P, Q)"),
            ("P << Q", "Implies(Q, P)"),
            ("~(P & Q)", "~(P & Q)"),
            ("(P >> Q) & (Q >> R)", "Implies(P, Q) & Implies(Q, R)"),
            ("P & ~P", "False"),
            ("Equivalent(P, Q)", "Equivalent(P, Q)"),
            ("Nand(P, Q)", "~(P & Q)"),
            ("ITE(P, Q, R)", "ITE(P, Q, R)"),
            ("P & true", "P"),
        ];
        for (text, display) in cases {
            assert_eq!(parse(text).unwrap().to_string(), display, "{text}");
        }
    }

    #[test]
    fn shift_binds_tighter_than_and() {
        assert_eq!(
            parse("P & Q >> R").unwrap(),
            Expr::and(vec![
                Expr::atom("P"),
                Expr::implies(Expr::atom("Q"), Expr::atom("R"))
            ])
        );
    }

    #[test]
    fn errors() {
        assert!(matches!(
            parse("Not(P, Q)"),
            Err(ErrorKind::Parse(ParseError::Arity { expected: 1, found: 2, .. }))
        ));
        assert!(matches!(
            parse("Foo(P)"),
            Err(ErrorKind::Parse(ParseError::UnknownName(_)))
        ));
        assert!(matches!(
            parse("P + 1"),
            Err(ErrorKind::Parse(ParseError::Unsupported(_)))
        ));
        assert!(matches!(parse(""), Err(ErrorKind::Parse(ParseError::Empty))));
    }
}
