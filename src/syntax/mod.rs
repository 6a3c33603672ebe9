/*!
A small expression language, read by both the [propositional](crate::propositional) and [first-order](crate::first_order) parsers.

The language is a subset of Python expression syntax, as used to write formulas for a symbolic algebra system or an SMT solver, though nothing is ever evaluated.
Text is read to a [Syntax] tree, and each dialect then elaborates the tree to formulas of its own, rejecting whatever has no meaning in the dialect.

Operators follow Python precedence, from weakest to strongest:

| Operators | |
|---|---|
| `==` `!=` `<` `<=` `>` `>=` | comparison, not chained |
| `\|` | |
| `^` | |
| `&` | |
| `>>` `<<` | |
| `+` `-` | |
| `*` | |
| `-` `~` | unary |

```rust
# use otter_logic::syntax::{parse_expression, Syntax, BinaryOp};
let syntax = parse_expression("P >> Q & R").unwrap();
let Syntax::Binary(BinaryOp::And, left, _) = syntax else { panic!() };
assert!(matches!(*left, Syntax::Binary(BinaryOp::ShiftRight, _, _)));
```
*/

pub mod lexer;
mod parser;

pub use parser::{parse_expression, parse_statement};

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `~`
    Invert,

    /// `-`
    Negate,
}

/// Binary operators, other than comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `|`
    Or,

    /// `^`
    Xor,

    /// `&`
    And,

    /// `>>`
    ShiftRight,

    /// `<<`
    ShiftLeft,

    /// `+`
    Add,

    /// `-`
    Sub,

    /// `*`
    Mul,
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// A name, possibly dotted, e.g. `P` or `solver.add`.
    Name(String),

    Int(i64),

    Str(String),

    /// A list, e.g. `[x, y]`.
    List(Vec<Syntax>),

    /// An application of a (possibly dotted) name to arguments.
    Call(String, Vec<Syntax>),

    Unary(UnaryOp, Box<Syntax>),

    Binary(BinaryOp, Box<Syntax>, Box<Syntax>),

    Compare(CompareOp, Box<Syntax>, Box<Syntax>),
}

/// A statement, as a line of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// An assignment of an expression to one or more names, e.g. `x, y = Consts('x y', S)`.
    Assign(Vec<String>, Syntax),

    /// An expression.
    Expression(Syntax),
}
