//! A recursive descent parser, with one method for each level of precedence.

use crate::{
    syntax::{
        lexer::{tokenize, Token},
        BinaryOp, CompareOp, Statement, Syntax, UnaryOp,
    },
    types::err::ParseError,
};

/// Parses `input` as a single expression.
pub fn parse_expression(input: &str) -> Result<Syntax, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { tokens, index: 0 };
    let syntax = parser.comparison()?;
    parser.finish()?;
    Ok(syntax)
}

/// Parses `input` as a statement, or returns none if `input` is blank (or only a comment).
pub fn parse_statement(input: &str) -> Result<Option<Statement>, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let assign_at = tokens.iter().position(|(_, token)| *token == Token::Assign);
    let Some(assign_at) = assign_at else {
        let mut parser = Parser { tokens, index: 0 };
        let syntax = parser.comparison()?;
        parser.finish()?;
        return Ok(Some(Statement::Expression(syntax)));
    };

    let mut targets = Vec::default();
    for (index, (position, token)) in tokens[..assign_at].iter().enumerate() {
        match (index % 2, token) {
            (0, Token::Name(name)) => targets.push(name.clone()),
            (1, Token::Comma) => {}
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: *position,
                    found: token.to_string(),
                })
            }
        }
    }
    if targets.is_empty() {
        return Err(ParseError::UnexpectedToken {
            position: tokens[assign_at].0,
            found: Token::Assign.to_string(),
        });
    }

    let mut parser = Parser {
        tokens: tokens[assign_at + 1..].to_vec(),
        index: 0,
    };
    let value = parser.comparison()?;
    parser.finish()?;
    Ok(Some(Statement::Assign(targets, value)))
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    index: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(_, token)| token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).map(|(_, token)| token.clone());
        self.index += 1;
        token
    }

    fn unexpected(&self) -> ParseError {
        match self.tokens.get(self.index) {
            Some((position, token)) => ParseError::UnexpectedToken {
                position: *position,
                found: token.to_string(),
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) if *token == expected => {
                self.index += 1;
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    fn finish(&self) -> Result<(), ParseError> {
        match self.index < self.tokens.len() {
            true => Err(self.unexpected()),
            false => Ok(()),
        }
    }

    fn comparison(&mut self) -> Result<Syntax, ParseError> {
        let left = self.or()?;
        let op = match self.peek() {
            Some(Token::Eq) => CompareOp::Eq,
            Some(Token::NotEq) => CompareOp::NotEq,
            Some(Token::Lt) => CompareOp::Lt,
            Some(Token::Le) => CompareOp::Le,
            Some(Token::Gt) => CompareOp::Gt,
            Some(Token::Ge) => CompareOp::Ge,
            _ => return Ok(left),
        };
        self.index += 1;
        let right = self.or()?;

        if matches!(
            self.peek(),
            Some(Token::Eq | Token::NotEq | Token::Lt | Token::Le | Token::Gt | Token::Ge)
        ) {
            return Err(ParseError::Unsupported(
                "chained comparisons".to_string(),
            ));
        }

        Ok(Syntax::Compare(op, Box::new(left), Box::new(right)))
    }

    /// A left-associative chain of operands from `operand`, joined by operators chosen by `op_of`.
    fn chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Syntax, ParseError>,
        op_of: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Syntax, ParseError> {
        let mut left = operand(self)?;
        while let Some(op) = self.peek().and_then(op_of) {
            self.index += 1;
            let right = operand(self)?;
            left = Syntax::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn or(&mut self) -> Result<Syntax, ParseError> {
        self.chain(Self::xor, |token| match token {
            Token::Pipe => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn xor(&mut self) -> Result<Syntax, ParseError> {
        self.chain(Self::and, |token| match token {
            Token::Caret => Some(BinaryOp::Xor),
            _ => None,
        })
    }

    fn and(&mut self) -> Result<Syntax, ParseError> {
        self.chain(Self::shift, |token| match token {
            Token::Amp => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn shift(&mut self) -> Result<Syntax, ParseError> {
        self.chain(Self::sum, |token| match token {
            Token::ShiftRight => Some(BinaryOp::ShiftRight),
            Token::ShiftLeft => Some(BinaryOp::ShiftLeft),
            _ => None,
        })
    }

    fn sum(&mut self) -> Result<Syntax, ParseError> {
        self.chain(Self::product, |token| match token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn product(&mut self) -> Result<Syntax, ParseError> {
        self.chain(Self::unary, |token| match token {
            Token::Star => Some(BinaryOp::Mul),
            _ => None,
        })
    }

    fn unary(&mut self) -> Result<Syntax, ParseError> {
        match self.peek() {
            Some(Token::Tilde) => {
                self.index += 1;
                Ok(Syntax::Unary(UnaryOp::Invert, Box::new(self.unary()?)))
            }
            Some(Token::Minus) => {
                self.index += 1;
                Ok(Syntax::Unary(UnaryOp::Negate, Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.index += 1;
                self.unary()
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<Syntax, ParseError> {
        let error = self.unexpected();
        match self.advance() {
            Some(Token::Int(int)) => Ok(Syntax::Int(int)),

            Some(Token::Str(string)) => Ok(Syntax::Str(string)),

            Some(Token::LParen) => {
                let inner = self.comparison()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }

            Some(Token::LBracket) => {
                let items = self.items(Token::RBracket)?;
                Ok(Syntax::List(items))
            }

            Some(Token::Name(mut name)) => {
                while self.peek() == Some(&Token::Dot) {
                    self.index += 1;
                    match self.advance() {
                        Some(Token::Name(part)) => {
                            name.push('.');
                            name.push_str(&part);
                        }
                        _ => {
                            self.index -= 1;
                            return Err(self.unexpected());
                        }
                    }
                }

                match self.peek() {
                    Some(Token::LParen) => {
                        self.index += 1;
                        let arguments = self.items(Token::RParen)?;
                        Ok(Syntax::Call(name, arguments))
                    }
                    _ => Ok(Syntax::Name(name)),
                }
            }

            _ => Err(error),
        }
    }

    /// Comma separated expressions up to `close`, permitting a trailing comma.
    fn items(&mut self, close: Token) -> Result<Vec<Syntax>, ParseError> {
        let mut items = Vec::default();
        loop {
            if self.peek() == Some(&close) {
                self.index += 1;
                return Ok(items);
            }
            items.push(self.comparison()?);
            match self.peek() {
                Some(Token::Comma) => self.index += 1,
                Some(token) if *token == close => {}
                _ => return Err(self.unexpected()),
            }
        }
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn name(n: &str) -> Syntax {
        Syntax::Name(n.to_string())
    }

    fn binary(op: BinaryOp, left: Syntax, right: Syntax) -> Syntax {
        Syntax::Binary(op, Box::new(left), Box::new(right))
    }

    #[test]
    fn python_precedence() {
        assert_eq!(
            parse_expression("P | Q & R").unwrap(),
            binary(
                BinaryOp::Or,
                name("P"),
                binary(BinaryOp::And, name("Q"), name("R"))
            )
        );

        assert_eq!(
            parse_expression("P & Q >> R").unwrap(),
            binary(
                BinaryOp::And,
                name("P"),
                binary(BinaryOp::ShiftRight, name("Q"), name("R"))
            )
        );

        assert_eq!(
            parse_expression("~P ^ Q").unwrap(),
            binary(
                BinaryOp::Xor,
                Syntax::Unary(UnaryOp::Invert, Box::new(name("P"))),
                name("Q")
            )
        );
    }

    #[test]
    fn calls_and_lists() {
        assert_eq!(
            parse_expression("ForAll([x], Implies(P(x), Q(x)))").unwrap(),
            Syntax::Call(
                "ForAll".to_string(),
                vec![
                    Syntax::List(vec![name("x")]),
                    Syntax::Call(
                        "Implies".to_string(),
                        vec![
                            Syntax::Call("P".to_string(), vec![name("x")]),
                            Syntax::Call("Q".to_string(), vec![name("x")]),
                        ]
                    ),
                ]
            )
        );

        assert_eq!(
            parse_expression("solver.add(x > 0,)").unwrap(),
            Syntax::Call(
                "solver.add".to_string(),
                vec![Syntax::Compare(
                    CompareOp::Gt,
                    Box::new(name("x")),
                    Box::new(Syntax::Int(0))
                )]
            )
        );
    }

    #[test]
    fn arithmetic() {
        assert_eq!(
            parse_expression("x + y * 2 == -10").unwrap(),
            Syntax::Compare(
                CompareOp::Eq,
                Box::new(binary(
                    BinaryOp::Add,
                    name("x"),
                    binary(BinaryOp::Mul, name("y"), Syntax::Int(2))
                )),
                Box::new(Syntax::Unary(UnaryOp::Negate, Box::new(Syntax::Int(10))))
            )
        );
    }

    #[test]
    fn statements() {
        assert_eq!(
            parse_statement("x, y = Consts('x y', Human)").unwrap(),
            Some(Statement::Assign(
                vec!["x".to_string(), "y".to_string()],
                Syntax::Call(
                    "Consts".to_string(),
                    vec![Syntax::Str("x y".to_string()), name("Human")]
                )
            ))
        );
        assert_eq!(parse_statement("   # nothing").unwrap(), None);
        assert_eq!(
            parse_statement("P & Q").unwrap(),
            Some(Statement::Expression(binary(
                BinaryOp::And,
                name("P"),
                name("Q")
            )))
        );
    }

    #[test]
    fn errors() {
        assert_eq!(parse_expression(""), Err(ParseError::Empty));
        assert_eq!(parse_expression("P &"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse_expression("P Q"),
            Err(ParseError::UnexpectedToken {
                position: 2,
                found: "Q".to_string()
            })
        );
        assert!(matches!(
            parse_expression("x < y < z"),
            Err(ParseError::Unsupported(_))
        ));
        assert!(parse_expression("(P & Q").is_err());
    }
}
