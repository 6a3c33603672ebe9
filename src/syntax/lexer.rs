//! Tokens of the expression language shared by the propositional and first-order parsers.
//!
//! The language is a small subset of Python expression syntax: names, integers, quoted strings, brackets, and operators.
//! Whitespace separates tokens, and `#` begins a comment to the end of the line.

use crate::types::err::ParseError;

/// A token, as read from a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A name, e.g. `P`, `ForAll`, or `solver`.
    Name(String),

    /// A non-negative integer literal.
    Int(i64),

    /// A quoted string, without quotes.
    Str(String),

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,

    /// `=`
    Assign,

    /// `~`
    Tilde,

    /// `&`
    Amp,

    /// `|`
    Pipe,

    /// `^`
    Caret,

    /// `>>`
    ShiftRight,

    /// `<<`
    ShiftLeft,

    /// `==`
    Eq,

    /// `!=`
    NotEq,

    /// `<`
    Lt,

    /// `<=`
    Le,

    /// `>`
    Gt,

    /// `>=`
    Ge,

    Plus,
    Minus,
    Star,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Int(int) => write!(f, "{int}"),
            Self::Str(string) => write!(f, "'{string}'"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Assign => write!(f, "="),
            Self::Tilde => write!(f, "~"),
            Self::Amp => write!(f, "&"),
            Self::Pipe => write!(f, "|"),
            Self::Caret => write!(f, "^"),
            Self::ShiftRight => write!(f, ">>"),
            Self::ShiftLeft => write!(f, "<<"),
            Self::Eq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
        }
    }
}

/// The tokens of `input`, each paired with the (character) position at which the token begins.
pub fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let characters = input.chars().collect::<Vec<_>>();
    let mut tokens = Vec::default();
    let mut position = 0;

    while let Some(&character) = characters.get(position) {
        let start = position;
        let next = characters.get(position + 1).copied();

        let token = match character {
            c if c.is_whitespace() => {
                position += 1;
                continue;
            }

            '#' => break,

            c if c.is_alphabetic() || c == '_' => {
                while characters
                    .get(position)
                    .is_some_and(|c| c.is_alphanumeric() || *c == '_')
                {
                    position += 1;
                }
                tokens.push((
                    start,
                    Token::Name(characters[start..position].iter().collect()),
                ));
                continue;
            }

            c if c.is_ascii_digit() => {
                while characters.get(position).is_some_and(|c| c.is_ascii_digit()) {
                    position += 1;
                }
                let digits = characters[start..position].iter().collect::<String>();
                let int = digits.parse::<i64>().map_err(|_| ParseError::UnexpectedToken {
                    position: start,
                    found: digits.clone(),
                })?;
                tokens.push((start, Token::Int(int)));
                continue;
            }

            quote @ ('\'' | '"') => {
                position += 1;
                while characters.get(position).is_some_and(|c| *c != quote) {
                    position += 1;
                }
                if position >= characters.len() {
                    return Err(ParseError::UnexpectedEnd);
                }
                let string = characters[start + 1..position].iter().collect();
                position += 1;
                tokens.push((start, Token::Str(string)));
                continue;
            }

            '>' if next == Some('>') => Token::ShiftRight,
            '<' if next == Some('<') => Token::ShiftLeft,
            '=' if next == Some('=') => Token::Eq,
            '!' if next == Some('=') => Token::NotEq,
            '<' if next == Some('=') => Token::Le,
            '>' if next == Some('=') => Token::Ge,

            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            '.' => Token::Dot,
            '=' => Token::Assign,
            '~' => Token::Tilde,
            '&' => Token::Amp,
            '|' => Token::Pipe,
            '^' => Token::Caret,
            '<' => Token::Lt,
            '>' => Token::Gt,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,

            _ => return Err(ParseError::UnexpectedCharacter { position, character }),
        };

        position += match token {
            Token::ShiftRight
            | Token::ShiftLeft
            | Token::Eq
            | Token::NotEq
            | Token::Le
            | Token::Ge => 2,
            _ => 1,
        };
        tokens.push((start, token));
    }

    Ok(tokens)
}

#[cfg(test)]
mod lexer_tests {
    use super::*;

    fn tokens_of(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|(_, token)| token)
            .collect()
    }

    #[test]
    fn operators() {
        assert_eq!(
            tokens_of("(P >> Q) & ~R"),
            vec![
                Token::LParen,
                Token::Name("P".to_string()),
                Token::ShiftRight,
                Token::Name("Q".to_string()),
                Token::RParen,
                Token::Amp,
                Token::Tilde,
                Token::Name("R".to_string()),
            ]
        );
        assert_eq!(
            tokens_of("x<=y != z>=1"),
            vec![
                Token::Name("x".to_string()),
                Token::Le,
                Token::Name("y".to_string()),
                Token::NotEq,
                Token::Name("z".to_string()),
                Token::Ge,
                Token::Int(1),
            ]
        );
    }

    #[test]
    fn strings_and_comments() {
        assert_eq!(
            tokens_of("x, y = Consts('x y', S) # two constants"),
            vec![
                Token::Name("x".to_string()),
                Token::Comma,
                Token::Name("y".to_string()),
                Token::Assign,
                Token::Name("Consts".to_string()),
                Token::LParen,
                Token::Str("x y".to_string()),
                Token::Comma,
                Token::Name("S".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn positions() {
        let tokens = tokenize("P  & Q").unwrap();
        let positions = tokens.iter().map(|(p, _)| *p).collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 3, 5]);
    }

    #[test]
    fn errors() {
        assert_eq!(
            tokenize("P $ Q"),
            Err(ParseError::UnexpectedCharacter {
                position: 2,
                character: '$'
            })
        );
        assert_eq!(tokenize("Bool('P"), Err(ParseError::UnexpectedEnd));
    }
}
