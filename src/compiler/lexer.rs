use logos::Logos;

use crate::{ast::BinaryOperator, compiler::parser::ParseResult, error::ParseError};

/// Raw lexemes recognised by the scanner.
///
/// Numeric literals keep their text; they are split off into the value list by
/// [`tokenize`] and never reach later stages as lexemes.
#[derive(Logos, Debug, PartialEq, Clone)]
enum Lexeme {
    /// A maximal run of digits and decimal points, such as `42`, `3.5` or
    /// `3..4`. The decimal point count is checked during evaluation.
    #[regex(r"[0-9.]+", |lex| lex.slice().to_string())]
    Literal(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Spaces only delimit tokens.
    #[regex(r" +", logos::skip)]
    Ignored,
}

/// A token of the compiled language.
///
/// Every numeric literal is represented by the same [`Token::Num`] marker; the
/// literal text lives in [`Tokenized::values`], in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Placeholder for a numeric literal.
    Num,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl Token {
    /// Returns the binary operator spelled by this token, if any.
    ///
    /// `-` always maps to [`BinaryOperator::Sub`]; whether a given `-` is
    /// binary or unary depends on its neighbours, see [`is_binary_minus`].
    #[must_use]
    pub const fn operator(self) -> Option<BinaryOperator> {
        match self {
            Self::Plus => Some(BinaryOperator::Add),
            Self::Minus => Some(BinaryOperator::Sub),
            Self::Star => Some(BinaryOperator::Mul),
            Self::Slash => Some(BinaryOperator::Div),
            Self::Num | Self::LParen | Self::RParen => None,
        }
    }

    /// Returns `true` if the token ends an operand (`num` or `)`).
    #[must_use]
    pub const fn ends_operand(self) -> bool {
        matches!(self, Self::Num | Self::RParen)
    }
}

impl From<BinaryOperator> for Token {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Add => Self::Plus,
            BinaryOperator::Sub => Self::Minus,
            BinaryOperator::Mul => Self::Star,
            BinaryOperator::Div => Self::Slash,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num => write!(f, "num"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// Returns `true` if the `-` at `index` is a subtraction.
///
/// A minus is binary when the token right before it ends an operand. A
/// leading minus, or one following an operator or `(`, is a unary minus.
#[must_use]
pub fn is_binary_minus(tokens: &[Token], index: usize) -> bool {
    tokens.get(index) == Some(&Token::Minus)
    && index > 0
    && tokens.get(index - 1).is_some_and(|previous| previous.ends_operand())
}

/// Output of the tokenizer.
///
/// Invariant: the number of [`Token::Num`] markers in `tokens` equals the
/// length of `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// The token sequence, literals replaced by `num`.
    pub tokens: Vec<Token>,
    /// The literal texts in source order.
    pub values: Vec<String>,
}

impl std::fmt::Display for Tokenized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

const fn is_allowed(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '+' | '-' | '*' | '/' | '(' | ')' | ' ')
}

/// Splits the source into tokens and literal values.
///
/// The whole input is validated first: a character outside of digits, `.`,
/// the four operators, parentheses and space aborts tokenizing before any
/// token is produced. A literal is a maximal run of digits and decimal
/// points; it is not checked for a second decimal point here.
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] for the first disallowed
/// character.
///
/// # Example
/// ```
/// use ternac::compiler::lexer::{Token, tokenize};
///
/// let tokenized = tokenize("2 + 3.5").unwrap();
/// assert_eq!(tokenized.tokens, vec![Token::Num, Token::Plus, Token::Num]);
/// assert_eq!(tokenized.values, vec!["2".to_string(), "3.5".to_string()]);
///
/// assert!(tokenize("4$2").is_err());
/// ```
pub fn tokenize(source: &str) -> ParseResult<Tokenized> {
    if let Some((position, character)) = source.chars().enumerate().find(|(_, c)| !is_allowed(*c))
    {
        return Err(ParseError::InvalidCharacter { character, position });
    }

    let mut tokens = Vec::new();
    let mut values = Vec::new();
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let token = match lexeme {
            Ok(Lexeme::Literal(text)) => {
                values.push(text);
                Token::Num
            },
            Ok(Lexeme::Plus) => Token::Plus,
            Ok(Lexeme::Minus) => Token::Minus,
            Ok(Lexeme::Star) => Token::Star,
            Ok(Lexeme::Slash) => Token::Slash,
            Ok(Lexeme::LParen) => Token::LParen,
            Ok(Lexeme::RParen) => Token::RParen,
            Ok(Lexeme::Ignored) => continue,
            Err(()) => {
                let start = lexer.span().start;
                return Err(ParseError::InvalidCharacter { character:
                                                              source[start..].chars()
                                                                             .next()
                                                                             .unwrap_or(' '),
                                                          position:  source[..start].chars()
                                                                                    .count(), });
            },
        };
        tokens.push(token);
    }

    log::debug!("tokenized {} tokens, {} literals", tokens.len(), values.len());

    Ok(Tokenized { tokens, values })
}
