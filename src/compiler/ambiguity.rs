use crate::{
    ast::BinaryOperator,
    compiler::{
        lexer::{Token, is_binary_minus},
        parser::ParseResult,
    },
    error::ParseError,
};

/// Returns the operator at `index` if it takes part in the ambiguity scan.
///
/// A unary minus is skipped, both as the operator starting a pattern and as
/// its partner: it belongs to its operand, not to an operator chain.
fn scanned_operator(tokens: &[Token], index: usize) -> Option<BinaryOperator> {
    let op = tokens.get(index)?.operator()?;
    if op == BinaryOperator::Sub && !is_binary_minus(tokens, index) {
        return None;
    }
    Some(op)
}

fn same_class(left: BinaryOperator, right: BinaryOperator) -> bool {
    left.is_multiplicative() == right.is_multiplicative()
}

/// Rejects operator sequences judged ambiguous before any tree is built.
///
/// The scan walks the tokens left to right and fails on the first match of:
///
/// - an operator immediately followed by another operator of the same
///   precedence class (`1++2`);
/// - two operators of the same class separated by exactly one token
///   (`1+2-3`);
/// - an operator followed by `(` where any later `)` is itself followed by an
///   operator of the same class (`1+(2+3)+4`).
///
/// A unary minus never completes a pattern, so `1+-2` and `4--2` pass.
///
/// The last rule does not look for the `)` matching the group: every `)`
/// after the operator is checked, so the `)` of a nested group also matches
/// (`1+((2)+3)` is rejected). Once an operator followed by `(` has been
/// checked the scan stops, so the gate is a best-effort filter, not a full
/// grammar check.
///
/// # Errors
/// Returns [`ParseError::AmbiguousExpression`] pointing at the operator that
/// started the rejected pattern.
///
/// # Example
/// ```
/// use ternac::compiler::{ambiguity::check_ambiguity, lexer::tokenize};
///
/// assert!(check_ambiguity(&tokenize("2+3*4").unwrap().tokens).is_ok());
/// assert!(check_ambiguity(&tokenize("1+2+3").unwrap().tokens).is_err());
/// assert!(check_ambiguity(&tokenize("-3+5").unwrap().tokens).is_ok());
/// assert!(check_ambiguity(&tokenize("1+-2").unwrap().tokens).is_ok());
/// ```
pub fn check_ambiguity(tokens: &[Token]) -> ParseResult<()> {
    for index in 0..tokens.len() {
        let Some(op) = scanned_operator(tokens, index) else {
            continue;
        };

        if let Some(next) = scanned_operator(tokens, index + 1)
           && same_class(op, next)
        {
            log::trace!("adjacent '{op}' and '{next}' at token {index}");
            return Err(ParseError::AmbiguousExpression { position: index });
        }

        if let Some(partner) = scanned_operator(tokens, index + 2)
           && same_class(op, partner)
        {
            log::trace!("'{op}' and '{partner}' one token apart at token {index}");
            return Err(ParseError::AmbiguousExpression { position: index });
        }

        if tokens.get(index + 1) == Some(&Token::LParen) {
            let chained = (index..tokens.len()).any(|j| {
                tokens[j] == Token::RParen
                && tokens.get(j + 1)
                         .and_then(|token| token.operator())
                         .is_some_and(|after| same_class(op, after))
            });
            if chained {
                log::trace!("group after '{op}' at token {index} is chained by a same-class operator");
                return Err(ParseError::AmbiguousExpression { position: index });
            }
            break;
        }
    }

    Ok(())
}
