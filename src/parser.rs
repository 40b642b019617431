use crate::ast::{self, Action, BinaryOperator, Expression, Program, UnaryOperator};
use crate::errors::Fault;
use crate::token::TokenStream;

/// The assignment marker that opens an assignment statement.
const ASSIGN: &str = ":=";

/// Parse a whole token stream into a program, consuming every token.
/// Operators sit in prefix position, so the tree shape is dictated
/// entirely by token order; there is no precedence to resolve.
pub fn parse(tokens: &mut TokenStream) -> Result<Program, Fault> {
    let mut program = Program::new();
    while !tokens.is_empty() {
        program.add_action(parse_action(tokens)?);
    }
    Ok(program)
}

fn parse_action(tokens: &mut TokenStream) -> Result<Action, Fault> {
    let first = tokens
        .pop()
        .ok_or_else(|| Fault::PrematureEnd("statement expected".to_string()))?;
    // A statement's leading token must be followed by its operands. The
    // check runs once per action, so a trailing one-token statement is
    // rejected here rather than parsed.
    if tokens.is_empty() {
        return Err(Fault::ExtraTokens(first));
    }
    if first == ASSIGN {
        let target = tokens
            .pop()
            .ok_or_else(|| Fault::PrematureEnd("assignment target expected".to_string()))?;
        let value = parse_expr(tokens)?;
        Action::assignment(target, value)
    } else {
        // The token already consumed is the expression's first token; the
        // expression parse resumes from it without popping again.
        Ok(Action::Print(parse_expr_from(first, tokens)?))
    }
}

fn parse_expr(tokens: &mut TokenStream) -> Result<Expression, Fault> {
    let token = tokens
        .pop()
        .ok_or_else(|| Fault::PrematureEnd("expression expected".to_string()))?;
    parse_expr_from(token, tokens)
}

fn parse_expr_from(token: String, tokens: &mut TokenStream) -> Result<Expression, Fault> {
    if let Some(op) = UnaryOperator::from_symbol(&token) {
        let operand = Box::new(parse_expr(tokens)?);
        return Ok(Expression::Unary { op, operand });
    }
    if let Some(op) = BinaryOperator::from_symbol(&token) {
        let left = Box::new(parse_expr(tokens)?);
        let right = Box::new(parse_expr(tokens)?);
        return Ok(Expression::Binary { op, left, right });
    }
    if ast::is_identifier(&token) {
        return Ok(Expression::Variable(token));
    }
    match token.parse::<i64>() {
        Ok(value) => Ok(Expression::Constant(value)),
        Err(_) => Err(Fault::IllegalValue(token)),
    }
}
