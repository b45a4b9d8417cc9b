use crate::ast::{Bop, Expr};
use crate::error::ParseError;
use crate::lexer::{lex, Symbol, Token};
use crate::result::FResult;

type ParseResult<'a, T = Expr> = Result<(T, &'a [Token]), ParseError>;

fn parse_token(input: &[Token]) -> ParseResult<'_, Token> {
    if input.is_empty() {
        Err(ParseError::ExpectedAToken)
    } else {
        Ok((input[0].clone(), &input[1..]))
    }
}

fn parse_fixed_symbol(input: &[Token], symbol: Symbol) -> ParseResult<'_, ()> {
    let (token, remaining) = parse_token(input)?;
    if let Token::Symbol(sym) = token {
        if sym == symbol {
            return Ok(((), remaining));
        }
    }
    Err(ParseError::UnexpectedInput)
}

fn parse_parens(input: &[Token]) -> ParseResult<'_> {
    let ((), input) = parse_fixed_symbol(input, Symbol::OpenParens)?;
    let (inner, mut input) = parse_expression(input)?;
    // allow omitting closing parentheses at end of input
    if !input.is_empty() {
        let ((), remaining) = parse_fixed_symbol(input, Symbol::CloseParens)
            .map_err(|_| ParseError::ExpectedChar(')'))?;
        input = remaining;
    }
    Ok((Expr::Parens(Box::new(inner)), input))
}

fn parse_parens_or_literal(input: &[Token]) -> ParseResult<'_> {
    let (token, remaining) = parse_token(input)?;
    match token {
        Token::Num(n) => Ok((Expr::Num(n), remaining)),
        Token::Symbol(Symbol::OpenParens) => parse_parens(input),
        Token::Ident(_) | Token::Symbol(_) => Err(ParseError::ExpectedANumber),
    }
}

// `factor(12)`, or `factor 12` without parentheses
fn parse_function_call(input: &[Token]) -> ParseResult<'_> {
    match parse_token(input)? {
        (Token::Ident(name), remaining) => {
            let (arg, remaining) = parse_power(remaining, false)?;
            Ok((Expr::Call(name, Box::new(arg)), remaining))
        }
        _ => parse_parens_or_literal(input),
    }
}

fn parse_power(input: &[Token], allow_unary: bool) -> ParseResult<'_> {
    if allow_unary {
        if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Sub) {
            let (result, remaining) = parse_power(remaining, true)?;
            return Ok((Expr::UnaryMinus(Box::new(result)), remaining));
        }
        if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Add) {
            let (result, remaining) = parse_power(remaining, true)?;
            return Ok((Expr::UnaryPlus(Box::new(result)), remaining));
        }
    }
    let (mut result, mut input) = parse_function_call(input)?;
    // right-associative: 2^3^2 == 2^9
    if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Pow) {
        let (rhs, remaining) = parse_power(remaining, true)?;
        result = Expr::Bop(Bop::Pow, Box::new(result), Box::new(rhs));
        input = remaining;
    }
    Ok((result, input))
}

fn parse_multiplicative(input: &[Token]) -> ParseResult<'_> {
    let (mut res, mut input) = parse_power(input, true)?;
    loop {
        let op = if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Mul) {
            input = remaining;
            Bop::Mul
        } else if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Div) {
            input = remaining;
            Bop::Div
        } else if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::FloorDiv) {
            input = remaining;
            Bop::FloorDiv
        } else {
            break;
        };
        let (term, remaining) = parse_power(input, true)?;
        res = Expr::Bop(op, Box::new(res), Box::new(term));
        input = remaining;
    }
    Ok((res, input))
}

fn parse_additive(input: &[Token]) -> ParseResult<'_> {
    let (mut res, mut input) = parse_multiplicative(input)?;
    loop {
        let op = if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Add) {
            input = remaining;
            Bop::Plus
        } else if let Ok(((), remaining)) = parse_fixed_symbol(input, Symbol::Sub) {
            input = remaining;
            Bop::Minus
        } else {
            break;
        };
        let (term, remaining) = parse_multiplicative(input)?;
        res = Expr::Bop(op, Box::new(res), Box::new(term));
        input = remaining;
    }
    Ok((res, input))
}

fn comparison_op(symbol: Symbol) -> Option<Bop> {
    Some(match symbol {
        Symbol::Less => Bop::Less,
        Symbol::LessOrEqual => Bop::LessOrEqual,
        Symbol::Greater => Bop::Greater,
        Symbol::GreaterOrEqual => Bop::GreaterOrEqual,
        Symbol::DoubleEquals => Bop::Equal,
        Symbol::NotEquals => Bop::NotEqual,
        _ => return None,
    })
}

// comparisons don't chain: `1 < 2 < 3` is an error
fn parse_comparison(input: &[Token]) -> ParseResult<'_> {
    let (lhs, input) = parse_additive(input)?;
    if let Some(Token::Symbol(sym)) = input.first() {
        if let Some(op) = comparison_op(*sym) {
            let (rhs, remaining) = parse_additive(&input[1..])?;
            return Ok((Expr::Bop(op, Box::new(lhs), Box::new(rhs)), remaining));
        }
    }
    Ok((lhs, input))
}

fn parse_expression(input: &[Token]) -> ParseResult<'_> {
    parse_comparison(input)
}

pub(crate) fn parse_string(input: &str) -> FResult<Expr> {
    let tokens = lex(input).collect::<FResult<Vec<_>>>()?;
    let (res, remaining) = parse_expression(tokens.as_slice())?;
    if !remaining.is_empty() {
        return Err(ParseError::UnexpectedInput.into());
    }
    Ok(res)
}
