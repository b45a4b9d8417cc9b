use crate::error::{IrratError, ParseError};
use crate::num::Rational;
use crate::result::FResult;
use num_bigint::BigInt;
use num_traits::{One, Pow};
use std::fmt;

#[derive(Clone, Debug)]
pub(crate) enum Token {
    Num(Rational),
    Ident(String),
    Symbol(Symbol),
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) enum Symbol {
    OpenParens,
    CloseParens,
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Pow,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    DoubleEquals,
    NotEquals,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OpenParens => "(",
            Self::CloseParens => ")",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Pow => "^",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::DoubleEquals => "==",
            Self::NotEquals => "!=",
        };
        write!(f, "{}", s)
    }
}

fn parse_char(input: &str) -> FResult<(char, &str)> {
    if let Some(ch) = input.chars().next() {
        let (_, b) = input.split_at(ch.len_utf8());
        Ok((ch, b))
    } else {
        Err(ParseError::ExpectedAToken.into())
    }
}

fn parse_ascii_digit(input: &str) -> FResult<(u8, &str)> {
    let (ch, input) = parse_char(input)?;
    match ch.to_digit(10) {
        Some(digit) => Ok((digit as u8, input)),
        None => Err(ParseError::ExpectedANumber.into()),
    }
}

fn parse_fixed_char(input: &str, ch: char) -> FResult<((), &str)> {
    let (parsed_ch, input) = parse_char(input)?;
    if parsed_ch == ch {
        Ok(((), input))
    } else {
        Err(ParseError::ExpectedChar(ch).into())
    }
}

/// Consumes a run of digits, with `_` allowed between them.
fn parse_digits(input: &str) -> FResult<(String, &str)> {
    let (first, mut input) = parse_ascii_digit(input)?;
    let mut digits = first.to_string();
    loop {
        if let Ok((digit, remaining)) = parse_ascii_digit(input) {
            digits.push(char::from(b'0' + digit));
            input = remaining;
        } else if let Ok(((), remaining)) = parse_fixed_char(input, '_') {
            let (digit, remaining) = parse_ascii_digit(remaining)?;
            digits.push(char::from(b'0' + digit));
            input = remaining;
        } else {
            break;
        }
    }
    Ok((digits, input))
}

// `1e65536` already has over 200 000 bits
const MAX_DECIMAL_EXPONENT: u64 = 1 << 16;

fn parse_exponent(input: &str) -> FResult<(i64, &str)> {
    let ((), input) = parse_fixed_char(input, 'e')
        .or_else(|_| parse_fixed_char(input, 'E'))?;
    let (negative, input) = if let Ok(((), remaining)) = parse_fixed_char(input, '-') {
        (true, remaining)
    } else if let Ok(((), remaining)) = parse_fixed_char(input, '+') {
        (false, remaining)
    } else {
        (false, input)
    };
    let (digits, input) = parse_digits(input)?;
    let exponent: i64 = digits
        .parse()
        .map_err(|_| ParseError::InvalidNumber(digits.clone()))?;
    Ok((if negative { -exponent } else { exponent }, input))
}

/// Numbers are read exactly: `0.1` is one tenth, and `2.5e-3` is `25/10000`.
fn parse_number(input: &str) -> FResult<(Rational, &str)> {
    let (mut digits, mut input) = if input.starts_with('.') {
        (String::new(), input)
    } else {
        parse_digits(input)?
    };
    let mut exponent = 0_i64;
    if let Ok(((), remaining)) = parse_fixed_char(input, '.') {
        input = remaining;
        if let Ok((fraction, remaining)) = parse_digits(input) {
            exponent -= fraction.len() as i64;
            digits.push_str(&fraction);
            input = remaining;
        } else if digits.is_empty() {
            return Err(ParseError::ExpectedANumber.into());
        }
    }
    if let Ok((e, remaining)) = parse_exponent(input) {
        exponent = exponent
            .checked_add(e)
            .ok_or_else(|| ParseError::InvalidNumber(digits.clone()))?;
        input = remaining;
    }
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return Err(IrratError::ExponentTooLarge);
    }
    let mantissa: BigInt = digits
        .parse()
        .map_err(|_| ParseError::InvalidNumber(digits.clone()))?;
    let ten = BigInt::from(10);
    let scale: BigInt = Pow::pow(&ten, exponent.unsigned_abs());
    let res = if exponent >= 0 {
        Rational::new(mantissa * scale, BigInt::one())?
    } else {
        Rational::new(mantissa, scale)?
    };
    Ok((res, input))
}

fn is_valid_in_ident(ch: char, first: bool) -> bool {
    ch.is_alphabetic() || ch == '_' || (!first && ch.is_ascii_digit())
}

fn parse_ident(input: &str) -> FResult<(Token, &str)> {
    let end = input
        .char_indices()
        .find(|&(i, ch)| !is_valid_in_ident(ch, i == 0))
        .map_or(input.len(), |(i, _)| i);
    if end == 0 {
        return Err(ParseError::UnexpectedInput.into());
    }
    let (ident, input) = input.split_at(end);
    Ok((Token::Ident(ident.to_string()), input))
}

fn parse_symbol(input: &str) -> FResult<(Token, &str)> {
    let (ch, remaining) = parse_char(input)?;
    let followed_by = |next: char| remaining.starts_with(next);
    let (symbol, len) = match ch {
        '(' => (Symbol::OpenParens, 1),
        ')' => (Symbol::CloseParens, 1),
        '+' => (Symbol::Add, 1),
        '-' => (Symbol::Sub, 1),
        '*' if followed_by('*') => (Symbol::Pow, 2),
        '*' => (Symbol::Mul, 1),
        '/' if followed_by('/') => (Symbol::FloorDiv, 2),
        '/' => (Symbol::Div, 1),
        '^' => (Symbol::Pow, 1),
        '<' if followed_by('=') => (Symbol::LessOrEqual, 2),
        '<' => (Symbol::Less, 1),
        '>' if followed_by('=') => (Symbol::GreaterOrEqual, 2),
        '>' => (Symbol::Greater, 1),
        '=' if followed_by('=') => (Symbol::DoubleEquals, 2),
        '!' if followed_by('=') => (Symbol::NotEquals, 2),
        _ => return Err(ParseError::UnexpectedChar(ch).into()),
    };
    // every symbol character is ASCII
    Ok((Token::Symbol(symbol), &input[len..]))
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> FResult<Option<Token>> {
        self.input = self.input.trim_start();
        let ch = match self.input.chars().next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        let (token, remaining) = if ch.is_ascii_digit() || ch == '.' {
            let (num, remaining) = parse_number(self.input)?;
            (Token::Num(num), remaining)
        } else if is_valid_in_ident(ch, true) {
            parse_ident(self.input)?
        } else {
            parse_symbol(self.input)?
        };
        self.input = remaining;
        Ok(Some(token))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = FResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(None) => None,
            Ok(Some(t)) => Some(Ok(t)),
            Err(e) => {
                // stop after the first error
                self.input = "";
                Some(Err(e))
            }
        }
    }
}

pub(crate) fn lex(input: &str) -> Lexer<'_> {
    Lexer { input }
}
