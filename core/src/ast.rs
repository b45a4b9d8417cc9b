use crate::error::IrratError;
use crate::interrupt::{test_int, Interrupt};
use crate::num::{FactorizeOptions, Rational};
use crate::result::FResult;
use crate::value::{BuiltInFunction, Value};
use num_traits::ToPrimitive;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Bop {
    Plus,
    Minus,
    Mul,
    Div,
    FloorDiv,
    Pow,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl fmt::Display for Bop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Pow => "^",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Expr {
    Num(Rational),
    Parens(Box<Expr>),
    UnaryMinus(Box<Expr>),
    UnaryPlus(Box<Expr>),
    Bop(Bop, Box<Expr>, Box<Expr>),
    // function name and its argument
    Call(String, Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", n),
            Self::Parens(x) => write!(f, "({})", x),
            Self::UnaryMinus(x) => write!(f, "(-{})", x),
            Self::UnaryPlus(x) => write!(f, "(+{})", x),
            Self::Bop(op, a, b) => write!(f, "({}{}{})", a, op, b),
            Self::Call(name, arg) => write!(f, "{}({})", name, arg),
        }
    }
}

fn exponent_to_i64<I: Interrupt + ?Sized>(
    exponent: &Rational,
    options: &FactorizeOptions,
    int: &I,
) -> FResult<i64> {
    if !exponent.is_integer() {
        exponent.simplify_with(options, int)?;
        return Err(IrratError::NotAnInteger(exponent.to_string()));
    }
    exponent.numerator().to_i64().ok_or(IrratError::TooLarge)
}

fn evaluate_bop<I: Interrupt + ?Sized>(
    op: Bop,
    a: Rational,
    b: Rational,
    options: &FactorizeOptions,
    int: &I,
) -> FResult<Value> {
    let cmp = |a: &Rational, b: &Rational| a.cmp_with(b, options, int);
    Ok(match op {
        Bop::Plus => Value::Num(a.add_with(&b, options, int)?),
        Bop::Minus => Value::Num(a.sub_with(&b, options, int)?),
        Bop::Mul => Value::Num(a * b),
        Bop::Div => Value::Num(a.checked_div(&b)?),
        Bop::FloorDiv => Value::Num(a.div_floor(&b)?),
        Bop::Pow => Value::Num(a.pow(exponent_to_i64(&b, options, int)?)?),
        Bop::Less => Value::Bool(cmp(&a, &b)?.is_lt()),
        Bop::LessOrEqual => Value::Bool(cmp(&a, &b)?.is_le()),
        Bop::Greater => Value::Bool(cmp(&a, &b)?.is_gt()),
        Bop::GreaterOrEqual => Value::Bool(cmp(&a, &b)?.is_ge()),
        Bop::Equal => Value::Bool(cmp(&a, &b)?.is_eq()),
        Bop::NotEqual => Value::Bool(cmp(&a, &b)?.is_ne()),
    })
}

pub(crate) fn evaluate<I: Interrupt + ?Sized>(
    expr: Expr,
    options: &FactorizeOptions,
    int: &I,
) -> FResult<Value> {
    test_int(int)?;
    Ok(match expr {
        Expr::Num(n) => Value::Num(n),
        Expr::Parens(x) | Expr::UnaryPlus(x) => evaluate(*x, options, int)?,
        Expr::UnaryMinus(x) => Value::Num(-evaluate(*x, options, int)?.expect_num()?),
        Expr::Bop(op, a, b) => {
            let a = evaluate(*a, options, int)?.expect_num()?;
            let b = evaluate(*b, options, int)?.expect_num()?;
            evaluate_bop(op, a, b, options, int)?
        }
        Expr::Call(name, arg) => {
            let func = BuiltInFunction::from_name(&name)
                .ok_or_else(|| IrratError::UnknownFunction(name.clone()))?;
            let arg = evaluate(*arg, options, int)?;
            func.apply(arg, options, int)?
        }
    })
}
