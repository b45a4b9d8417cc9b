use crate::error::IrratError;
use crate::interrupt::{test_int, Interrupt};
use crate::num::{
    cautious_factorize_with_interrupt, factorize_with_interrupt, primes_up_to, FactorizeOptions,
    Factors, Rational,
};
use crate::result::FResult;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use std::fmt;

#[derive(Clone, Debug)]
pub(crate) enum Value {
    Num(Rational),
    Bool(bool),
    Factors(Factors),
    Primes(Vec<u64>),
    Approx(f64),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Num(_) => "a number",
            Self::Bool(_) => "a boolean",
            Self::Factors(_) => "a factorization",
            Self::Primes(_) => "a list of primes",
            Self::Approx(_) => "an approximation",
        }
    }

    pub(crate) fn expect_num(self) -> FResult<Rational> {
        match self {
            Self::Num(n) => Ok(n),
            _ => Err(IrratError::TypeMismatch {
                expected: "a number",
                found: self.type_name(),
            }),
        }
    }

    /// Reduces a numeric result to lowest terms, so that it can be displayed
    /// without any further factoring.
    pub(crate) fn simplify<I: Interrupt + ?Sized>(
        &self,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<()> {
        if let Self::Num(n) = self {
            n.simplify_with(options, int)?;
        }
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Factors(factors) => write!(f, "{}", factors),
            Self::Primes(primes) => {
                for (i, p) in primes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                Ok(())
            }
            Self::Approx(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuiltInFunction {
    Factor,
    CautiousFactor,
    Primes,
    Abs,
    Numerator,
    Denominator,
    Approx,
}

fn expect_integer<I: Interrupt + ?Sized>(
    n: &Rational,
    options: &FactorizeOptions,
    int: &I,
) -> FResult<BigInt> {
    n.simplify_with(options, int)?;
    if n.is_integer() {
        Ok(n.numerator())
    } else {
        Err(IrratError::NotAnInteger(n.to_string()))
    }
}

impl BuiltInFunction {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "factor" => Self::Factor,
            "cfactor" => Self::CautiousFactor,
            "primes" => Self::Primes,
            "abs" => Self::Abs,
            "num" | "numerator" => Self::Numerator,
            "den" | "denominator" => Self::Denominator,
            "approx" => Self::Approx,
            _ => return None,
        })
    }

    pub(crate) fn apply<I: Interrupt + ?Sized>(
        self,
        arg: Value,
        options: &FactorizeOptions,
        int: &I,
    ) -> FResult<Value> {
        let arg = arg.expect_num()?;
        Ok(match self {
            Self::Factor => {
                let n = expect_integer(&arg, options, int)?;
                Value::Factors(factorize_with_interrupt(&n, int)?)
            }
            Self::CautiousFactor => Value::Factors(cautious_factorize_with_interrupt(
                &expect_integer(&arg, options, int)?,
                options,
                int,
            )?),
            Self::Primes => {
                let limit = expect_integer(&arg, options, int)?;
                if limit.is_negative() {
                    return Err(IrratError::NotPositive(limit.to_string()));
                }
                let limit = limit.to_u64().ok_or(IrratError::TooLarge)?;
                let mut primes = vec![];
                for p in primes_up_to(limit)? {
                    test_int(int)?;
                    primes.push(p);
                }
                Value::Primes(primes)
            }
            Self::Abs => Value::Num(arg.abs()),
            Self::Numerator => {
                arg.simplify_with(options, int)?;
                Value::Num(arg.numerator().into())
            }
            Self::Denominator => {
                arg.simplify_with(options, int)?;
                Value::Num(arg.denominator().into())
            }
            Self::Approx => Value::Approx(arg.to_f64()),
        })
    }
}
