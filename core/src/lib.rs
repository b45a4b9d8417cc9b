//! Exact rational arithmetic, with numerators and denominators kept in
//! lower terms by prime-factor cancellation.
//!
//! The building blocks are an odds-only prime sieve ([`primes_up_to`]), a
//! sieve whose bound can be raised after the fact ([`GrowablePrimes`]), and
//! two factorization strategies ([`factorize`] and [`cautious_factorize`]).
//! [`Rational`] uses them to reduce fractions lazily: cheaply on every
//! operation, and completely only when a value is shown or compared.
//!
//! A small expression language on top of this is available through
//! [`evaluate`]:
//!
//! ```
//! let mut context = irrat_core::Context::new();
//! let result = irrat_core::evaluate("5/7 / (5476/1053)", &mut context).unwrap();
//! assert_eq!(result.get_main_result(), "5265/38332");
//! ```

#![forbid(unsafe_code)]

mod ast;
mod error;
mod interrupt;
mod lexer;
mod num;
mod parser;
mod result;
mod value;

pub use error::{IrratError, ParseError};
pub use interrupt::Interrupt;
pub use num::{
    cautious_factorize, cautious_factorize_with_interrupt, factorize, factorize_with_interrupt,
    integer_from_f64, primes_up_to, Division, Exact, FactorizeOptions, Factors, GrowablePrimes,
    PrimeSieve, Rational,
};
pub use result::FResult;

/// The result of evaluating an expression.
#[derive(PartialEq, Eq, Debug)]
pub struct IrratResult {
    main_result: String,
}

impl IrratResult {
    /// The displayed value, e.g. `5265/38332`, `2^2 * 5` or `true`. Empty
    /// if the input was blank.
    pub fn get_main_result(&self) -> &str {
        self.main_result.as_str()
    }

    fn empty() -> Self {
        Self {
            main_result: String::new(),
        }
    }
}

/// Settings that persist across calls to [`evaluate`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    options: FactorizeOptions,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// First sieve bound tried when cautiously factoring a large number.
    pub fn set_cautious_first_bound(&mut self, bound: u64) {
        self.options.first_bound = bound;
    }

    /// How much the sieve bound grows at each cautious factoring step.
    pub fn set_cautious_growth_factor(&mut self, factor: u64) {
        self.options.growth_factor = factor;
    }

    pub fn factorize_options(&self) -> &FactorizeOptions {
        &self.options
    }
}

fn evaluate_to_string<I: Interrupt + ?Sized>(
    input: &str,
    context: &Context,
    int: &I,
) -> FResult<String> {
    let expr = parser::parse_string(input)?;
    tracing::debug!(%expr, "parsed");
    let value = ast::evaluate(expr, &context.options, int)?;
    value.simplify(&context.options, int)?;
    Ok(value.to_string())
}

/// Evaluates the given string, returning the result or an error message.
pub fn evaluate(input: &str, context: &mut Context) -> Result<IrratResult, String> {
    evaluate_with_interrupt(input, context, &interrupt::Never::default())
}

/// Like [`evaluate`], but polls `int` during long computations and gives up
/// with an error if it asks to.
pub fn evaluate_with_interrupt<I: Interrupt + ?Sized>(
    input: &str,
    context: &mut Context,
    int: &I,
) -> Result<IrratResult, String> {
    if input.trim().is_empty() {
        // no or blank input: return no output
        return Ok(IrratResult::empty());
    }
    let main_result = evaluate_to_string(input, context, int).map_err(|e| e.to_string())?;
    Ok(IrratResult { main_result })
}

pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
