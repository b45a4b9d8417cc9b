mod division;
mod exact;
mod factorize;
mod factors;
mod float;
mod growable;
mod rational;
mod sieve;

#[cfg(test)]
mod proptests;

pub use division::Division;
pub use exact::Exact;
pub use factorize::{
    cautious_factorize, cautious_factorize_with_interrupt, factorize, factorize_with_interrupt,
    integer_from_f64, FactorizeOptions,
};
pub use factors::Factors;
pub use growable::GrowablePrimes;
pub use rational::Rational;
pub use sieve::{primes_up_to, PrimeSieve};
