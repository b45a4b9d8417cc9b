// Odds-only sieve of Eratosthenes. Bit `i` stands for the odd number
// `2i + 3`, so 2 is never stored and each word covers 64 odd numbers.

use crate::error::IrratError;
use crate::result::FResult;
use std::convert::TryFrom;

/// 3 => 0, 5 => 1, 7 => 2, 9 => 3
pub(crate) const fn to_sieve_index(n: u64) -> u64 {
    (n - 3) / 2
}

/// 0 => 3, 1 => 5, 2 => 7, 3 => 9
pub(crate) const fn from_sieve_index(i: u64) -> u64 {
    i * 2 + 3
}

/// Number of array slots needed to cover every odd number in `[3, limit]`.
pub(crate) fn sieve_len(limit: u64) -> FResult<usize> {
    if limit < 3 {
        return Ok(0);
    }
    usize::try_from(to_sieve_index(limit) + 1).map_err(|_| IrratError::TooLarge)
}

/// One bit per odd number, set while the number is not yet proven
/// composite. Bits past `len` are kept set, so growing only moves `len`.
#[derive(Debug, Clone, Default)]
pub(crate) struct SieveBits {
    words: Vec<u64>,
    len: usize,
}

impl SieveBits {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Grows to `len` bits. Fails rather than aborting when the allocation
    /// cannot be made.
    pub(crate) fn extend(&mut self, len: usize) -> FResult<()> {
        if len <= self.len {
            return Ok(());
        }
        let words = len.div_ceil(64);
        let additional = words.saturating_sub(self.words.len());
        self.words
            .try_reserve_exact(additional)
            .map_err(|_| IrratError::TooLarge)?;
        self.words.resize(words, u64::MAX);
        self.len = len;
        Ok(())
    }

    pub(crate) fn get(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    pub(crate) fn clear(&mut self, i: usize) {
        self.words[i / 64] &= !(1 << (i % 64));
    }
}

/// Marks `start, start + 2p, start + 4p, ...` up to `limit` as composite.
/// `start` must be an odd multiple of `p`.
pub(crate) fn mark_odd_multiples(is_prime: &mut SieveBits, p: u64, start: u64, limit: u64) {
    let step = p * 2;
    let mut m = start;
    while m <= limit {
        is_prime.clear(to_sieve_index(m) as usize);
        m = match m.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
}

/// Iterator over the primes up to a fixed limit, in ascending order.
///
/// Created by [`primes_up_to`]. The iterator is one-shot: once the last prime
/// has been returned it stays exhausted.
#[derive(Debug, Clone)]
pub struct PrimeSieve {
    limit: u64,
    is_prime: SieveBits,
    next: u64,
}

/// Returns the primes `<= limit`, lazily.
///
/// Memory use is one bit per odd number below `limit`, allocated up front.
pub fn primes_up_to(limit: u64) -> FResult<PrimeSieve> {
    let mut is_prime = SieveBits::default();
    is_prime.extend(sieve_len(limit)?)?;
    Ok(PrimeSieve {
        limit,
        is_prime,
        next: 2,
    })
}

impl Iterator for PrimeSieve {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next == 2 {
            self.next = 3;
            if self.limit >= 2 {
                return Some(2);
            }
        }
        while self.next <= self.limit {
            let n = self.next;
            self.next += 2;
            if !self.is_prime.get(to_sieve_index(n) as usize) {
                continue;
            }
            // even multiples have no slot in the array, start at 3n
            if let Some(start) = n.checked_mul(3) {
                mark_odd_multiples(&mut self.is_prime, n, start, self.limit);
            }
            return Some(n);
        }
        None
    }
}

impl std::iter::FusedIterator for PrimeSieve {}
