//! # Selector
//!
//! The two sampling algorithms used by the draw session. Both are pure: they read
//! a snapshot of candidates and never touch the pool store. Marking winners as
//! selected is the caller's job.
//!
//! - [`draw_without_replacement`] produces the final result of a settle.
//! - [`sample_with_replacement`] produces the throwaway triples shown while the
//!   machine is spinning. Repeats are allowed there.

use crate::model::Entry;
use rand::Rng;
use thiserror::Error;

/// Errors raised by the selector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrawError {
    /// Fewer candidates than requested picks.
    #[error("Insufficient pool: requested {requested}, available {available}")]
    InsufficientPool { requested: usize, available: usize },
}

/// Draws `k` distinct entries uniformly at random.
///
/// Each step picks a uniform index among the remaining candidates and moves that
/// candidate out, so the result is in draw order and contains no id twice.
///
/// # Errors
/// [`DrawError::InsufficientPool`] when `pool.len() < k`. The input is left as is.
pub fn draw_without_replacement<R: Rng + ?Sized>(
    pool: &[Entry],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Entry>, DrawError> {
    if pool.len() < k {
        return Err(DrawError::InsufficientPool {
            requested: k,
            available: pool.len(),
        });
    }

    let mut candidates = pool.to_vec();
    let mut drawn = Vec::with_capacity(k);
    for _ in 0..k {
        let index = rng.random_range(0..candidates.len());
        drawn.push(candidates.remove(index));
    }
    Ok(drawn)
}

/// Samples `k` entries independently, repeats allowed.
///
/// Returns an empty vector when `pool` is empty.
pub fn sample_with_replacement<R: Rng + ?Sized>(pool: &[Entry], k: usize, rng: &mut R) -> Vec<Entry> {
    if pool.is_empty() {
        return Vec::new();
    }
    (0..k)
        .map(|_| pool[rng.random_range(0..pool.len())].clone())
        .collect()
}
