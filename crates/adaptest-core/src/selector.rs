//! Random question selection with repeat exclusion.
//!
//! A pure function over an immutable snapshot of a tier's pool, with the
//! random source injected so exhaustion and draw behavior are testable
//! deterministically.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Question;

/// Draw one question the session has not seen yet.
///
/// Filters `pool` by `excluded` and chooses uniformly at random among the
/// remainder. Returns `None` when every question in the pool has already
/// been asked; the caller treats that as a forced-termination condition.
pub fn select<'a, R: Rng + ?Sized>(
    pool: &'a [Question],
    excluded: &HashSet<String>,
    rng: &mut R,
) -> Option<&'a Question> {
    let candidates: Vec<&Question> = pool
        .iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect();
    candidates.choose(rng).copied()
}
