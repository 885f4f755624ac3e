//! Injected randomness used for tile spawns and tie breaks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform choice service.
///
/// Systems never seed or own a generator; they receive one of these so tests
/// can script every random decision.
pub trait Randomness {
    /// Uniformly picks an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Randomness + ?Sized> Randomness for &mut R {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Picks one element uniformly, or `None` when the slice is empty.
pub fn choose<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: Randomness + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(rng.pick_index(items.len()))
}

/// Shuffles the slice in place with Fisher-Yates.
pub fn shuffle<T, R>(rng: &mut R, items: &mut [T])
where
    R: Randomness + ?Sized,
{
    for index in (1..items.len()).rev() {
        let other = rng.pick_index(index + 1);
        items.swap(index, other);
    }
}

/// Reproducible randomness backed by a ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct SeededRandomness {
    rng: ChaCha8Rng,
}

impl SeededRandomness {
    /// Creates a generator whose stream depends only on `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Randomness for SeededRandomness {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of picks, each reduced modulo the requested range.
#[derive(Clone, Debug)]
pub struct ScriptedRandomness {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandomness {
    /// Creates a scripted source. An empty script always picks index zero.
    #[must_use]
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl Randomness for ScriptedRandomness {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % len
    }
}
