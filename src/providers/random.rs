use std::sync::Mutex;

use rand::RngExt;

use crate::interfaces::random::RandomSource;

/// Uniform draws from the thread-local generator, which is seeded from the
/// operating system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: Mutex<usize>,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn index(&self, len: usize) -> usize {
        if self.values.is_empty() || len == 0 {
            return 0;
        }
        let mut cursor = match self.cursor.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom;
        for _ in 0..200 {
            assert!(random.index(3) < 3);
        }
        assert_eq!(random.index(1), 0);
        assert_eq!(random.index(0), 0);
    }

    #[test]
    fn system_random_reaches_every_index() {
        let random = SystemRandom;
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            seen[random.index(4)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn sequence_cycles_and_wraps() {
        let random = SequenceRandom::new(vec![1, 5]);
        assert_eq!(random.index(3), 1);
        assert_eq!(random.index(3), 2);
        assert_eq!(random.index(3), 1);
    }
}
