//! Source of the winning index.

use rand::RngExt;

/// Picks a uniformly distributed index in `0..len`. Callers guarantee
/// `len > 0`.
pub trait IndexSource {
    fn pick(&mut self, len: usize) -> usize;
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl IndexSource for ThreadRngSource {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Replays a fixed list of indices, cycling when it runs out.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

#[cfg(test)]
impl IndexSource for ScriptedSource {
    fn pick(&mut self, _len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let idx = self.picks[self.next % self.picks.len()];
        self.next += 1;
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_stays_in_range() {
        let mut source = ThreadRngSource;
        for len in 1..50 {
            assert!(source.pick(len) < len);
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedSource::new(vec![2, 0]);
        assert_eq!(source.pick(5), 2);
        assert_eq!(source.pick(5), 0);
        assert_eq!(source.pick(5), 2);
    }
}
