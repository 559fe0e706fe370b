//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, so shuffles replay identically in tests.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound). Returns 0 for a zero bound.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_int(1000), rng2.next_int(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        assert!(rng.next_int(100) < 100);
        assert_eq!(rng.next_int(0), 0);
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut rng = Rng::new(7);
        let mut items = vec!['A', 'B', 'C', 'D', 'E', 'F'];
        for _ in 0..20 {
            rng.shuffle(&mut items);
            let mut sorted = items.clone();
            sorted.sort();
            assert_eq!(sorted, vec!['A', 'B', 'C', 'D', 'E', 'F']);
        }
    }

    #[test]
    fn shuffle_eventually_reorders() {
        let mut rng = Rng::new(99);
        let original = vec![1, 2, 3, 4];
        let moved = (0..20).any(|_| {
            let mut items = original.clone();
            rng.shuffle(&mut items);
            items != original
        });
        assert!(moved);
    }

    #[test]
    fn shuffle_tolerates_short_slices() {
        let mut rng = Rng::new(3);
        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        let mut one = [5];
        rng.shuffle(&mut one);
        assert_eq!(one, [5]);
    }
}
