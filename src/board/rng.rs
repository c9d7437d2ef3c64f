// Random sources for layout generation and reply selection.

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    fn range(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        low + (high - low) * self.next_f64()
    }

    /// Uniform index in `0..n`; returns 0 when `n == 0`.
    fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fisher-Yates shuffle of `0..n`.
    fn shuffled_indices(&mut self, n: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = self.index(i + 1);
            pool.swap(i, j);
        }
        pool
    }
}

/// Browser entropy via `Math.random()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

/// Deterministic xorshift64* generator. Not cryptographically secure.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

#[cfg(test)]
impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        // zero is a fixed point of xorshift
        let seed = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

#[cfg(test)]
impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        // top 53 bits -> [0,1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
