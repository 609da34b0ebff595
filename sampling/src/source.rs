use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

/// Seedable ChaCha8 stream. Two sources built from the same seed produce the
/// same sequence.
pub struct Source {
    source: ChaCha8Rng,
}

/// Draws a fresh 32-byte seed from the operating system.
pub fn new_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    seed
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn from_entropy() -> Source {
        Source::new(new_seed())
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    /// Independent child stream seeded from this one.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Rejection-samples `next_u64() & mask` until it is below `max`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        debug_assert!(max > 0 && max - 1 <= mask);
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Fills `limbs` (little-endian) with a uniform value of at most `bits` bits.
    pub fn fill_limbs(&mut self, limbs: &mut [u64], bits: usize) {
        debug_assert!(bits <= 64 * limbs.len());
        limbs.iter_mut().for_each(|l| *l = self.next_u64());
        let full: usize = bits / 64;
        if full < limbs.len() {
            limbs[full] &= (1u64 << (bits % 64)) - 1;
            limbs[full + 1..].fill(0);
        }
    }

    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }

    #[inline(always)]
    pub fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }

    #[inline(always)]
    pub fn next_i64(&mut self) -> i64 {
        self.next_u64() as i64
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a: Source = Source::new([7u8; 32]);
        let mut b: Source = Source::new([7u8; 32]);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let mut ca: Source = a.branch();
        let mut cb: Source = b.branch();
        assert_eq!(ca.next_i64(), cb.next_i64());
        assert_ne!(Source::new([1u8; 32]).next_u64(), Source::new([2u8; 32]).next_u64());
    }

    #[test]
    fn bounded_draws() {
        let mut source: Source = Source::new([3u8; 32]);
        for _ in 0..1000 {
            assert!(source.next_u64n(12289, 0x3fff) < 12289);
            let f: f64 = source.next_f64(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&f));
        }
    }

    #[test]
    fn masked_limbs() {
        let mut source: Source = Source::new([5u8; 32]);
        let mut limbs: [u64; 4] = [0u64; 4];
        for _ in 0..64 {
            source.fill_limbs(&mut limbs, 130);
            assert!(limbs[2] < 4);
            assert_eq!(limbs[3], 0);
        }
        source.fill_limbs(&mut limbs, 256);
        assert!(limbs[3] != 0);
        source.fill_limbs(&mut limbs, 0);
        assert_eq!(limbs, [0u64; 4]);
    }

    #[test]
    fn entropy_seeds_differ() {
        assert_ne!(new_seed(), new_seed());
        let mut s: Source = Source::from_entropy();
        let mut buf: [u8; 64] = [0u8; 64];
        s.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }
}
