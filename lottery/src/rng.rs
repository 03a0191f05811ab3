use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator.
///
/// Same constants and seed scrambling as the generator most JVM programs
/// draw from, so a seed picked there reproduces the same balls here. The
/// whole state is the 48-bit seed: two instances built from the same `u64`
/// produce identical streams on every platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance one step and return the top `bits` bits of the new state.
    pub fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        (self.state >> (48 - bits)) as u32
    }

    /// Uniform integer in `[0, bound)`.
    ///
    /// Powers of two take the high bits of a single step. Any other bound
    /// reduces a 31-bit sample modulo `bound` and rejects the short tail that
    /// would bias small values, which costs an extra step with probability
    /// below `bound / 2^31`.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(
            bound > 0 && bound <= i32::MAX as u32,
            "bound must be in 1..=i32::MAX, got {bound}"
        );

        if bound.is_power_of_two() {
            return ((u64::from(bound) * u64::from(self.next_bits(31))) >> 31) as u32;
        }

        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            // Accept unless `bits` landed in the final, incomplete bucket.
            if u64::from(bits - value) + u64::from(bound - 1) <= i32::MAX as u64 {
                return value;
            }
        }
    }
}

impl RngCore for Lcg48 {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32)
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_bits(32) as i32 as i64;
        let low = self.next_bits(32) as i32 as i64;
        (high << 32).wrapping_add(low) as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg48 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
