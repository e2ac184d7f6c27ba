//! RNG oracle for deterministic random number generation.
//!
//! The controller never touches ambient randomness. Every roll is derived from
//! a seed computed out of the game seed, the boss's tick counter and a
//! [`RollContext`], so a given state, input and seed always produce the same
//! next tick. Tests inject their own [`RngOracle`] to force outcomes.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        // 24 bits fit exactly in the f32 mantissa
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns true with probability `p`.
    fn chance(&self, seed: u64, p: f32) -> bool {
        self.unit(seed) < p
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state, a single multiply plus a
/// xorshift and a data-dependent rotate.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Identifies which decision a roll belongs to, so a single tick can draw
/// several independent values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    MutterLine = 0,
    MutterGap = 1,
    WanderRepath = 2,
    ScaredCancel = 3,
    PainChance = 4,
    PainLine = 5,
    Stun = 6,
}

/// Compute a deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set when the encounter starts
/// * `tick` - Boss tick counter (increments every simulated tick)
/// * `context` - Which decision within the tick is being rolled
pub fn compute_seed(game_seed: u64, tick: u64, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style mixing constants
    let mut hash = game_seed;

    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64 + 1).wrapping_mul(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
