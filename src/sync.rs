//! Cycle synchronization for unequal-length pattern sequences.
//!
//! The melody, the per-step duration pattern and the harmonic progression
//! are all cyclic and usually have different lengths. Repeating the melody
//! `2 * lcm` of those lengths guarantees every pattern completes a whole
//! number of cycles by the end of the pass.

/// Euclidean greatest common divisor. Inputs here are sequence lengths,
/// always >= 1.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple of two values.
pub fn lcm2(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

/// Least common multiple of one or more values, folded pairwise.
pub fn lcm(values: &[u64]) -> u64 {
    values.iter().copied().fold(1, lcm2)
}

/// Number of times the melody token sequence is repeated so that every
/// cyclic pattern lines back up at the end of the pass. The factor of 2
/// mirrors the pairing of each token with its running step index.
pub fn melody_repetitions(med_len: usize, dur_len: usize, harmony_len: usize) -> usize {
    2 * lcm(&[med_len as u64, dur_len as u64, harmony_len as u64]) as usize
}
