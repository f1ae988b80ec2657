//! Short code generation.
//!
//! Codes are drawn uniformly from a base62 alphabet. The generator gives no
//! uniqueness guarantee on its own; [`crate::application::services::LinkService`]
//! retries on collisions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Symbols a short code is built from: `A-Z`, `a-z`, `0-9`.
pub const BASE62_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated short codes.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Mixed into the time seed so concurrent calls within one clock tick differ.
static SEED_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Produces fixed-length random codes.
///
/// Not cryptographically secure: codes are public identifiers, so only
/// statistical uniformity matters. A fresh RNG is seeded from the clock on
/// every call.
#[derive(Debug, Clone)]
pub struct ShortCodeGenerator {
    alphabet: &'static [u8],
    length: usize,
}

impl Default for ShortCodeGenerator {
    fn default() -> Self {
        Self::new(SHORT_CODE_LENGTH)
    }
}

impl ShortCodeGenerator {
    /// Creates a base62 generator producing codes of `length` symbols.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn new(length: usize) -> Self {
        Self::with_alphabet(BASE62_ALPHABET, length)
    }

    /// Creates a generator over a custom alphabet.
    ///
    /// # Panics
    ///
    /// Panics if `alphabet` is empty or `length` is zero.
    pub fn with_alphabet(alphabet: &'static [u8], length: usize) -> Self {
        assert!(!alphabet.is_empty(), "alphabet must not be empty");
        assert!(length > 0, "code length must be positive");
        Self { alphabet, length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates one code.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let code = ShortCodeGenerator::default().generate();
    /// assert_eq!(code.len(), 6);
    /// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    /// ```
    pub fn generate(&self) -> String {
        let mut rng = StdRng::seed_from_u64(time_seed());

        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())] as char)
            .collect()
    }
}

fn time_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let sequence = SEED_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    nanos ^ sequence.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_has_default_length() {
        let code = ShortCodeGenerator::default().generate();
        assert_eq!(code.len(), SHORT_CODE_LENGTH);
    }

    #[test]
    fn test_generate_uses_base62_only() {
        let generator = ShortCodeGenerator::default();
        for _ in 0..200 {
            let code = generator.generate();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_custom_length() {
        let code = ShortCodeGenerator::new(11).generate();
        assert_eq!(code.len(), 11);
    }

    #[test]
    fn test_generate_produces_distinct_codes() {
        let generator = ShortCodeGenerator::default();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 62^6 possibilities; a handful of collisions would still be plausible,
        // a repeated seed would collapse the set.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_generate_covers_alphabet_roughly_uniformly() {
        let generator = ShortCodeGenerator::with_alphabet(b"abcd", 8);
        let mut counts: HashMap<char, usize> = HashMap::new();

        for _ in 0..2000 {
            for c in generator.generate().chars() {
                *counts.entry(c).or_default() += 1;
            }
        }

        // 16000 draws over 4 symbols: expect 4000 each.
        assert_eq!(counts.len(), 4);
        for (&symbol, &count) in &counts {
            assert!(
                (3400..4600).contains(&count),
                "symbol {symbol} drawn {count} times"
            );
        }
    }

    #[test]
    #[should_panic(expected = "code length must be positive")]
    fn test_zero_length_panics() {
        ShortCodeGenerator::new(0);
    }
}
