//! DNA alphabet tables and sequence normalization helpers

use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;

/// Standard DNA bases, in the order substitution alternatives are enumerated
pub const BASES: [char; 4] = ['A', 'T', 'C', 'G'];

/// For each base, the three alternatives in `BASES` order
static ALTERNATIVES: Lazy<HashMap<char, Vec<char>>> = Lazy::new(|| {
    BASES
        .iter()
        .map(|&b| (b, BASES.iter().copied().filter(|&o| o != b).collect()))
        .collect()
});

/// Check if a character is a standard DNA base
pub fn is_standard_base(c: char) -> bool {
    matches!(c, 'A' | 'C' | 'G' | 'T')
}

/// Substitution alternatives for `base`: every standard base except `base`
/// itself. A non-standard base differs from all four, so all four are
/// returned.
pub fn alternatives(base: char) -> &'static [char] {
    ALTERNATIVES
        .get(&base)
        .map(|v| v.as_slice())
        .unwrap_or(&BASES)
}

/// Uppercase raw user input and drop all whitespace (newlines, spaces, tabs)
pub fn sanitize_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Draw a random fill string of `len` bases, each uniform over `BASES`
pub fn random_fill<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| BASES[rng.gen_range(0..BASES.len())]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_alternatives_order() {
        assert_eq!(alternatives('A'), &['T', 'C', 'G']);
        assert_eq!(alternatives('T'), &['A', 'C', 'G']);
        assert_eq!(alternatives('C'), &['A', 'T', 'G']);
        assert_eq!(alternatives('G'), &['A', 'T', 'C']);
    }

    #[test]
    fn test_alternatives_nonstandard_base() {
        // 'N' is not in the alphabet, so every standard base qualifies
        assert_eq!(alternatives('N'), &BASES);
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("at\nGc\t a"), "ATGCA");
        assert_eq!(sanitize_input(""), "");
    }

    #[test]
    fn test_random_fill() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let fill = random_fill(&mut rng, 12);
        assert_eq!(fill.chars().count(), 12);
        assert!(fill.chars().all(is_standard_base));

        // Same seed reproduces the same fill
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(7);
        assert_eq!(random_fill(&mut rng2, 12), fill);
    }
}
