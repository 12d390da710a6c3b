//! Substitution variant enumeration
//!
//! One parameterized exhaustive algorithm covers every substitution mode;
//! the sampled triple mode adds a rejection loop that deduplicates by
//! resulting string.

use super::alphabet::alternatives;
use itertools::Itertools;
use rand::Rng;
use std::collections::HashSet;

/// Enumerate every sequence differing from `seq` at exactly `k` positions.
///
/// Position combinations ascend lexicographically; within a combination the
/// per-position alternatives run in alphabet order, so output is
/// position-major. `k == 0` yields the original sequence; `k` greater than
/// the length yields nothing (callers validate and reject that upstream).
pub fn substitutions_exhaustive(seq: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return vec![seq.to_string()];
    }

    let chars: Vec<char> = seq.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();

    for combo in (0..n).combinations(k) {
        let pools = combo
            .iter()
            .map(|&p| alternatives(chars[p]).iter().copied());

        for picks in pools.multi_cartesian_product() {
            let mut variant = chars.clone();
            for (&p, b) in combo.iter().zip(picks.iter()) {
                variant[p] = *b;
            }
            out.push(variant.into_iter().collect());
        }
    }

    out
}

/// Sample unique triple-substitution variants by rejection.
///
/// Draws three distinct random positions and a random non-original base at
/// each until `min(sample_size, 27 * C(len, 3))` distinct result strings
/// have accumulated. Deduplication is by string value, so different
/// position/base combinations producing the same string count once. The
/// clamp to the exhaustive upper bound guarantees termination.
pub fn triple_substitutions_sampled<R: Rng>(
    seq: &str,
    sample_size: usize,
    rng: &mut R,
) -> Vec<String> {
    let chars: Vec<char> = seq.chars().collect();
    let n = chars.len();

    let upper = exhaustive_substitution_count(n, 3);
    let target = (sample_size as u128).min(upper) as usize;

    let mut seen: HashSet<String> = HashSet::with_capacity(target);
    let mut out: Vec<String> = Vec::with_capacity(target);

    while out.len() < target {
        let mut positions = rand::seq::index::sample(rng, n, 3).into_vec();
        positions.sort_unstable();

        let mut variant = chars.clone();
        for &p in &positions {
            let alts = alternatives(chars[p]);
            variant[p] = alts[rng.gen_range(0..alts.len())];
        }

        let candidate: String = variant.into_iter().collect();
        if seen.insert(candidate.clone()) {
            out.push(candidate);
        }
    }

    out
}

/// Exhaustive substitution count: `C(len, k) * 3^k`, saturating
pub fn exhaustive_substitution_count(len: usize, k: usize) -> u128 {
    n_choose_k(len, k).saturating_mul(3u128.saturating_pow(k as u32))
}

/// Binomial coefficient, saturating on overflow
pub fn n_choose_k(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 1..=k {
        // Multiply before dividing keeps each step exact
        result = result.saturating_mul((n - k + i) as u128) / i as u128;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn hamming(a: &str, b: &str) -> usize {
        a.chars().zip(b.chars()).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_single_substitution_counts() {
        let seq = "ATGCGT";
        let variants = substitutions_exhaustive(seq, 1);
        assert_eq!(variants.len(), 3 * seq.len());
        for v in &variants {
            assert_eq!(hamming(seq, v), 1);
            assert_ne!(v, seq);
        }
    }

    #[test]
    fn test_single_substitution_order() {
        // Position-major, alternatives in alphabet order minus the original
        let variants = substitutions_exhaustive("ATG", 1);
        assert_eq!(variants[..3], ["TTG", "CTG", "GTG"]);
        assert_eq!(variants[3..6], ["AAG", "ACG", "AGG"]);
    }

    #[test]
    fn test_double_substitution_counts() {
        let seq = "ATGCG";
        let variants = substitutions_exhaustive(seq, 2);
        // 9 * C(5, 2)
        assert_eq!(variants.len(), 9 * 10);
        for v in &variants {
            assert_eq!(hamming(seq, v), 2);
        }
    }

    #[test]
    fn test_k_zero_returns_original() {
        assert_eq!(substitutions_exhaustive("ATG", 0), vec!["ATG".to_string()]);
    }

    #[test]
    fn test_exhaustive_counts() {
        assert_eq!(n_choose_k(5, 2), 10);
        assert_eq!(n_choose_k(3, 3), 1);
        assert_eq!(n_choose_k(2, 3), 0);
        assert_eq!(exhaustive_substitution_count(3, 3), 27);
        assert_eq!(exhaustive_substitution_count(4, 3), 4 * 27);
    }

    #[test]
    fn test_triple_sampled_reaches_target() {
        let seq = "ATGCGTACGT";
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let variants = triple_substitutions_sampled(seq, 50, &mut rng);
        assert_eq!(variants.len(), 50);

        let unique: HashSet<&String> = variants.iter().collect();
        assert_eq!(unique.len(), variants.len());
        for v in &variants {
            assert_eq!(hamming(seq, v), 3);
        }
    }

    #[test]
    fn test_triple_sampled_clamps_to_upper_bound() {
        // len 4: 27 * C(4, 3) = 108 possible strings
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let variants = triple_substitutions_sampled("ATGC", 10_000, &mut rng);
        assert_eq!(variants.len(), 108);
    }

    #[test]
    fn test_triple_sampled_deterministic_with_seed() {
        let seq = "ATGCGTACGT";
        let mut a = Xoshiro256StarStar::seed_from_u64(42);
        let mut b = Xoshiro256StarStar::seed_from_u64(42);
        assert_eq!(
            triple_substitutions_sampled(seq, 25, &mut a),
            triple_substitutions_sampled(seq, 25, &mut b)
        );
    }
}
