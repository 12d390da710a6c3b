//! Deletion variant enumeration

use itertools::Itertools;

/// Enumerate every sequence with exactly `k` positions of `seq` removed.
///
/// Position combinations ascend lexicographically. Each result is built by
/// skipping the combination's positions in one pass, so removing several
/// positions never shifts the remaining indices. `k == 0` yields the
/// original sequence; `k` greater than the length yields nothing (callers
/// validate and reject that upstream).
pub fn deletions_exhaustive(seq: &str, k: usize) -> Vec<String> {
    let chars: Vec<char> = seq.chars().collect();
    let n = chars.len();

    (0..n)
        .combinations(k)
        .map(|combo| {
            let mut drop = combo.iter().copied().peekable();
            let mut out = String::with_capacity(n.saturating_sub(k));
            for (i, &c) in chars.iter().enumerate() {
                if drop.peek() == Some(&i) {
                    drop.next();
                } else {
                    out.push(c);
                }
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::substitution::n_choose_k;

    /// True if `sub` can be formed from `full` by deleting characters
    fn is_subsequence(sub: &str, full: &str) -> bool {
        let mut rest = sub.chars().peekable();
        for c in full.chars() {
            if rest.peek() == Some(&c) {
                rest.next();
            }
        }
        rest.peek().is_none()
    }

    #[test]
    fn test_single_deletion() {
        let variants = deletions_exhaustive("ATG", 1);
        assert_eq!(variants, ["TG", "AG", "AT"]);
    }

    #[test]
    fn test_single_deletion_counts() {
        let seq = "ATGCGTAC";
        let variants = deletions_exhaustive(seq, 1);
        assert_eq!(variants.len(), seq.len());
        for v in &variants {
            assert_eq!(v.len(), seq.len() - 1);
            assert!(is_subsequence(v, seq));
        }
    }

    #[test]
    fn test_double_deletion() {
        let variants = deletions_exhaustive("ATCG", 2);
        assert_eq!(variants, ["CG", "TG", "TC", "AG", "AC", "AT"]);
    }

    #[test]
    fn test_double_deletion_counts() {
        let seq = "ATGCGTAC";
        let variants = deletions_exhaustive(seq, 2);
        assert_eq!(variants.len() as u128, n_choose_k(seq.len(), 2));
        for v in &variants {
            assert_eq!(v.len(), seq.len() - 2);
            assert!(is_subsequence(v, seq));
        }
    }

    #[test]
    fn test_k_deletion_counts() {
        let seq = "ATGCG";
        let variants = deletions_exhaustive(seq, 3);
        assert_eq!(variants.len() as u128, n_choose_k(5, 3));
        for v in &variants {
            assert_eq!(v.len(), 2);
            assert!(is_subsequence(v, seq));
        }
    }

    #[test]
    fn test_k_zero_returns_original() {
        assert_eq!(deletions_exhaustive("ATG", 0), vec!["ATG".to_string()]);
    }

    #[test]
    fn test_full_length_deletion_yields_empty_string() {
        assert_eq!(deletions_exhaustive("ATG", 3), vec![String::new()]);
    }
}
