//! Top-level variant generation
//!
//! Dispatches one mutation mode to its enumeration algorithm, restores the
//! original length after deletions when requested, and assembles the
//! flanked/labeled output columns.

use super::alphabet::random_fill;
use super::deletion::deletions_exhaustive;
use super::error::GenerateError;
use super::substitution::{substitutions_exhaustive, triple_substitutions_sampled};
use super::types::{FillSide, GenerateParams, GenerationResults, MutationMode, VariantSet};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Generate variants with a fresh, unseeded random source.
///
/// Convenience wrapper over [`generate_with_rng`] for callers that do not
/// need reproducible output.
pub fn generate(
    sequence: &str,
    forward_flank: &str,
    reverse_flank: &str,
    params: &GenerateParams,
) -> Result<GenerationResults, GenerateError> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(rand::random());
    generate_with_rng(sequence, forward_flank, reverse_flank, params, &mut rng)
}

/// Generate variants using an explicitly supplied random source.
///
/// Inputs are uppercased before any generation step. The sequence must be
/// non-empty and the effective mutation count must not exceed its length;
/// `k == 0` returns the original sequence as the single variant. Sample
/// sizes at or above the exhaustive count clamp silently.
pub fn generate_with_rng<R: Rng>(
    sequence: &str,
    forward_flank: &str,
    reverse_flank: &str,
    params: &GenerateParams,
    rng: &mut R,
) -> Result<GenerationResults, GenerateError> {
    let sequence = sequence.to_ascii_uppercase();
    let forward_flank = forward_flank.to_ascii_uppercase();
    let reverse_flank = reverse_flank.to_ascii_uppercase();

    if sequence.is_empty() {
        return Err(GenerateError::EmptySequence);
    }

    let len = sequence.chars().count();
    let k = params.mode.fixed_k().unwrap_or(params.k);
    if k > len {
        return Err(GenerateError::KOutOfRange { k, len });
    }

    let mut cores = match params.mode {
        MutationMode::SingleSub | MutationMode::DoubleSub | MutationMode::KSubExhaustive => {
            substitutions_exhaustive(&sequence, k)
        }
        MutationMode::TripleSubSampled => {
            triple_substitutions_sampled(&sequence, params.sample_size, rng)
        }
        MutationMode::SingleDel | MutationMode::DoubleDel | MutationMode::KDelExhaustive => {
            deletions_exhaustive(&sequence, k)
        }
    };

    // The k-exhaustive modes reduce an oversized enumeration by simple
    // random sampling; the sampled triple mode has already capped itself.
    if params.mode.is_k_parameterized() && cores.len() > params.sample_size {
        cores = sample_down(cores, params.sample_size, rng);
    }

    if params.mode.is_deletion() && params.keep_length && k > 0 {
        apply_fill(&mut cores, &random_fill(rng, k), params);
    }

    let stem = label_stem(params.mode, k);
    let variants = assemble_variants(&cores, &forward_flank, &reverse_flank, &stem);

    Ok(GenerationResults {
        params: params.clone(),
        input_sequence: sequence,
        forward_flank,
        reverse_flank,
        variants,
    })
}

/// Assemble precomputed core variants into the three output columns.
///
/// For callers that produced core variants elsewhere and only need
/// flanking and labeling; [`generate_with_rng`] uses this for its own
/// final step. Flanks and cores are concatenated as given, labels are
/// `{label_stem}_{i}` with 1-based i.
pub fn assemble_variants(
    cores: &[String],
    forward_flank: &str,
    reverse_flank: &str,
    label_stem: &str,
) -> VariantSet {
    let full_sequences = cores
        .iter()
        .map(|core| format!("{forward_flank}{core}{reverse_flank}"))
        .collect();
    let labels = (1..=cores.len())
        .map(|i| format!("{label_stem}_{i}"))
        .collect();

    VariantSet {
        full_sequences,
        core_sequences: cores.to_vec(),
        labels,
    }
}

/// One fill string, drawn per invocation, shared by every variant of the batch
fn apply_fill(cores: &mut [String], fill: &str, params: &GenerateParams) {
    for core in cores.iter_mut() {
        *core = match params.fill_side {
            FillSide::FivePrime => format!("{fill}{core}"),
            FillSide::ThreePrime => format!("{core}{fill}"),
        };
    }
}

/// Uniform sample of `amount` items without replacement
fn sample_down<R: Rng>(items: Vec<String>, amount: usize, rng: &mut R) -> Vec<String> {
    rand::seq::index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

fn label_stem(mode: MutationMode, k: usize) -> String {
    if mode.is_k_parameterized() {
        format!("{}_k{}", mode.label_stem(), k)
    } else {
        mode.name().to_string()
    }
}
