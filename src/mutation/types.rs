//! Data types for variant generation

use super::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default sample size for sampled triple substitution
pub const DEFAULT_TRIPLE_SAMPLE_SIZE: usize = 44_424;

/// Recommended upper bound on sample size (bounds memory for the
/// combinatorial modes)
pub const MAX_SAMPLE_SIZE: usize = 100_000;

/// Mutation mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationMode {
    /// Every position substituted with every other base
    SingleSub,
    /// Every position pair substituted with every base combination
    DoubleSub,
    /// Three positions substituted, sampled down to a requested size
    TripleSubSampled,
    /// Exhaustive k-position substitution, sampled if over the cap
    KSubExhaustive,
    /// Every single position deleted
    SingleDel,
    /// Every position pair deleted
    DoubleDel,
    /// Exhaustive k-position deletion, sampled if over the cap
    KDelExhaustive,
}

impl Default for MutationMode {
    fn default() -> Self {
        Self::SingleSub
    }
}

impl MutationMode {
    /// All modes in UI presentation order
    pub const ALL: [MutationMode; 7] = [
        Self::SingleSub,
        Self::DoubleSub,
        Self::TripleSubSampled,
        Self::KSubExhaustive,
        Self::SingleDel,
        Self::DoubleDel,
        Self::KDelExhaustive,
    ];

    /// Stable mode name used in labels and serialized parameter sets
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleSub => "single_sub",
            Self::DoubleSub => "double_sub",
            Self::TripleSubSampled => "triple_sub_sampled",
            Self::KSubExhaustive => "k_sub_exhaustive",
            Self::SingleDel => "single_del",
            Self::DoubleDel => "double_del",
            Self::KDelExhaustive => "k_del_exhaustive",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::SingleSub => "Single substitution (exhaustive)".to_string(),
            Self::DoubleSub => "Double substitution (exhaustive)".to_string(),
            Self::TripleSubSampled => "Triple substitution (sampled)".to_string(),
            Self::KSubExhaustive => "k-base substitution (exhaustive, sampled over cap)".to_string(),
            Self::SingleDel => "Single deletion".to_string(),
            Self::DoubleDel => "Double deletion".to_string(),
            Self::KDelExhaustive => "k-base deletion (exhaustive, sampled over cap)".to_string(),
        }
    }

    /// True for the deletion family (shortens the core sequence)
    pub fn is_deletion(&self) -> bool {
        matches!(self, Self::SingleDel | Self::DoubleDel | Self::KDelExhaustive)
    }

    /// True for modes whose mutation count comes from [`GenerateParams::k`]
    pub fn is_k_parameterized(&self) -> bool {
        matches!(self, Self::KSubExhaustive | Self::KDelExhaustive)
    }

    /// True for modes that honor [`GenerateParams::sample_size`]
    pub fn uses_sampling(&self) -> bool {
        matches!(
            self,
            Self::TripleSubSampled | Self::KSubExhaustive | Self::KDelExhaustive
        )
    }

    /// Mutation count for the fixed-k modes; `None` for k-parameterized ones
    pub fn fixed_k(&self) -> Option<usize> {
        match self {
            Self::SingleSub | Self::SingleDel => Some(1),
            Self::DoubleSub | Self::DoubleDel => Some(2),
            Self::TripleSubSampled => Some(3),
            Self::KSubExhaustive | Self::KDelExhaustive => None,
        }
    }

    /// Short stem used when the label carries an explicit k, e.g. `sub_k2_1`
    pub fn label_stem(&self) -> &'static str {
        match self {
            Self::KSubExhaustive => "sub",
            Self::KDelExhaustive => "del",
            _ => self.name(),
        }
    }
}

impl fmt::Display for MutationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutationMode {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| GenerateError::UnsupportedMode(s.to_string()))
    }
}

/// Which end receives the fill bases when a deletion keeps length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillSide {
    /// Prepend fill bases at the 5' end
    FivePrime,
    /// Append fill bases at the 3' end
    ThreePrime,
}

impl Default for FillSide {
    fn default() -> Self {
        Self::FivePrime
    }
}

impl FillSide {
    pub fn description(&self) -> &'static str {
        match self {
            Self::FivePrime => "5' end (prepend)",
            Self::ThreePrime => "3' end (append)",
        }
    }
}

/// Parameters for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateParams {
    pub mode: MutationMode,
    /// Mutation count for the k-parameterized modes; ignored otherwise
    pub k: usize,
    /// Cap on returned variants for the sampled/capped modes
    pub sample_size: usize,
    /// Pad deletion variants back to the original length
    pub keep_length: bool,
    /// Which end the fill bases attach to
    pub fill_side: FillSide,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            mode: MutationMode::SingleSub,
            k: 1,
            sample_size: DEFAULT_TRIPLE_SAMPLE_SIZE,
            keep_length: true,
            fill_side: FillSide::FivePrime,
        }
    }
}

/// Three order-aligned output columns; index i in one column corresponds to
/// index i in the others
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSet {
    /// Flanked variants: forward flank + core + reverse flank
    pub full_sequences: Vec<String>,
    /// Core variants without flanks
    pub core_sequences: Vec<String>,
    /// Per-variant labels, unique within one run
    pub labels: Vec<String>,
}

impl VariantSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Complete output of one generation run, including the normalized inputs
/// that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResults {
    pub params: GenerateParams,
    pub input_sequence: String,
    pub forward_flank: String,
    pub reverse_flank: String,
    pub variants: VariantSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_name_round_trip() {
        for mode in MutationMode::ALL {
            assert_eq!(mode.name().parse::<MutationMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "unsupported".parse::<MutationMode>().unwrap_err();
        assert_eq!(err, GenerateError::UnsupportedMode("unsupported".to_string()));
    }

    #[test]
    fn test_fixed_k() {
        assert_eq!(MutationMode::SingleSub.fixed_k(), Some(1));
        assert_eq!(MutationMode::DoubleDel.fixed_k(), Some(2));
        assert_eq!(MutationMode::TripleSubSampled.fixed_k(), Some(3));
        assert_eq!(MutationMode::KSubExhaustive.fixed_k(), None);
    }
}
