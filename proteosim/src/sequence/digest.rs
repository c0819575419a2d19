use std::ops::{Range, RangeInclusive};

use indexmap::IndexMap;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sequence::CleavageRule;

/// Control which peptides are produced by a digest.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct DigestSettings {
    /// The minimal number of residues of a peptide (inclusive)
    pub min_length: usize,
    /// The maximal number of residues of a peptide (inclusive), `None` means the length of the digested sequence
    pub max_length: Option<usize>,
    /// The maximal number of consecutive cut sites that can be skipped
    pub missed_cleavages: usize,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            min_length: 5,
            max_length: Some(30),
            missed_cleavages: 0,
        }
    }
}

impl DigestSettings {
    /// Keep peptides with a length in `min_length..=max_length` without any missed cleavages.
    pub const fn with_lengths(min_length: usize, max_length: Option<usize>) -> Self {
        Self {
            min_length,
            max_length,
            missed_cleavages: 0,
        }
    }

    /// Set the maximal number of missed cleavages.
    #[must_use]
    pub const fn missed_cleavages(self, missed_cleavages: usize) -> Self {
        Self {
            missed_cleavages,
            ..self
        }
    }

    /// The allowed peptide lengths for a sequence of the given number of residues
    fn allowed_lengths(&self, sequence_length: usize) -> RangeInclusive<usize> {
        self.min_length..=self.max_length.unwrap_or(sequence_length)
    }
}

/// Digest a sequence with the given cleavage rule. The sequence is cut at every boundary
/// reported by [`CleavageRule::match_locations`] and all pieces (or runs of up to
/// `missed_cleavages + 1` consecutive pieces) with an allowed length are returned in the
/// order they occur in the sequence. Duplicates are retained.
///
/// An empty piece, which occurs when the rule cuts before the first or after the last
/// residue, is only returned when `min_length` is 0. An empty sequence always results in
/// no peptides.
///
/// ```rust
/// # use proteosim::sequence::{DigestSettings, Enzyme, digest_sequence};
/// let peptides = digest_sequence(
///     "AKRPAKRPAAK",
///     Enzyme::Trypsin.rule(),
///     DigestSettings::with_lengths(2, None),
/// );
/// assert_eq!(peptides, ["AK", "RPAK", "RPAAK"]);
/// ```
pub fn digest_sequence(
    sequence: &str,
    rule: &CleavageRule,
    settings: DigestSettings,
) -> Vec<String> {
    digest_ranges(sequence, rule, settings)
        .into_iter()
        .map(|range| sequence[range].to_string())
        .collect()
}

/// Digest a sequence like [`digest_sequence`] but give the byte ranges of the peptides in
/// the sequence. Every range occurs at most once. A run of multiple pieces never starts or
/// ends with an empty piece, so an empty piece at the edge of the sequence is only ever
/// returned on its own.
///
/// ```rust
/// # use proteosim::sequence::{DigestSettings, Enzyme, digest_ranges};
/// let ranges = digest_ranges(
///     "AKK",
///     Enzyme::LysC.rule(),
///     DigestSettings::with_lengths(1, None).missed_cleavages(1),
/// );
/// assert_eq!(ranges, [0..2, 0..3, 2..3]);
/// ```
pub fn digest_ranges(
    sequence: &str,
    rule: &CleavageRule,
    settings: DigestSettings,
) -> Vec<Range<usize>> {
    if sequence.is_empty() {
        return Vec::new();
    }
    let residues = sequence.chars().count();
    let allowed = settings.allowed_lengths(residues);

    let mut sites = vec![0];
    sites.extend_from_slice(&rule.match_locations(sequence));
    sites.push(sequence.len());

    let mut result = Vec::new();
    for (index, start) in sites.iter().enumerate() {
        for (extra, end) in sites
            .iter()
            .skip(index + 1)
            .take(settings.missed_cleavages + 1)
            .enumerate()
        {
            // Empty pieces at the edges are never joined to their neighbour
            if extra > 0 && (sites[index + 1] == *start || sites[index + extra] == *end) {
                continue;
            }
            if allowed.contains(&sequence[*start..*end].chars().count()) {
                result.push(*start..*end);
            }
        }
    }
    log::trace!(
        "digested sequence of {} residues at {} sites into {} peptides",
        residues,
        sites.len() - 2,
        result.len()
    );
    result
}

/// Digest all proteins in the collection, see [`digest_sequence`]. The resulting map has
/// the same keys in the same order as the given collection.
pub fn digest_collection(
    proteins: &IndexMap<String, String>,
    rule: &CleavageRule,
    settings: DigestSettings,
) -> IndexMap<String, Vec<String>> {
    log::debug!("digesting {} proteins with {settings:?}", proteins.len());

    #[cfg(feature = "rayon")]
    let proteins = proteins.par_iter();
    #[cfg(not(feature = "rayon"))]
    let proteins = proteins.iter();

    proteins
        .map(|(id, sequence)| (id.clone(), digest_sequence(sequence, rule, settings)))
        .collect()
}
