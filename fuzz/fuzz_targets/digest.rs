//! Fuzz target for digesting arbitrary sequences with all enzymes
use std::collections::HashSet;

use afl::*;
use proteosim::sequence::{DigestSettings, Enzyme, digest_ranges, digest_sequence};

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(s) = std::str::from_utf8(data) {
            for enzyme in Enzyme::ALL {
                // All pieces together have to give back the full sequence
                let pieces =
                    digest_sequence(s, enzyme.rule(), DigestSettings::with_lengths(0, None));
                assert_eq!(pieces.concat(), s);
                let settings = DigestSettings::with_lengths(2, Some(8)).missed_cleavages(2);
                for peptide in digest_sequence(s, enzyme.rule(), settings) {
                    assert!((2..=8).contains(&peptide.chars().count()));
                }
                // No stretch of the sequence is reported twice
                let settings = DigestSettings::with_lengths(0, None).missed_cleavages(3);
                let ranges = digest_ranges(s, enzyme.rule(), settings);
                let unique: HashSet<_> = ranges.iter().cloned().collect();
                assert_eq!(unique.len(), ranges.len());
            }
        }
    });
}
