//! Fuzz target for FASTA parsing
use afl::*;
use proteosim::sequence::{DigestSettings, Enzyme, digest_collection, parse_fasta};

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(proteins) = parse_fasta(data, None) {
            let peptides =
                digest_collection(&proteins, Enzyme::Trypsin.rule(), DigestSettings::default());
            assert_eq!(peptides.len(), proteins.len());
        }
    });
}
