use indexmap::IndexMap;

/// Get the percentage (0 to 100) of residues in the sequence that are covered by at least
/// one of the peptides. Every occurrence of a peptide counts, also occurrences that overlap
/// each other. Empty peptides are ignored and an empty sequence has a coverage of 0.
///
/// ```rust
/// # use proteosim::sequence::sequence_coverage;
/// assert_eq!(sequence_coverage("ABCDEFGH", &["ABC", "EF"]), 62.5);
/// ```
pub fn sequence_coverage(sequence: &str, peptides: &[impl AsRef<str>]) -> f64 {
    let residues: Vec<char> = sequence.chars().collect();
    if residues.is_empty() {
        return 0.0;
    }
    let mut covered = vec![false; residues.len()];

    for peptide in peptides {
        let peptide: Vec<char> = peptide.as_ref().chars().collect();
        if peptide.is_empty() {
            continue;
        }
        for (start, window) in residues.windows(peptide.len()).enumerate() {
            if window == peptide.as_slice() {
                covered[start..start + peptide.len()].fill(true);
            }
        }
    }

    covered.iter().filter(|c| **c).count() as f64 / residues.len() as f64 * 100.0
}

/// Get the coverage for all proteins in the collection, using the peptides listed under the
/// same identifier. A protein without an entry in `peptides` has a coverage of 0.
pub fn coverage_collection(
    proteins: &IndexMap<String, String>,
    peptides: &IndexMap<String, Vec<String>>,
) -> IndexMap<String, f64> {
    proteins
        .iter()
        .map(|(id, sequence)| {
            let coverage = peptides
                .get(id)
                .map_or(0.0, |peptides| sequence_coverage(sequence, peptides));
            (id.clone(), coverage)
        })
        .collect()
}
