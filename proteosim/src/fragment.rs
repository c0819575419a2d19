use std::fmt::Display;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    chemistry::{MzSettings, ResidueMassTable},
};

/// The ion series of a fragment
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IonSeries {
    /// N terminal fragment, a prefix of the peptide
    B,
    /// C terminal fragment, a suffix of the peptide
    Y,
}

impl Display for IonSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::B => write!(f, "b"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// A theoretical fragment of a peptide
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FragmentIon {
    /// The ion series
    pub series: IonSeries,
    /// The number of residues in this fragment
    pub ordinal: usize,
    /// The residues of this fragment
    pub sequence: String,
}

impl FragmentIon {
    /// The mass-to-charge ratio of this fragment, as the sum of its residue masses carrying the given charge.
    /// # Errors
    /// If a residue is not defined in the table or the charge is not positive.
    pub fn mz(&self, table: &ResidueMassTable, settings: MzSettings) -> Result<f64, Error> {
        settings.mz(table.molecular_mass(&self.sequence)?)
    }
}

impl Display for FragmentIon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} {}", self.series, self.ordinal, self.sequence)
    }
}

/// Generate all b (prefix) and y (suffix) ions of a peptide, first b1 to bn then y1 to yn.
/// Both series contain the full peptide as their last ion. An empty peptide has no fragments.
pub fn fragment_ions(peptide: &str) -> Vec<FragmentIon> {
    let starts: Vec<usize> = peptide.char_indices().map(|(offset, _)| offset).collect();
    let length = starts.len();

    let b = (1..=length).map(|ordinal| FragmentIon {
        series: IonSeries::B,
        ordinal,
        sequence: peptide[..starts.get(ordinal).copied().unwrap_or(peptide.len())].to_string(),
    });
    let y = (1..=length).map(|ordinal| FragmentIon {
        series: IonSeries::Y,
        ordinal,
        sequence: peptide[starts[length - ordinal]..].to_string(),
    });
    b.chain(y).collect()
}

/// Get the unique sequences of all b and y ions of a peptide, see [`fragment_ions`]. A
/// sequence that is both a prefix and a suffix (like the full peptide) is only present once.
///
/// ```rust
/// # use proteosim::fragment_peptide;
/// let fragments = fragment_peptide("PEPT");
/// assert_eq!(fragments.len(), 7);
/// assert!(fragments.contains("EPT"));
/// ```
pub fn fragment_peptide(peptide: &str) -> IndexSet<String> {
    fragment_ions(peptide)
        .into_iter()
        .map(|ion| ion.sequence)
        .collect()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn pept() {
        let fragments = fragment_peptide("PEPT");
        let expected: IndexSet<String> = ["P", "PE", "PEP", "PEPT", "EPT", "PT", "T"]
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(fragments, expected);
    }

    #[test]
    fn series() {
        let ions = fragment_ions("PEK");
        let names: Vec<String> = ions.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["b1 P", "b2 PE", "b3 PEK", "y1 K", "y2 EK", "y3 PEK"]);
    }

    #[test]
    fn edge_cases() {
        assert!(fragment_peptide("").is_empty());
        assert!(fragment_ions("").is_empty());
        assert_eq!(fragment_peptide("K").into_iter().collect::<Vec<_>>(), ["K"]);
        // Repeated residues collapse to a single fragment per length
        assert_eq!(fragment_peptide("AAA").len(), 3);
    }

    #[test]
    fn mz() {
        let table = ResidueMassTable::new([('A', 10.0), ('K', 20.0)]).unwrap();
        let ions = fragment_ions("AK");
        let settings = MzSettings {
            charge: 1,
            proton_mass: 1.0,
        };
        assert_eq!(ions[0].mz(&table, settings).unwrap(), 11.0);
        assert_eq!(ions[2].mz(&table, settings).unwrap(), 21.0);
        assert_eq!(ions[3].mz(&table, settings).unwrap(), 31.0);
        assert!(ions[0].mz(&table, MzSettings::with_charge(0)).is_err());
    }
}
