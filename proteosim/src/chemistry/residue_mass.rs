use std::{collections::HashMap, sync::LazyLock};

use context_error::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Error, ProteosimError,
    parse_json::{ParseJson, use_serde},
};

/// The average residue masses (in Dalton) of the 20 standard amino acids
const STANDARD_MASSES: [(char, f64); 20] = [
    ('A', 71.08),
    ('C', 103.15),
    ('D', 115.09),
    ('E', 129.12),
    ('F', 147.18),
    ('G', 57.05),
    ('H', 137.14),
    ('I', 113.16),
    ('K', 128.17),
    ('L', 113.16),
    ('M', 131.19),
    ('N', 114.10),
    ('P', 97.12),
    ('Q', 128.13),
    ('R', 156.19),
    ('S', 87.08),
    ('T', 101.11),
    ('V', 99.13),
    ('W', 186.21),
    ('Y', 163.18),
];

static STANDARD: LazyLock<ResidueMassTable> = LazyLock::new(|| ResidueMassTable {
    masses: STANDARD_MASSES.into_iter().collect(),
});

/// A table with the mass (in Dalton) of every residue, identified by its one letter code.
/// All masses are finite and positive. The JSON representation is a plain object, like
/// `{"A": 71.08, "K": 128.17}`.
///
/// ```rust
/// # use proteosim::chemistry::ResidueMassTable;
/// let table = ResidueMassTable::new([('A', 1.0), ('K', 2.0)]).unwrap();
/// assert_eq!(table.molecular_mass("AKA").unwrap(), 4.0);
/// assert!(table.molecular_mass("AKR").is_err());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "HashMap<char, f64>", into = "HashMap<char, f64>")]
pub struct ResidueMassTable {
    masses: HashMap<char, f64>,
}

impl ResidueMassTable {
    /// Create a table from the given residues and masses, if a residue is given multiple times the last mass is used.
    /// # Errors
    /// If any of the masses is not a finite positive number.
    pub fn new(masses: impl IntoIterator<Item = (char, f64)>) -> Result<Self, Error> {
        let masses: HashMap<char, f64> = masses.into_iter().collect();
        if let Some((residue, mass)) = masses
            .iter()
            .find(|(_, mass)| !mass.is_finite() || **mass <= 0.0)
        {
            return Err(BoxedError::new(
                ProteosimError::InvalidArgument,
                "Invalid residue mass",
                format!("The mass of residue '{residue}' is {mass}, only finite positive masses are allowed"),
                Context::none(),
            ));
        }
        Ok(Self { masses })
    }

    /// The average masses of the 20 standard amino acids. This table is shared by the whole
    /// process and never changes.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Get the mass of the given residue, if defined
    pub fn get(&self, residue: char) -> Option<f64> {
        self.masses.get(&residue).copied()
    }

    /// The number of residues in this table
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Check if there are no residues defined
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Iterate over all residues and their masses, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.masses.iter().map(|(residue, mass)| (*residue, *mass))
    }

    /// Get the mass of the peptide, which is the sum of the masses of all of its residues.
    /// # Errors
    /// If a residue of the peptide is not defined in this table.
    pub fn molecular_mass(&self, peptide: &str) -> Result<f64, Error> {
        peptide
            .char_indices()
            .map(|(offset, residue)| {
                self.get(residue).ok_or_else(|| {
                    BoxedError::new(
                        ProteosimError::Lookup,
                        "Unknown residue",
                        format!("The residue '{residue}' is not defined in the residue mass table"),
                        Context::line(None, peptide, offset, residue.len_utf8()).to_owned(),
                    )
                })
            })
            .sum()
    }
}

impl TryFrom<HashMap<char, f64>> for ResidueMassTable {
    type Error = String;
    fn try_from(value: HashMap<char, f64>) -> Result<Self, Self::Error> {
        Self::new(value).map_err(|err| err.to_string())
    }
}

impl From<ResidueMassTable> for HashMap<char, f64> {
    fn from(value: ResidueMassTable) -> Self {
        value.masses
    }
}

impl ParseJson for ResidueMassTable {
    fn from_json_value(value: Value) -> Result<Self, Error> {
        use_serde::<HashMap<char, f64>>(value).and_then(Self::new)
    }
}

/// Get the mass of the peptide with the given table, see [`ResidueMassTable::molecular_mass`].
/// # Errors
/// If a residue of the peptide is not defined in the table.
pub fn molecular_mass(peptide: &str, table: &ResidueMassTable) -> Result<f64, Error> {
    table.molecular_mass(peptide)
}

/// Get the mass of all peptides. Every peptide is inserted in order, so if the same peptide
/// occurs multiple times its last calculated mass overwrites the earlier one, while it keeps
/// the position of its first occurrence.
/// # Errors
/// If a residue of any peptide is not defined in the table. No partial result is returned.
pub fn molecular_mass_collection(
    peptides: &[impl AsRef<str>],
    table: &ResidueMassTable,
) -> Result<IndexMap<String, f64>, Error> {
    let mut masses = IndexMap::with_capacity(peptides.len());
    for peptide in peptides {
        let peptide = peptide.as_ref();
        let mass = table.molecular_mass(peptide)?;
        // Last write wins for duplicated peptides
        masses.insert(peptide.to_string(), mass);
    }
    Ok(masses)
}
