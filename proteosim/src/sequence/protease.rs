use std::{fmt::Display, iter, str::FromStr, sync::LazyLock};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A cleavage rule defined by the residues that flank a cut site. Every rule describes a
/// zero width boundary, it never consumes a residue, so cutting a sequence at all its
/// boundaries gives pieces that concatenate back to the original sequence.
///
/// The rules used by the common enzymes can be found in [`known_rules`], or via [`Enzyme`].
///
/// # Examples
///
/// ## Finding cut sites in a sequence
/// ```rust
/// # use proteosim::sequence::known_rules;
/// let trypsin = &known_rules::TRYPSIN;
///
/// // Get all locations (as byte offsets) where trypsin would cut
/// let cut_sites = trypsin.match_locations("SIADIRGRKM");
///
/// assert_eq!(cut_sites, vec![6, 8, 9]);
/// ```
///
/// ## Creating a custom rule
/// ```rust
/// # use proteosim::sequence::CleavageRule;
/// // A rule that cuts after Histidine (H)
/// let his_rule = CleavageRule::c_terminal_of(vec!['H']);
///
/// assert_eq!(his_rule.match_locations("AAHFGHKLM"), vec![3, 6]);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CleavageRule {
    /// Cut directly after any of these residues
    CTerminalOf(Vec<char>),
    /// Cut directly before any of these residues
    NTerminalOf(Vec<char>),
    /// Cut directly after any of the residues, unless the next residue is one of the blocking residues
    CTerminalOfUnlessBefore {
        /// The residues n terminal of the cut site
        residues: Vec<char>,
        /// The residues that prevent the cut when found c terminal of the site
        blocked_by: Vec<char>,
    },
}

impl CleavageRule {
    /// Define a rule that cuts on the c terminal side of the provided residues.
    pub const fn c_terminal_of(residues: Vec<char>) -> Self {
        Self::CTerminalOf(residues)
    }

    /// Define a rule that cuts on the n terminal side of the provided residues.
    pub const fn n_terminal_of(residues: Vec<char>) -> Self {
        Self::NTerminalOf(residues)
    }

    /// Define a rule that cuts on the c terminal side of the provided residues, except when
    /// the following residue is any of `blocked_by`.
    pub const fn c_terminal_of_unless_before(residues: Vec<char>, blocked_by: Vec<char>) -> Self {
        Self::CTerminalOfUnlessBefore {
            residues,
            blocked_by,
        }
    }

    /// All locations in the given sequence where this rule cuts, as byte offsets into the
    /// sequence in increasing order. Contrary to a cut inside the sequence a cut before the
    /// first residue (offset 0) or after the last residue (offset `sequence.len()`) is
    /// reported as well, these are the boundaries that give rise to empty pieces.
    pub fn match_locations(&self, sequence: &str) -> Vec<usize> {
        let mut locations = Vec::new();
        let mut previous = None;
        for (offset, residue) in sequence
            .char_indices()
            .map(|(offset, residue)| (offset, Some(residue)))
            .chain(iter::once((sequence.len(), None)))
        {
            if self.cuts_between(previous, residue) {
                locations.push(offset);
            }
            previous = residue;
        }
        locations
    }

    /// Test the boundary between two residues, `None` means the start or end of the sequence
    fn cuts_between(&self, before: Option<char>, after: Option<char>) -> bool {
        match self {
            Self::CTerminalOf(residues) => before.is_some_and(|b| residues.contains(&b)),
            Self::NTerminalOf(residues) => after.is_some_and(|a| residues.contains(&a)),
            Self::CTerminalOfUnlessBefore {
                residues,
                blocked_by,
            } => {
                before.is_some_and(|b| residues.contains(&b))
                    && !after.is_some_and(|a| blocked_by.contains(&a))
            }
        }
    }
}

/// The rules of some well known and widely used enzymes
pub mod known_rules {
    use super::*;

    /// `LysC` cuts after Lysine (K)
    pub static LYSC: LazyLock<CleavageRule> =
        LazyLock::new(|| CleavageRule::c_terminal_of(vec!['K']));

    /// `LysN` cuts before Lysine (K)
    pub static LYSN: LazyLock<CleavageRule> =
        LazyLock::new(|| CleavageRule::n_terminal_of(vec!['K']));

    /// `ArgC` cuts after Arginine (R)
    pub static ARGC: LazyLock<CleavageRule> =
        LazyLock::new(|| CleavageRule::c_terminal_of(vec!['R']));

    /// `Trypsin` cuts after Lysine (K) or Arginine (R), unless followed by Proline (P)
    pub static TRYPSIN: LazyLock<CleavageRule> =
        LazyLock::new(|| CleavageRule::c_terminal_of_unless_before(vec!['K', 'R'], vec!['P']));
}

/// The named enzymes with a built-in cleavage rule
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Enzyme {
    /// Cuts after K
    LysC,
    /// Cuts before K
    LysN,
    /// Cuts after R
    ArgC,
    /// Cuts after K or R, unless followed by P
    #[default]
    Trypsin,
}

impl Enzyme {
    /// All enzymes in the table
    pub const ALL: [Self; 4] = [Self::LysC, Self::LysN, Self::ArgC, Self::Trypsin];

    /// The cleavage rule of this enzyme
    pub fn rule(self) -> &'static CleavageRule {
        match self {
            Self::LysC => &known_rules::LYSC,
            Self::LysN => &known_rules::LYSN,
            Self::ArgC => &known_rules::ARGC,
            Self::Trypsin => &known_rules::TRYPSIN,
        }
    }

    /// The name of this enzyme
    pub const fn name(self) -> &'static str {
        match self {
            Self::LysC => "LysC",
            Self::LysN => "LysN",
            Self::ArgC => "ArgC",
            Self::Trypsin => "Trypsin",
        }
    }
}

impl Display for Enzyme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Enzyme {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|enzyme| enzyme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown enzyme '{s}', use one of: {}",
                    Self::ALL.iter().map(|e| e.name()).join(", ")
                )
            })
    }
}
