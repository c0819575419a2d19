#![doc = include_str!("../README.md")]

/// Residue masses and mass-to-charge conversion.
pub mod chemistry;
/// Retention time prediction, filtering and binning.
pub mod chromatography;
mod config;
mod error;
mod fragment;
/// Contains the logic to parse configuration files and custom tables from JSON with helpful error messages
pub mod parse_json;
/// Contains all things related to sequences: cleavage rules, digestion, coverage and FASTA files.
pub mod sequence;
mod spectrum;

pub use config::*;
pub use error::*;
pub use fragment::*;
pub use spectrum::*;

/// The error type returned by all fallible operations in this crate.
pub type Error = context_error::BoxedError<'static, ProteosimError>;

/// A subset of the types and functions that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::chemistry::{
        MzSettings, ResidueMassTable, mass_to_charge, mass_to_charge_collection,
        molecular_mass, molecular_mass_collection,
    };
    pub use crate::chromatography::{
        AdditiveRetentionModel, RetentionTimePredictor, predict_retention_times,
        retention_time_histogram, select_retention_window,
    };
    pub use crate::sequence::{
        CleavageRule, DigestSettings, Enzyme, digest_collection, digest_sequence, read_fasta,
        sequence_coverage,
    };
    pub use crate::{
        Error, FragmentIon, IntensityMode, IonSeries, ProteosimError, SimulationConfig,
        fragment_ions, fragment_peptide, simulate_spectrum,
    };
}
