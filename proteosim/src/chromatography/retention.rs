use std::{collections::HashMap, sync::LazyLock};

use context_error::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Error, ProteosimError,
    parse_json::{ParseJson, use_serde},
};

/// Select all peptides with a retention time in the inclusive window `lower..=upper`, in the
/// order of the given map.
///
/// ```rust
/// # use proteosim::chromatography::select_retention_window;
/// # use indexmap::IndexMap;
/// let times: IndexMap<String, f64> = [("pep1", 10.0), ("pep2", 12.5), ("pep3", 15.0)]
///     .into_iter()
///     .map(|(p, t)| (p.to_string(), t))
///     .collect();
/// assert_eq!(select_retention_window(&times, 11.0, 15.0).unwrap(), ["pep2", "pep3"]);
/// ```
/// # Errors
/// If `lower` is bigger than `upper`.
pub fn select_retention_window(
    retention_times: &IndexMap<String, f64>,
    lower: f64,
    upper: f64,
) -> Result<Vec<String>, Error> {
    if lower > upper {
        return Err(BoxedError::new(
            ProteosimError::InvalidArgument,
            "Invalid retention time window",
            format!("The lower bound ({lower}) has to be smaller than or equal to the upper bound ({upper})"),
            Context::none(),
        ));
    }
    Ok(retention_times
        .iter()
        .filter(|(_, time)| (lower..=upper).contains(*time))
        .map(|(peptide, _)| peptide.clone())
        .collect())
}

/// A model that predicts the liquid chromatography retention time (in minutes) of a peptide.
pub trait RetentionTimePredictor {
    /// Predict the retention time of the given peptide
    /// # Errors
    /// If the peptide cannot be scored by this model.
    fn predict(&self, peptide: &str) -> Result<f64, Error>;
}

/// Predict the retention time of all peptides, rounded to two decimals. Empty peptides are
/// skipped and a peptide that is given multiple times keeps its last prediction.
/// # Errors
/// If any of the peptides cannot be scored by the predictor.
pub fn predict_retention_times(
    peptides: &[impl AsRef<str>],
    predictor: &impl RetentionTimePredictor,
) -> Result<IndexMap<String, f64>, Error> {
    let mut times = IndexMap::with_capacity(peptides.len());
    for peptide in peptides.iter().map(AsRef::as_ref) {
        if peptide.is_empty() {
            continue;
        }
        let time = (predictor.predict(peptide)? * 100.0).round() / 100.0;
        times.insert(peptide.to_string(), time);
    }
    log::debug!("predicted retention times for {} peptides", times.len());
    Ok(times)
}

/// The retention coefficients at pH 7.0 from Guo et al. (1986), per residue in minutes.
const GUO_PH7_COEFFICIENTS: [(char, f64); 20] = [
    ('A', -0.3),
    ('C', -0.5),
    ('D', -2.6),
    ('E', -1.3),
    ('F', 9.0),
    ('G', -0.2),
    ('H', 2.2),
    ('I', 8.3),
    ('K', -0.2),
    ('L', 9.0),
    ('M', 6.0),
    ('N', -0.8),
    ('P', 2.2),
    ('Q', -0.9),
    ('R', 0.9),
    ('S', -0.5),
    ('T', 0.3),
    ('V', 5.7),
    ('W', 9.5),
    ('Y', 4.6),
];

static GUO_PH7: LazyLock<AdditiveRetentionModel> =
    LazyLock::new(|| AdditiveRetentionModel::new(GUO_PH7_COEFFICIENTS, 0.0));

/// An additive retention model: the predicted retention time is the sum of the retention
/// coefficients of every residue and both termini, multiplied by the length correction
/// `1 + length_correction * ln(length)`, plus the intercept. The coefficients have to be
/// given for every residue that is scored. The JSON representation is
/// `{"coefficients": {"A": 0.8, ...}, "n_terminus": 0.0, "c_terminus": 0.0, "length_correction": 0.0, "intercept": 0.0}`
/// where all fields except the coefficients are optional.
///
/// ```rust
/// # use proteosim::chromatography::{AdditiveRetentionModel, predict_retention_times};
/// let model = AdditiveRetentionModel::guo_ph7();
/// let times = predict_retention_times(&["PEPTIDE", "MKWVTF"], model).unwrap();
/// assert_eq!(times["PEPTIDE"], 7.8);
/// assert_eq!(times["MKWVTF"], 30.3);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AdditiveRetentionModel {
    /// The retention coefficient per residue (in minutes)
    pub coefficients: HashMap<char, f64>,
    /// The retention coefficient of the free N terminal amine (in minutes)
    #[serde(default)]
    pub n_terminus: f64,
    /// The retention coefficient of the free C terminal acid (in minutes)
    #[serde(default)]
    pub c_terminus: f64,
    /// The length correction parameter, 0 disables the correction
    #[serde(default)]
    pub length_correction: f64,
    /// The retention time added after the length correction (in minutes)
    #[serde(default)]
    pub intercept: f64,
}

impl AdditiveRetentionModel {
    /// Create a model from the given coefficients and intercept, without terminal
    /// coefficients or length correction
    pub fn new(coefficients: impl IntoIterator<Item = (char, f64)>, intercept: f64) -> Self {
        Self {
            coefficients: coefficients.into_iter().collect(),
            intercept,
            ..Self::default()
        }
    }

    /// Set the retention coefficients of the termini
    #[must_use]
    pub const fn termini(self, n_terminus: f64, c_terminus: f64) -> Self {
        Self {
            n_terminus,
            c_terminus,
            ..self
        }
    }

    /// Set the length correction parameter
    #[must_use]
    pub const fn length_correction(self, length_correction: f64) -> Self {
        Self {
            length_correction,
            ..self
        }
    }

    /// The retention coefficients for reversed phase chromatography at pH 7.0 from Guo et al.
    /// (1986), defined for the 20 standard amino acids. This model is shared by the whole
    /// process and never changes.
    pub fn guo_ph7() -> &'static Self {
        &GUO_PH7
    }
}

impl RetentionTimePredictor for AdditiveRetentionModel {
    fn predict(&self, peptide: &str) -> Result<f64, Error> {
        let residues = peptide
            .char_indices()
            .map(|(offset, residue)| {
                self.coefficients.get(&residue).copied().ok_or_else(|| {
                    BoxedError::new(
                        ProteosimError::Lookup,
                        "Unknown residue",
                        format!("The residue '{residue}' has no retention coefficient"),
                        Context::line(None, peptide, offset, residue.len_utf8()).to_owned(),
                    )
                })
            })
            .sum::<Result<f64, Error>>()?;
        let length = peptide.chars().count();
        let correction = if self.length_correction == 0.0 || length == 0 {
            1.0
        } else {
            self.length_correction.mul_add((length as f64).ln(), 1.0)
        };
        Ok((residues + self.n_terminus + self.c_terminus).mul_add(correction, self.intercept))
    }
}

impl ParseJson for AdditiveRetentionModel {
    fn from_json_value(value: Value) -> Result<Self, Error> {
        use_serde(value)
    }
}
