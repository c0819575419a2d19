use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// A peak in a simulated spectrum
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Peak {
    /// The mass-to-charge ratio
    pub mz: f64,
    /// The intensity (arbitrary units)
    pub intensity: u64,
}

/// How the intensity of the peaks in a simulated spectrum is determined
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum IntensityMode {
    /// The number of times each mass-to-charge ratio was observed
    Counts,
    /// A uniformly drawn intensity in `low..=high` per peak, reproducible for the same seed
    Random {
        /// The lowest possible intensity
        low: u64,
        /// The highest possible intensity
        high: u64,
        /// The seed for the random number generator
        seed: u64,
    },
}

impl Default for IntensityMode {
    fn default() -> Self {
        Self::Random {
            low: 0,
            high: 30_000,
            seed: 42,
        }
    }
}

/// Simulate an MS1 spectrum from the observed mass-to-charge ratios. Every distinct value
/// becomes one peak, the peaks are sorted on mass-to-charge ratio. An empty list of values
/// results in an empty spectrum.
///
/// ```rust
/// # use proteosim::{IntensityMode, simulate_spectrum};
/// let spectrum = simulate_spectrum(&[300.5, 101.0, 300.5], IntensityMode::Counts);
/// assert_eq!(spectrum.len(), 2);
/// assert_eq!((spectrum[0].mz, spectrum[0].intensity), (101.0, 1));
/// assert_eq!((spectrum[1].mz, spectrum[1].intensity), (300.5, 2));
/// ```
pub fn simulate_spectrum(mz_values: &[f64], intensities: IntensityMode) -> Vec<Peak> {
    let mut counts: BTreeMap<OrderedFloat<f64>, u64> = BTreeMap::new();
    for mz in mz_values {
        *counts.entry(OrderedFloat(*mz)).or_default() += 1;
    }

    match intensities {
        IntensityMode::Counts => counts
            .into_iter()
            .map(|(mz, count)| Peak {
                mz: mz.into_inner(),
                intensity: count,
            })
            .collect(),
        IntensityMode::Random { low, high, seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let (low, high) = (low.min(high), low.max(high));
            counts
                .into_keys()
                .map(|mz| Peak {
                    mz: mz.into_inner(),
                    intensity: rng.random_range(low..=high),
                })
                .collect()
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let spectrum = simulate_spectrum(&[5.0, 1.0, 5.0, 3.0, 5.0], IntensityMode::Counts);
        assert_eq!(
            spectrum
                .iter()
                .map(|p| (p.mz, p.intensity))
                .collect::<Vec<_>>(),
            [(1.0, 1), (3.0, 1), (5.0, 3)]
        );
    }

    #[test]
    fn random() {
        let mode = IntensityMode::Random {
            low: 10,
            high: 20,
            seed: 7,
        };
        let values = [500.1, 200.2, 300.3, 200.2];
        let first = simulate_spectrum(&values, mode);
        assert_eq!(first, simulate_spectrum(&values, mode));
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|p| (10..=20).contains(&p.intensity)));
        assert!(first.windows(2).all(|w| w[0].mz < w[1].mz));
    }

    #[test]
    fn empty() {
        assert!(simulate_spectrum(&[], IntensityMode::Counts).is_empty());
        assert!(simulate_spectrum(&[], IntensityMode::default()).is_empty());
    }
}
