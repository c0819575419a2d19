use context_error::*;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use crate::{Error, ProteosimError};

/// A single bin of a histogram, covering `start..end` (the last bin of a histogram also contains its end)
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The lower edge of this bin
    pub start: f64,
    /// The upper edge of this bin
    pub end: f64,
    /// The number of values in this bin
    pub count: usize,
}

/// Bin retention times into `resolution` bins of equal width spanning the smallest to the
/// largest time, this is the data behind a simulated chromatogram. Duplicated times are all
/// counted. When there are no times the bins span `0..=1`, when all times are equal the
/// bins span half a minute to either side.
/// # Errors
/// If `resolution` is zero.
pub fn retention_time_histogram(
    retention_times: &[f64],
    resolution: usize,
) -> Result<Vec<HistogramBin>, Error> {
    if resolution == 0 {
        return Err(BoxedError::new(
            ProteosimError::InvalidArgument,
            "Invalid resolution",
            "The resolution of a histogram has to be a positive integer",
            Context::none(),
        ));
    }
    let (low, high) = match retention_times
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .minmax_by(f64::total_cmp)
    {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(t) => (t - 0.5, t + 0.5),
        MinMaxResult::MinMax(low, high) if high <= low => (low - 0.5, high + 0.5),
        MinMaxResult::MinMax(low, high) => (low, high),
    };
    let width = (high - low) / resolution as f64;

    let mut bins: Vec<HistogramBin> = (0..resolution)
        .map(|index| HistogramBin {
            start: (index as f64).mul_add(width, low),
            end: if index + 1 == resolution {
                high
            } else {
                ((index + 1) as f64).mul_add(width, low)
            },
            count: 0,
        })
        .collect();
    for time in retention_times.iter().filter(|t| t.is_finite()) {
        let index = (((time - low) / width) as usize).min(resolution - 1);
        bins[index].count += 1;
    }
    Ok(bins)
}
