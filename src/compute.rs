use crate::data::interp::interp;
use crate::data::model::{
    AgePair, CoolingPath, SampleResult, SampleSummary, SystemResult, Thermochronometer,
};

// ---------------------------------------------------------------------------
// Closure depth and average exhumation rate
// ---------------------------------------------------------------------------

/// Depth at which the sample passed through closure, read off the
/// normalized path at the predicted age. `None` when the age is unobserved.
pub fn closure_depth(ages: AgePair, path: &CoolingPath) -> Option<f64> {
    ages.observed
        .map(|_| interp(ages.predicted, &path.ages, &path.depths))
}

/// Average exhumation rate since closure; `None` when there is no closure
/// depth or the predicted age is zero.
pub fn exhumation_rate(depth: Option<f64>, predicted: f64) -> Option<f64> {
    match depth {
        Some(d) if predicted.abs() > 0.0 => Some(d / predicted),
        _ => None,
    }
}

/// Evaluate every system of one sample against its normalized cooling path.
pub fn evaluate_sample(summary: &SampleSummary, path: &CoolingPath) -> SampleResult {
    let systems = Thermochronometer::ALL.map(|system| {
        let ages = summary.age(system);
        let closure_depth = closure_depth(ages, path);
        SystemResult {
            system,
            ages,
            closure_depth,
            rate: exhumation_rate(closure_depth, ages.predicted),
        }
    });

    SampleResult {
        longitude: summary.longitude,
        latitude: summary.latitude,
        elevation: summary.elevation,
        systems,
    }
}
