use std::fmt;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Thermochronometer – the four cooling-age systems Pecube predicts
// ---------------------------------------------------------------------------

/// A thermochronometer system, in the column order of `Comparison.txt`
/// and of the output CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Thermochronometer {
    /// Apatite (U-Th)/He.
    AHe,
    /// Apatite fission track.
    AFT,
    /// Zircon (U-Th)/He.
    ZHe,
    /// Zircon fission track.
    ZFT,
}

impl Thermochronometer {
    pub const ALL: [Thermochronometer; 4] = [
        Thermochronometer::AHe,
        Thermochronometer::AFT,
        Thermochronometer::ZHe,
        Thermochronometer::ZFT,
    ];

    /// Label used in the CSV header.
    pub fn label(self) -> &'static str {
        match self {
            Thermochronometer::AHe => "AHe",
            Thermochronometer::AFT => "AFT",
            Thermochronometer::ZHe => "ZHe",
            Thermochronometer::ZFT => "ZFT",
        }
    }

    /// Field positions of the (observed, predicted) ages in a
    /// whitespace-split `Comparison.txt` record.
    pub fn columns(self) -> (usize, usize) {
        match self {
            Thermochronometer::AHe => (4, 5),
            Thermochronometer::AFT => (6, 7),
            Thermochronometer::ZHe => (8, 9),
            Thermochronometer::ZFT => (10, 11),
        }
    }
}

impl fmt::Display for Thermochronometer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SampleSummary – one record of Comparison.txt
// ---------------------------------------------------------------------------

/// Observed and predicted cooling ages for one system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgePair {
    /// `None` when the file carries a negative (or NaN) value, conventionally `-999`.
    pub observed: Option<f64>,
    /// Model-predicted age, taken as-is.
    pub predicted: f64,
}

impl AgePair {
    /// Build from raw file values. Anything that is not `>= 0` counts as
    /// "not observed".
    pub fn from_raw(observed: f64, predicted: f64) -> Self {
        let observed = if observed >= 0.0 { Some(observed) } else { None };
        AgePair { observed, predicted }
    }
}

/// One sample location with its age pairs, indexed by [`Thermochronometer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
    /// In [`Thermochronometer::ALL`] order.
    pub ages: [AgePair; 4],
}

impl SampleSummary {
    pub fn age(&self, system: Thermochronometer) -> AgePair {
        self.ages[system as usize]
    }
}

// ---------------------------------------------------------------------------
// CoolingPath – one block of Ttpaths.txt
// ---------------------------------------------------------------------------

/// A sample's time–depth history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoolingPath {
    /// Age axis (x).
    pub ages: Vec<f64>,
    /// Depth axis (y) – same length as `ages`.
    pub depths: Vec<f64>,
}

impl CoolingPath {
    pub fn push(&mut self, age: f64, depth: f64) {
        self.ages.push(age);
        self.depths.push(depth);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.ages.len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Reverse the point order and re-base depths on the new first point,
    /// so that `depths[0] == 0.0` afterwards.
    ///
    /// `sample` is the 1-based sample number, used only for the error.
    pub fn normalize(mut self, sample: usize) -> Result<Self, LoadError> {
        if self.is_empty() {
            return Err(LoadError::EmptyPath { sample });
        }
        self.ages.reverse();
        self.depths.reverse();
        let surface = self.depths[0];
        for d in &mut self.depths {
            *d -= surface;
        }
        Ok(self)
    }

    /// True when ages never decrease along the path.
    pub fn ages_sorted(&self) -> bool {
        self.ages.windows(2).all(|w| w[0] <= w[1])
    }
}

// ---------------------------------------------------------------------------
// SampleResult – derived values written to the summary CSV
// ---------------------------------------------------------------------------

/// Closure depth and exhumation rate for one system of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemResult {
    pub system: Thermochronometer,
    pub ages: AgePair,
    /// Depth below the surface at the predicted age; `None` if unobserved.
    pub closure_depth: Option<f64>,
    /// `closure_depth / predicted`; `None` if unobserved or predicted age is zero.
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: f64,
    /// In [`Thermochronometer::ALL`] order.
    pub systems: [SystemResult; 4],
}
