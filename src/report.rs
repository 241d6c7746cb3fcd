use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

use crate::data::model::{SampleResult, SystemResult, Thermochronometer};

/// Written in place of an unobserved age.
pub const NOT_OBSERVED: f64 = -999.0;

// ---------------------------------------------------------------------------
// PyFloat – Python-compatible float text
// ---------------------------------------------------------------------------

/// Formats an `f64` the way Python's `str(float)` does: shortest round-trip
/// digits, always a `.0` or exponent, and scientific notation (`1e-05`,
/// `1.5e+16`) outside `1e-4 <= |v| < 1e16`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyFloat(pub f64);

impl fmt::Display for PyFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }

        // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e3".
        let sci = format!("{v:e}");
        let Some((mantissa, exp)) = sci.split_once('e') else {
            return write!(f, "{v:?}");
        };
        let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
        let (sign, mantissa) = match mantissa.strip_prefix('-') {
            Some(m) => ("-", m),
            None => ("", mantissa),
        };
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

        if (-4..16).contains(&exp) {
            if exp >= 0 {
                let point = exp as usize + 1;
                if digits.len() <= point {
                    let pad = "0".repeat(point - digits.len());
                    write!(f, "{sign}{digits}{pad}.0")
                } else {
                    let (int, frac) = digits.split_at(point);
                    write!(f, "{sign}{int}.{frac}")
                }
            } else {
                let zeros = "0".repeat((-exp - 1) as usize);
                write!(f, "{sign}0.{zeros}{digits}")
            }
        } else {
            let (head, tail) = digits.split_at(1);
            let exp_sign = if exp < 0 { '-' } else { '+' };
            let exp = exp.abs();
            if tail.is_empty() {
                write!(f, "{sign}{head}e{exp_sign}{exp:02}")
            } else {
                write!(f, "{sign}{head}.{tail}e{exp_sign}{exp:02}")
            }
        }
    }
}

impl Serialize for PyFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Summary CSV
// ---------------------------------------------------------------------------

/// Column names: location, then observed / predicted / rate per system.
pub fn header() -> Vec<String> {
    let mut cols = vec![
        "Latitude".to_string(),
        "Longitude".to_string(),
        "Elevation".to_string(),
    ];
    for system in Thermochronometer::ALL {
        cols.push(format!("{system} Observed"));
        cols.push(format!("{system} Predicted"));
        cols.push(format!("{system} exhumation rate"));
    }
    cols
}

/// One output row, flat so it serializes as a single record. Rates are
/// empty cells when absent. Every row ends with one extra empty cell, one
/// field more than the header.
#[derive(Debug, Serialize)]
struct SummaryRow {
    latitude: PyFloat,
    longitude: PyFloat,
    elevation: PyFloat,
    ahe_observed: PyFloat,
    ahe_predicted: PyFloat,
    ahe_rate: Option<PyFloat>,
    aft_observed: PyFloat,
    aft_predicted: PyFloat,
    aft_rate: Option<PyFloat>,
    zhe_observed: PyFloat,
    zhe_predicted: PyFloat,
    zhe_rate: Option<PyFloat>,
    zft_observed: PyFloat,
    zft_predicted: PyFloat,
    zft_rate: Option<PyFloat>,
    row_end: &'static str,
}

fn observed(r: &SystemResult) -> PyFloat {
    PyFloat(r.ages.observed.unwrap_or(NOT_OBSERVED))
}

impl From<&SampleResult> for SummaryRow {
    fn from(r: &SampleResult) -> Self {
        let [ahe, aft, zhe, zft] = &r.systems;
        SummaryRow {
            latitude: PyFloat(r.latitude),
            longitude: PyFloat(r.longitude),
            elevation: PyFloat(r.elevation),
            ahe_observed: observed(ahe),
            ahe_predicted: PyFloat(ahe.ages.predicted),
            ahe_rate: ahe.rate.map(PyFloat),
            aft_observed: observed(aft),
            aft_predicted: PyFloat(aft.ages.predicted),
            aft_rate: aft.rate.map(PyFloat),
            zhe_observed: observed(zhe),
            zhe_predicted: PyFloat(zhe.ages.predicted),
            zhe_rate: zhe.rate.map(PyFloat),
            zft_observed: observed(zft),
            zft_predicted: PyFloat(zft.ages.predicted),
            zft_rate: zft.rate.map(PyFloat),
            row_end: "",
        }
    }
}

/// Write the header and one row per result.
pub fn write_summary<W: Write>(out: W, results: &[SampleResult]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(header()).context("writing CSV header")?;
    for (i, result) in results.iter().enumerate() {
        writer
            .serialize(SummaryRow::from(result))
            .with_context(|| format!("writing CSV row for sample {}", i + 1))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}
