use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{AgePair, CoolingPath, SampleSummary, Thermochronometer};

/// Minimum number of whitespace-separated fields in a `Comparison.txt` record.
const COMPARISON_FIELDS: usize = 12;

/// Number of fields on a `Ttpaths.txt` point line: `age`, unused, `depth`.
const PATH_FIELDS: usize = 3;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems in the Pecube output files. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no sample count on the first line")]
    MissingSampleCount,

    #[error("line {line}: sample count '{value}' is not an integer")]
    BadSampleCount { line: usize, value: String },

    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, field {field}: '{value}' is not a number")]
    BadNumber {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("unexpected end of file after line {line}: record for sample {sample} is missing")]
    MissingLine { line: usize, sample: usize },

    #[error("sample {sample}: cooling path is empty")]
    EmptyPath { sample: usize },
}

fn parse_field(fields: &[&str], field: usize, line: usize) -> Result<f64, LoadError> {
    let raw = fields[field];
    raw.parse::<f64>().map_err(|_| LoadError::BadNumber {
        line,
        field,
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Comparison.txt
// ---------------------------------------------------------------------------

/// Streams [`SampleSummary`] records out of `Comparison.txt`.
///
/// The first line declares the sample count; the reader yields exactly that
/// many records and ignores whatever follows.
pub struct ComparisonReader<R> {
    lines: Lines<R>,
    line_no: usize,
    declared: usize,
    yielded: usize,
}

impl ComparisonReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        Self::new(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))
    }
}

impl<R: BufRead> ComparisonReader<R> {
    /// Read the sample-count line. A negative count means no samples.
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let first = lines
            .next()
            .transpose()
            .context("reading sample count")?
            .ok_or(LoadError::MissingSampleCount)?;
        let token = first
            .split_whitespace()
            .next()
            .ok_or(LoadError::MissingSampleCount)?;
        let count: i64 = token.parse().map_err(|_| LoadError::BadSampleCount {
            line: 1,
            value: token.to_string(),
        })?;
        if count < 0 {
            log::warn!("Comparison.txt declares {count} samples; nothing to process");
        }

        Ok(ComparisonReader {
            lines,
            line_no: 1,
            declared: usize::try_from(count).unwrap_or(0),
            yielded: 0,
        })
    }

    /// Sample count from the first line (clamped at zero).
    pub fn sample_count(&self) -> usize {
        self.declared
    }

    fn read_sample(&mut self) -> Result<SampleSummary> {
        let sample = self.yielded + 1;
        let text = self
            .lines
            .next()
            .transpose()
            .with_context(|| format!("reading line {}", self.line_no + 1))?
            .ok_or(LoadError::MissingLine {
                line: self.line_no,
                sample,
            })?;
        self.line_no += 1;
        parse_comparison_line(&text, self.line_no)
            .with_context(|| format!("parsing sample {sample}"))
    }
}

impl<R: BufRead> Iterator for ComparisonReader<R> {
    type Item = Result<SampleSummary>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.yielded >= self.declared {
            return None;
        }
        let record = self.read_sample();
        self.yielded += 1;
        Some(record)
    }
}

/// Parse one record:
/// `lon lat elev id AHe_obs AHe_pred AFT_obs AFT_pred ZHe_obs ZHe_pred ZFT_obs ZFT_pred ...`
///
/// The sample id (field 3) is never interpreted.
pub fn parse_comparison_line(text: &str, line: usize) -> Result<SampleSummary, LoadError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < COMPARISON_FIELDS {
        return Err(LoadError::ShortLine {
            line,
            expected: COMPARISON_FIELDS,
            found: fields.len(),
        });
    }

    let mut ages = [AgePair::from_raw(-999.0, 0.0); 4];
    for system in Thermochronometer::ALL {
        let (obs, pred) = system.columns();
        ages[system as usize] = AgePair::from_raw(
            parse_field(&fields, obs, line)?,
            parse_field(&fields, pred, line)?,
        );
    }

    Ok(SampleSummary {
        longitude: parse_field(&fields, 0, line)?,
        latitude: parse_field(&fields, 1, line)?,
        elevation: parse_field(&fields, 2, line)?,
        ages,
    })
}

// ---------------------------------------------------------------------------
// Ttpaths.txt
// ---------------------------------------------------------------------------

/// Streams per-sample [`CoolingPath`] blocks out of `Ttpaths.txt`.
///
/// Layout: one header line, then for each sample a run of `age _ depth`
/// lines closed by any line with fewer than three fields (usually blank).
/// Lines with more than three fields are skipped without closing the block.
pub struct TtPathReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl TtPathReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        Self::new(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))
    }
}

impl<R: BufRead> TtPathReader<R> {
    /// Consume the header line.
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = lines.next().transpose().context("reading header line")?;
        let line_no = usize::from(header.is_some());
        Ok(TtPathReader { lines, line_no })
    }

    /// Read the next block in file order. End of file closes the block, so
    /// an exhausted reader returns empty paths.
    pub fn next_path(&mut self) -> Result<CoolingPath> {
        let mut path = CoolingPath::default();
        while let Some(text) = self
            .lines
            .next()
            .transpose()
            .with_context(|| format!("reading line {}", self.line_no + 1))?
        {
            self.line_no += 1;
            let fields: Vec<&str> = text.split_whitespace().collect();
            match fields.len() {
                n if n < PATH_FIELDS => break,
                PATH_FIELDS => {
                    let age = parse_field(&fields, 0, self.line_no)?;
                    let depth = parse_field(&fields, 2, self.line_no)?;
                    path.push(age, depth);
                }
                n => log::debug!("Ttpaths.txt line {}: skipping {n}-field line", self.line_no),
            }
        }
        Ok(path)
    }

    /// Count the non-blank lines left after the last block read.
    pub fn remaining_lines(self) -> Result<usize> {
        let mut count = 0;
        for line in self.lines {
            if !line.context("reading trailing lines")?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPARISON: &str = "\
2
0.0 45.0 1000.0 1 10.0 12.0 -1 5.0 -1 8.0 -1 3.0
-120.5 48.25 2100.0 2 -999 1.5 3.2 4.1 12.0 11.0 -999 20.0 extra cols
";

    #[test]
    fn reads_declared_samples() {
        let reader = ComparisonReader::new(COMPARISON.as_bytes()).unwrap();
        assert_eq!(reader.sample_count(), 2);

        let samples: Vec<_> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(samples.len(), 2);

        let a = &samples[0];
        assert_eq!((a.longitude, a.latitude, a.elevation), (0.0, 45.0, 1000.0));
        assert_eq!(
            a.age(Thermochronometer::AHe),
            AgePair { observed: Some(10.0), predicted: 12.0 }
        );
        assert_eq!(a.age(Thermochronometer::AFT).observed, None);
        assert_eq!(a.age(Thermochronometer::ZFT).predicted, 3.0);

        let b = &samples[1];
        assert_eq!(b.age(Thermochronometer::AHe).observed, None);
        assert_eq!(b.age(Thermochronometer::AFT).observed, Some(3.2));
        assert_eq!(
            b.age(Thermochronometer::ZHe),
            AgePair { observed: Some(12.0), predicted: 11.0 }
        );
    }

    #[test]
    fn ignores_records_past_declared_count() {
        let text = "1 extra tokens\n1 2 3 x 4 5 6 7 8 9 10 11\nnot a record\n";
        let samples: Vec<_> = ComparisonReader::new(text.as_bytes())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn sample_id_column_is_not_parsed() {
        let s = parse_comparison_line("1 2 3 SAMPLE-07 4 5 6 7 8 9 10 11", 2).unwrap();
        assert_eq!(s.age(Thermochronometer::AHe).observed, Some(4.0));
    }

    #[test]
    fn negative_count_yields_nothing() {
        let mut reader = ComparisonReader::new("-3\n".as_bytes()).unwrap();
        assert_eq!(reader.sample_count(), 0);
        assert!(reader.next().is_none());
    }

    #[test]
    fn bad_sample_count_is_an_error() {
        let err = ComparisonReader::new("three\n".as_bytes()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BadSampleCount { line: 1, .. })
        ));
        let err = ComparisonReader::new("".as_bytes()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingSampleCount)
        ));
    }

    #[test]
    fn short_record_reports_line() {
        let err = parse_comparison_line("1 2 3 4 5", 7).unwrap_err();
        assert!(matches!(err, LoadError::ShortLine { line: 7, expected: 12, found: 5 }));
    }

    #[test]
    fn non_numeric_field_reports_position() {
        let err = parse_comparison_line("1 2 3 4 5 six 7 8 9 10 11 12", 3).unwrap_err();
        match err {
            LoadError::BadNumber { line, field, value } => {
                assert_eq!((line, field), (3, 5));
                assert_eq!(value, "six");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_record_is_an_error() {
        let text = "2\n1 2 3 4 5 6 7 8 9 10 11 12\n";
        let mut reader = ComparisonReader::new(text.as_bytes()).unwrap();
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err.root_cause().downcast_ref::<LoadError>(),
            Some(LoadError::MissingLine { sample: 2, .. })
        ));
        assert!(reader.next().is_none());
    }

    const TTPATHS: &str = "\
header line of some kind
0.0 25.0 0.0
5.0 80.0 -500.0
12.0 160.0 -1200.0

1.0 10.0 -10.0
2.0 20.0 -20.0 wide
3.0 30.0 -30.0
end
4.0 40.0 -40.0
";

    #[test]
    fn reads_blocks_in_order() {
        let mut reader = TtPathReader::new(TTPATHS.as_bytes()).unwrap();

        let first = reader.next_path().unwrap();
        assert_eq!(first.ages, vec![0.0, 5.0, 12.0]);
        assert_eq!(first.depths, vec![0.0, -500.0, -1200.0]);

        // The four-field line neither contributes nor closes the block;
        // the one-field line closes it.
        let second = reader.next_path().unwrap();
        assert_eq!(second.ages, vec![1.0, 3.0]);
        assert_eq!(second.depths, vec![-10.0, -30.0]);

        // End of file closes the last block.
        let third = reader.next_path().unwrap();
        assert_eq!(third.ages, vec![4.0]);

        assert!(reader.next_path().unwrap().is_empty());
    }

    #[test]
    fn consecutive_terminators_give_empty_block() {
        let mut reader = TtPathReader::new("h\n1 0 -1\n\n\n2 0 -2\n".as_bytes()).unwrap();
        assert_eq!(reader.next_path().unwrap().len(), 1);
        assert!(reader.next_path().unwrap().is_empty());
        assert_eq!(reader.next_path().unwrap().ages, vec![2.0]);
    }

    #[test]
    fn counts_trailing_lines() {
        let mut reader = TtPathReader::new("h\n1 0 -1\n\n2 0 -2\n\n".as_bytes()).unwrap();
        reader.next_path().unwrap();
        assert_eq!(reader.remaining_lines().unwrap(), 1);
    }

    #[test]
    fn bad_path_value_is_an_error() {
        let mut reader = TtPathReader::new("h\n1 0 deep\n".as_bytes()).unwrap();
        let err = reader.next_path().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BadNumber { line: 2, field: 2, .. })
        ));
    }
}
