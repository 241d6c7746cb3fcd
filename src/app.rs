use std::io::BufWriter;

use anyhow::{Context, Result};

use crate::compute;
use crate::config::RunConfig;
use crate::data::loader::{ComparisonReader, TtPathReader};
use crate::data::model::SampleResult;
use crate::error::RunError;
use crate::report;

// ---------------------------------------------------------------------------
// One read-compute-write pass
// ---------------------------------------------------------------------------

pub struct ExhumationApp {
    pub config: RunConfig,
}

impl ExhumationApp {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Check the inputs, compute every sample, then write the summary.
    /// Returns the number of rows written.
    pub fn run(&self) -> Result<usize, RunError> {
        self.config.preflight()?;

        let results = self.process()?;

        let file = self.config.create_output()?;
        report::write_summary(BufWriter::new(file), &results)
            .with_context(|| format!("writing {}", self.config.output.display()))?;

        log::info!(
            "{} samples written to {}",
            results.len(),
            self.config.output.display()
        );
        Ok(results.len())
    }

    /// Pair the i-th Comparison record with the i-th Tt path block and
    /// evaluate it.
    pub fn process(&self) -> Result<Vec<SampleResult>> {
        let comparison_path = &self.config.comparison;
        let ttpaths_path = &self.config.ttpaths;

        let comparison = ComparisonReader::open(comparison_path)?;
        let mut paths = TtPathReader::open(ttpaths_path)?;
        log::info!(
            "{} declares {} samples",
            comparison_path.display(),
            comparison.sample_count()
        );

        // The declared count is unchecked, so it does not size the buffer.
        let mut results = Vec::new();
        for (i, summary) in comparison.enumerate() {
            let sample = i + 1;
            println!("Reading data for sample {sample}");

            let summary =
                summary.with_context(|| format!("reading {}", comparison_path.display()))?;
            let path = paths
                .next_path()
                .with_context(|| format!("reading {}", ttpaths_path.display()))?;
            log::debug!("sample {sample}: {} path points", path.len());

            let path = path
                .normalize(sample)
                .with_context(|| format!("reading {}", ttpaths_path.display()))?;
            if !path.ages_sorted() {
                log::warn!(
                    "sample {sample}: path ages are not increasing, closure depths are unreliable"
                );
            }

            let result = compute::evaluate_sample(&summary, &path);
            for sys in &result.systems {
                log::debug!(
                    "sample {sample} {}: closure depth {:?}, rate {:?}",
                    sys.system,
                    sys.closure_depth,
                    sys.rate
                );
            }
            results.push(result);
        }

        let trailing = paths.remaining_lines()?;
        if trailing > 0 {
            log::warn!(
                "{trailing} unread lines left in {} after {} samples",
                ttpaths_path.display(),
                results.len()
            );
        }

        Ok(results)
    }
}
