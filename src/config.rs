use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::RunError;

/// Per-sample summary written by Pecube into the run directory.
pub const COMPARISON_FILE: &str = "Comparison.txt";
/// Tt paths of all samples, written into the Pecube base directory.
pub const TTPATHS_FILE: &str = "Ttpaths.txt";
/// Output, written next to `Ttpaths.txt`.
pub const OUTPUT_FILE: &str = "Exhumation_rate_summary.csv";

// ---------------------------------------------------------------------------
// RunConfig – resolved file locations for one invocation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub comparison: PathBuf,
    pub ttpaths: PathBuf,
    pub output: PathBuf,
}

impl RunConfig {
    /// Locations relative to the process working directory.
    pub fn new(model: &Path) -> Self {
        Self::with_base(Path::new(""), model)
    }

    /// Locations relative to `base`, the Pecube base directory.
    pub fn with_base(base: &Path, model: &Path) -> Self {
        RunConfig {
            comparison: base.join(model).join(COMPARISON_FILE),
            ttpaths: base.join(TTPATHS_FILE),
            output: base.join(OUTPUT_FILE),
        }
    }

    /// Check, in order, that both inputs can be opened and that the output
    /// does not exist yet.
    pub fn preflight(&self) -> Result<(), RunError> {
        if File::open(&self.comparison).is_err() {
            return Err(RunError::MissingComparison(self.comparison.clone()));
        }
        if File::open(&self.ttpaths).is_err() {
            return Err(RunError::MissingTtpaths(self.ttpaths.clone()));
        }
        if self.output.exists() {
            return Err(RunError::OutputExists(self.output.clone()));
        }
        Ok(())
    }

    /// Create the output file, refusing to replace an existing one.
    pub fn create_output(&self) -> Result<File, RunError> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.output)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => RunError::OutputExists(self.output.clone()),
                _ => RunError::Data(
                    anyhow::Error::new(e)
                        .context(format!("creating {}", self.output.display())),
                ),
            })
    }
}
