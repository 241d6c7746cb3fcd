use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::error::RunError;

/// Average exhumation rates from Pecube predicted cooling ages and Tt paths.
///
/// Run from the Pecube base directory: reads `<PECUBE_RUN>/Comparison.txt`
/// and `Ttpaths.txt`, writes `Exhumation_rate_summary.csv`.
#[derive(Debug, Parser)]
#[command(name = "pecube-exhumation", version)]
pub struct Args {
    /// Pecube run name (the directory holding Comparison.txt).
    #[arg(value_name = "PECUBE_RUN", allow_hyphen_values = true)]
    pub model: PathBuf,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Parsed {
    Run(Args),
    /// `--help` or `--version`; print and exit successfully.
    Info(clap::Error),
    Usage(RunError),
}

/// Parse a full argv (program name first). A missing run name is "too few
/// arguments"; anything clap rejects otherwise is "too many".
pub fn parse_args<I, T>(argv: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Parsed::Run(args),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Parsed::Info(e),
            ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Parsed::Usage(RunError::TooFewArgs)
            }
            _ => {
                log::debug!("rejected arguments: {e}");
                Parsed::Usage(RunError::TooManyArgs)
            }
        },
    }
}

/// One-line usage text.
pub fn usage() -> String {
    Args::command().render_usage().to_string()
}
