use std::path::PathBuf;

use thiserror::Error;

/// Everything that ends a run early. Each variant maps to a fixed exit code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Too many arguments")]
    TooManyArgs,

    #[error("Too few arguments")]
    TooFewArgs,

    #[error("Cannot open file {}", .0.display())]
    MissingComparison(PathBuf),

    #[error("Cannot open file {}", .0.display())]
    MissingTtpaths(PathBuf),

    #[error("File {} already exists", .0.display())]
    OutputExists(PathBuf),

    /// Malformed input or I/O failure while processing.
    #[error(transparent)]
    Data(#[from] anyhow::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::TooManyArgs => 1,
            RunError::TooFewArgs => 2,
            RunError::MissingComparison(_) => 3,
            RunError::MissingTtpaths(_) => 4,
            RunError::OutputExists(_) => 5,
            RunError::Data(_) => 1,
        }
    }

    /// Whether the usage line should follow the message.
    pub fn is_usage(&self) -> bool {
        matches!(self, RunError::TooManyArgs | RunError::TooFewArgs)
    }

    /// Follow-up advice printed under the message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunError::MissingComparison(_) | RunError::MissingTtpaths(_) => {
                Some("Did you run this from the Pecube base directory?")
            }
            RunError::OutputExists(_) => {
                Some("Please delete or move the file and rerun this calculator")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(RunError::TooManyArgs.exit_code(), 1);
        assert_eq!(RunError::TooFewArgs.exit_code(), 2);
        assert_eq!(RunError::MissingComparison("a".into()).exit_code(), 3);
        assert_eq!(RunError::MissingTtpaths("b".into()).exit_code(), 4);
        assert_eq!(RunError::OutputExists("c".into()).exit_code(), 5);
        assert_eq!(RunError::from(anyhow::anyhow!("bad line")).exit_code(), 1);
    }

    #[test]
    fn data_errors_keep_their_context_chain() {
        let cause = anyhow::anyhow!("line 3: short").context("reading Comparison.txt");
        let err = RunError::from(cause);
        assert_eq!(format!("{err:#}"), "reading Comparison.txt: line 3: short");
        assert!(err.hint().is_none());
        assert!(!err.is_usage());
    }

    #[test]
    fn messages_name_the_file() {
        let err = RunError::MissingComparison(PathBuf::from("run1").join("Comparison.txt"));
        assert!(err.to_string().starts_with("Cannot open file run1"));
        assert!(err.to_string().ends_with("Comparison.txt"));
    }
}
