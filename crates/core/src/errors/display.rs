//! Display implementations for error types

use super::types::{Error, ErrorCategory};
use std::fmt;

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Network => "network",
            ErrorCategory::Filesystem => "filesystem",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Cache => "cache",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Permission => "permission",
            ErrorCategory::CircuitOpen => "circuit-open",
            ErrorCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Multi-line rendering of an error, its context and its causes
pub struct Report<'a>(&'a Error);

impl Error {
    /// Render the full causal chain, one error per line
    pub fn report(&self) -> Report<'_> {
        Report(self)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.chain().enumerate() {
            if index == 0 {
                write!(f, "{error}")?;
            } else {
                write!(f, "\n  caused by: {error}")?;
            }
            if !error.context().is_empty() {
                let pairs: Vec<String> = error
                    .context()
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect();
                write!(f, " ({})", pairs.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category_and_code() {
        let error = Error::validation("name must not be empty");
        assert_eq!(
            error.to_string(),
            "[validation] VALIDATION_ERROR: name must not be empty"
        );
    }

    #[test]
    fn test_report_lists_causes() {
        let error = Error::configuration("could not start")
            .with_cause(Error::network("db", "refused"));
        let report = error.report().to_string();

        assert!(report.starts_with("[configuration] CONFIGURATION_ERROR: could not start"));
        assert!(report.contains("caused by: [network] NETWORK_ERROR: refused (endpoint=db)"));
    }
}
