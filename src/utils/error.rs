use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parse error in {source_name} at line {line}: {message}")]
    ParseError {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BillingError {
    /// Attaches a source location to a field-level error. Errors that
    /// already carry a location pass through untouched.
    pub fn at_line(self, source_name: &str, line: usize) -> Self {
        match self {
            BillingError::InvalidField { .. } | BillingError::CsvError(_) => {
                BillingError::ParseError {
                    source_name: source_name.to_string(),
                    line,
                    message: self.to_string(),
                }
            }
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BillingError::FileNotFound { .. } => ErrorCategory::Input,
            BillingError::IoError(_) => ErrorCategory::Output,
            BillingError::SerializationError(_) => ErrorCategory::Output,
            BillingError::CsvError(_)
            | BillingError::ParseError { .. }
            | BillingError::InvalidField { .. } => ErrorCategory::Parse,
            BillingError::ConfigError { .. } | BillingError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Parse | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BillingError::FileNotFound { path } => {
                format!("Could not find input file '{}'", path)
            }
            BillingError::ParseError {
                source_name, line, ..
            } => format!("Malformed record in {} (line {})", source_name, line),
            BillingError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the input paths and the --base-dir setting",
            ErrorCategory::Parse => {
                "Fix the offending line; roster lines are 'name;phone' and call lines are 'phone;minutes;HHh;DD/MM/YYYY;zone'"
            }
            ErrorCategory::Output => "Make sure the report location is writable",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, BillingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_wraps_field_errors() {
        let err = BillingError::InvalidField {
            field: "duration",
            value: "ten".to_string(),
            reason: "not a number".to_string(),
        }
        .at_line("cuocgoi.txt", 3);

        match err {
            BillingError::ParseError {
                source_name, line, message,
            } => {
                assert_eq!(source_name, "cuocgoi.txt");
                assert_eq!(line, 3);
                assert!(message.contains("ten"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_at_line_keeps_missing_file() {
        let err = BillingError::FileNotFound {
            path: "khachhang.txt".to_string(),
        }
        .at_line("khachhang.txt", 1);
        assert!(matches!(err, BillingError::FileNotFound { .. }));
    }

    #[test]
    fn test_severity_by_category() {
        let parse = BillingError::ParseError {
            source_name: "x".to_string(),
            line: 1,
            message: "bad".to_string(),
        };
        assert_eq!(parse.category(), ErrorCategory::Parse);
        assert_eq!(parse.severity(), ErrorSeverity::High);

        let io = BillingError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
