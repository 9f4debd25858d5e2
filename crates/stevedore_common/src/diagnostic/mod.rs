use std::fmt;

/// A unique machine-readable diagnostic code (e.g., "CONVERT_NO_IMAGE").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticCode(pub &'static str);

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A trait for errors that provide a diagnostic code and a suggestion for resolution.
pub trait Diagnosable: std::error::Error {
    /// A unique machine-readable code (e.g., "CONVERT_NO_IMAGE").
    fn code(&self) -> DiagnosticCode;

    fn severity(&self) -> Severity {
        Severity::Error
    }

    /// A human-readable suggestion for how to fix the error.
    fn suggestion(&self) -> Option<String> {
        None
    }
}
