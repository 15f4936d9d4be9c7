//! Exit codes for the bn-infer CLI.
//!
//! Exit codes communicate the run outcome without requiring output parsing.

use bn_common::Error;

/// Exit codes for bn-infer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every query answered
    Clean = 0,

    /// Every query answered, at least one answer undefined (impossible evidence)
    UndefinedAnswers = 1,

    /// Configuration or document error
    ConfigError = 10,

    /// Inference error (malformed table)
    InferenceError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            e if e.is_config() => ExitCode::ConfigError,
            Error::InvalidTable(_) | Error::Inference(_) => ExitCode::InferenceError,
            Error::Io(_) => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}
