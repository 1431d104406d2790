//! Custom exit codes for the edgecli application
//!
//! Every error surfaced at the command boundary maps to one of these codes so
//! that scripts can tell user-input problems apart from platform outages.

/// Custom exit codes for edgecli
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeExitCode {
    /// Success (0) - Command completed successfully
    Success = exitcode::OK as isize,

    /// Command line usage error (64) - mandatory flags missing, nothing to update
    UsageError = exitcode::USAGE as isize,

    /// Data format error (65) - malformed input document or a failed validation rule
    DataError = exitcode::DATAERR as isize,

    /// Cannot open input file (66) - the `--in` document could not be read
    NoInput = exitcode::NOINPUT as isize,

    /// Addressee unknown (67) - the edge application or cache setting does not exist
    NotFound = exitcode::NOUSER as isize,

    /// Service unavailable (69) - the API answered with a server-side failure
    TempFail = exitcode::UNAVAILABLE as isize,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = exitcode::SOFTWARE as isize,

    /// Cannot create output file (73) - `--out` could not be written
    CantCreate = exitcode::CANTCREAT as isize,

    /// Configuration error (78) - Application configuration issue
    ConfigError = exitcode::CONFIG as isize,

    /// Network error (101) - Connection, DNS or timeout
    NetworkError = 101,

    /// API error (102) - Remote API rejected the request
    ApiError = 102,

    /// Interrupted (130) - the command was cancelled by the user
    Interrupted = 130,
}

impl EdgeExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            EdgeExitCode::Success => "Success",
            EdgeExitCode::UsageError => "Command line usage error",
            EdgeExitCode::DataError => "Data format error",
            EdgeExitCode::NoInput => "Cannot open input file",
            EdgeExitCode::NotFound => "Resource not found",
            EdgeExitCode::TempFail => "Service unavailable",
            EdgeExitCode::SoftwareError => "Internal software error",
            EdgeExitCode::CantCreate => "Cannot create output file",
            EdgeExitCode::ConfigError => "Configuration error",
            EdgeExitCode::NetworkError => "Network communication error",
            EdgeExitCode::ApiError => "Remote API error",
            EdgeExitCode::Interrupted => "Interrupted",
        }
    }
}

impl From<EdgeExitCode> for i32 {
    fn from(code: EdgeExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysexits_values() {
        assert_eq!(EdgeExitCode::Success.code(), 0);
        assert_eq!(EdgeExitCode::UsageError.code(), 64);
        assert_eq!(EdgeExitCode::DataError.code(), 65);
        assert_eq!(EdgeExitCode::NoInput.code(), 66);
        assert_eq!(EdgeExitCode::TempFail.code(), 69);
        assert_eq!(EdgeExitCode::ConfigError.code(), 78);
    }

    #[test]
    fn test_into_i32() {
        let code: i32 = EdgeExitCode::NetworkError.into();
        assert_eq!(code, 101);
        assert_eq!(EdgeExitCode::ApiError.message(), "Remote API error");
    }
}
