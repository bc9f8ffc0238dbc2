//! Error types for the domain checker.

use serde::{Deserialize, Serialize};

/// Check errors.
///
/// Every variant corresponds to exactly one reason flag in [`ErrorFlags`].
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Domain name failed to resolve.
    #[error("domain does not resolve: {domain}")]
    BadDns { domain: String },

    /// TLS or connection failure, including certificate hostname mismatch.
    #[error("https connection to {domain} failed: {reason}")]
    HttpsFailure { domain: String, reason: String },

    /// Server answered with a status >= 400.
    #[error("server error: HTTP {status}")]
    ServerError { status: u16 },

    /// Server answered with a redirect. Redirects are never followed.
    #[error("redirect not allowed: HTTP {status} to {}", .location.as_deref().unwrap_or("<no location>"))]
    Redirect {
        status: u16,
        location: Option<String>,
    },

    /// Content-type is not acceptable for the requested mode.
    #[error("bad content-type: {}", .content_type.as_deref().unwrap_or("<missing>"))]
    BadContentType { content_type: Option<String> },

    /// Envelope failed verification, or I/O around the verification failed.
    #[error("signature verification failed: {reason}")]
    SignatureVerificationFailed { reason: String },

    /// Payload verified (or arrived as plain text) but is not well-formed JSON.
    #[error("invalid json payload: {reason}")]
    InvalidJson { reason: String },

    /// Network request or verifier invocation exceeded its time bound.
    #[error("timed out during {stage}")]
    Timeout { stage: Stage },

    /// Domain is empty after normalization.
    #[error("invalid domain: {input:?}")]
    InvalidDomain { input: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Pipeline stage a timeout occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetch,
    Verify,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch => f.write_str("fetch"),
            Self::Verify => f.write_str("signature verification"),
        }
    }
}

impl CheckError {
    /// Flag-set view of the error, every flag explicit.
    pub fn flags(&self) -> ErrorFlags {
        let mut flags = ErrorFlags::default();
        match self {
            Self::BadDns { .. } => flags.bad_dns = true,
            Self::HttpsFailure { .. } => flags.https_failure = true,
            Self::ServerError { .. } => flags.server_error = true,
            Self::Redirect { .. } => flags.redirects = true,
            Self::BadContentType { .. } => flags.bad_content_type = true,
            Self::SignatureVerificationFailed { .. } => flags.signature_verification_failed = true,
            Self::InvalidJson { .. } => flags.invalid_json = true,
            Self::Timeout { .. } => flags.timeout = true,
            Self::InvalidDomain { .. } | Self::Config { .. } => flags.invalid_request = true,
        }
        flags
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Caller issues
            Self::InvalidDomain { .. } => 1,
            Self::Config { .. } => 1,

            // Could not reach the host over https
            Self::BadDns { .. } => 2,
            Self::HttpsFailure { .. } => 2,
            Self::Timeout { .. } => 2,

            // Host reachable but response unacceptable
            Self::ServerError { .. } => 3,
            Self::Redirect { .. } => 3,
            Self::BadContentType { .. } => 3,

            // Payload issues
            Self::SignatureVerificationFailed { .. } => 4,
            Self::InvalidJson { .. } => 4,
        }
    }
}

/// Reason flags of a failed check.
///
/// Exactly one flag is `true` for any error produced by [`CheckError::flags`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFlags {
    pub bad_dns: bool,
    pub https_failure: bool,
    pub server_error: bool,
    pub redirects: bool,
    pub bad_content_type: bool,
    pub signature_verification_failed: bool,
    pub invalid_json: bool,
    pub timeout: bool,
    pub invalid_request: bool,
}

impl ErrorFlags {
    /// Number of reason flags set.
    pub fn count(&self) -> usize {
        [
            self.bad_dns,
            self.https_failure,
            self.server_error,
            self.redirects,
            self.bad_content_type,
            self.signature_verification_failed,
            self.invalid_json,
            self.timeout,
            self.invalid_request,
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Result type for check operations.
pub type CheckResult<T> = Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<CheckError> {
        vec![
            CheckError::BadDns {
                domain: "nope.invalid".into(),
            },
            CheckError::HttpsFailure {
                domain: "example.com".into(),
                reason: "connection refused".into(),
            },
            CheckError::ServerError { status: 404 },
            CheckError::Redirect {
                status: 301,
                location: Some("https://www.example.com/".into()),
            },
            CheckError::BadContentType {
                content_type: Some("text/plain".into()),
            },
            CheckError::SignatureVerificationFailed {
                reason: "bad envelope".into(),
            },
            CheckError::InvalidJson {
                reason: "expected value".into(),
            },
            CheckError::Timeout {
                stage: Stage::Fetch,
            },
            CheckError::InvalidDomain { input: "".into() },
            CheckError::Config {
                message: "bad".into(),
            },
        ]
    }

    #[test]
    fn test_exactly_one_flag_per_error() {
        for err in all_variants() {
            assert_eq!(err.flags().count(), 1, "{err:?}");
        }
    }

    #[test]
    fn test_flags_serialize_every_field() {
        let flags = CheckError::ServerError { status: 500 }.flags();
        let json = serde_json::to_value(flags).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 9);
        assert_eq!(obj["serverError"], true);
        assert_eq!(obj["redirects"], false);
        assert_eq!(obj["badDns"], false);
        assert_eq!(obj["signatureVerificationFailed"], false);
    }

    #[test]
    fn test_redirect_flags() {
        let flags = CheckError::Redirect {
            status: 301,
            location: None,
        }
        .flags();
        assert!(flags.redirects);
        assert!(!flags.server_error);
    }

    #[test]
    fn test_display_missing_content_type() {
        let err = CheckError::BadContentType { content_type: None };
        assert_eq!(err.to_string(), "bad content-type: <missing>");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CheckError::ServerError { status: 404 }.exit_code(), 3);
        assert_eq!(
            CheckError::InvalidJson {
                reason: String::new()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            CheckError::Timeout {
                stage: Stage::Verify
            }
            .exit_code(),
            2
        );
    }
}
