//! Request, result and configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the manifest body was delivered, as classified from its content-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// `application/pkcs7-mime`: a signed envelope around the manifest.
    Envelope,
    /// `application/json` or `text/json`: plain manifest.
    Json,
}

/// Manifest bytes exactly as transported.
#[derive(Debug, Clone)]
pub struct FetchedManifest {
    /// Response body, byte for byte.
    pub body: Vec<u8>,

    /// Delivery classification.
    pub kind: ContentKind,

    /// Raw content-type header value.
    pub content_type: String,

    /// HTTP status.
    pub status: u16,
}

/// One domain check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    /// Domain, optionally with scheme and path (both are stripped).
    pub domain: String,

    /// Bundle identifier to look for (e.g. `com.foo.App`).
    #[serde(default)]
    pub bundle_identifier: Option<String>,

    /// Team identifier prefix. Only used together with `bundle_identifier`.
    #[serde(default)]
    pub team_identifier: Option<String>,

    /// Accept plain JSON manifests in addition to signed ones.
    #[serde(default)]
    pub allow_unencrypted: bool,
}

impl CheckRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    pub fn with_bundle_identifier(mut self, bundle_identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(bundle_identifier.into());
        self
    }

    pub fn with_team_identifier(mut self, team_identifier: impl Into<String>) -> Self {
        self.team_identifier = Some(team_identifier.into());
        self
    }

    pub fn with_allow_unencrypted(mut self, allow: bool) -> Self {
        self.allow_unencrypted = allow;
        self
    }
}

/// Outcome of a successful check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Whether the manifest arrived inside a signed envelope.
    pub encrypted: bool,

    /// Decoded manifest, as parsed.
    pub document: serde_json::Value,

    /// Whether the manifest has the required `applinks.details` shape.
    pub structurally_valid: bool,

    /// Whether the bundle identifier is authorized. Absent when no bundle
    /// identifier was given or the document is structurally invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_found: Option<bool>,
}

/// Envelope verification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifierBackend {
    /// In-memory PKCS#7 verification (requires the `openssl` feature).
    Native,
    /// External `openssl smime` invocation on a temp file.
    Command,
}

impl std::str::FromStr for VerifierBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "command" => Ok(Self::Command),
            other => Err(format!(
                "unknown verifier backend: {other} (expected native or command)"
            )),
        }
    }
}

/// Checker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Time bound for the external verifier, in seconds.
    #[serde(default = "default_timeout")]
    pub verifier_timeout_secs: u64,

    /// Envelope verification backend.
    #[serde(default = "default_verifier")]
    pub verifier: VerifierBackend,

    /// Program used by the command backend.
    #[serde(default = "default_openssl_program")]
    pub openssl_program: PathBuf,

    /// URL scheme for the manifest request. Only local test servers use `http`.
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_verifier() -> VerifierBackend {
    if cfg!(feature = "openssl") {
        VerifierBackend::Native
    } else {
        VerifierBackend::Command
    }
}

fn default_openssl_program() -> PathBuf {
    PathBuf::from("openssl")
}

fn default_scheme() -> String {
    "https".to_string()
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            verifier_timeout_secs: default_timeout(),
            verifier: default_verifier(),
            openssl_program: default_openssl_program(),
            scheme: default_scheme(),
        }
    }
}

impl CheckConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `AASA_TIMEOUT` | Request timeout in seconds |
    /// | `AASA_VERIFIER_TIMEOUT` | External verifier timeout in seconds |
    /// | `AASA_VERIFIER` | `native` or `command` |
    /// | `AASA_OPENSSL` | Program used by the command backend |
    ///
    /// Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            timeout_secs: std::env::var("AASA_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            verifier_timeout_secs: std::env::var("AASA_VERIFIER_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            verifier: std::env::var("AASA_VERIFIER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_verifier),
            openssl_program: std::env::var_os("AASA_OPENSSL")
                .map(PathBuf::from)
                .unwrap_or_else(default_openssl_program),
            scheme: default_scheme(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the external verifier timeout.
    pub fn with_verifier_timeout_secs(mut self, secs: u64) -> Self {
        self.verifier_timeout_secs = secs;
        self
    }

    /// Select the verification backend.
    pub fn with_verifier(mut self, verifier: VerifierBackend) -> Self {
        self.verifier = verifier;
        self
    }

    /// Set the program used by the command backend.
    pub fn with_openssl_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.openssl_program = program.into();
        self
    }

    /// Set the URL scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        std::env::remove_var("AASA_TIMEOUT");
        std::env::remove_var("AASA_VERIFIER_TIMEOUT");
        std::env::remove_var("AASA_VERIFIER");
        std::env::remove_var("AASA_OPENSSL");

        let config = CheckConfig::from_env();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.verifier_timeout_secs, 30);
        assert_eq!(config.openssl_program, PathBuf::from("openssl"));
        assert_eq!(config.scheme, "https");
    }

    #[test]
    #[serial]
    fn test_config_from_env_overrides() {
        std::env::set_var("AASA_TIMEOUT", "5");
        std::env::set_var("AASA_VERIFIER", "command");
        std::env::set_var("AASA_OPENSSL", "/usr/local/bin/openssl");

        let config = CheckConfig::from_env();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.verifier, VerifierBackend::Command);
        assert_eq!(
            config.openssl_program,
            PathBuf::from("/usr/local/bin/openssl")
        );

        std::env::remove_var("AASA_TIMEOUT");
        std::env::remove_var("AASA_VERIFIER");
        std::env::remove_var("AASA_OPENSSL");
    }

    #[test]
    fn test_config_builder() {
        let config = CheckConfig::default()
            .with_timeout_secs(3)
            .with_verifier(VerifierBackend::Command)
            .with_scheme("http");

        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.verifier, VerifierBackend::Command);
        assert_eq!(config.scheme, "http");
    }

    #[test]
    fn test_verifier_backend_from_str() {
        assert_eq!(
            "Native".parse::<VerifierBackend>().unwrap(),
            VerifierBackend::Native
        );
        assert!("gpg".parse::<VerifierBackend>().is_err());
    }

    #[test]
    fn test_result_omits_absent_identifier() {
        let result = VerificationResult {
            encrypted: false,
            document: serde_json::json!({}),
            structurally_valid: false,
            identifier_found: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("identifierFound").is_none());
        assert_eq!(json["structurallyValid"], false);
    }

    #[test]
    fn test_request_builder() {
        let req = CheckRequest::new("example.com")
            .with_bundle_identifier("com.foo.App")
            .with_team_identifier("TEAMID")
            .with_allow_unencrypted(true);
        assert_eq!(req.bundle_identifier.as_deref(), Some("com.foo.App"));
        assert_eq!(req.team_identifier.as_deref(), Some("TEAMID"));
        assert!(req.allow_unencrypted);
    }
}
