//! Envelope verification through an external `openssl smime` process.
//!
//! The tool reads the envelope from disk, so the bytes go to a uniquely named
//! temp file that is removed once the process has finished. Early returns
//! remove it through `Drop`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{EnvelopeError, EnvelopeVerifier};

const TEMP_PREFIX: &str = "aasa-envelope-";

/// Runs `<program> smime -verify -inform DER -noverify -in <file>`.
#[derive(Debug, Clone)]
pub struct SmimeCommandVerifier {
    program: PathBuf,
    timeout: Duration,
}

impl SmimeCommandVerifier {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn run(&self, input: &Path) -> Result<Vec<u8>, EnvelopeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["smime", "-verify", "-inform", "DER", "-noverify", "-in"])
            .arg(input)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(output) => output?,
            Err(_) => {
                warn!(
                    program = %self.program.display(),
                    timeout_secs = self.timeout.as_secs(),
                    "envelope verifier timed out"
                );
                return Err(EnvelopeError::Timeout);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(status = %output.status, stderr = %stderr.trim(), "envelope rejected");
            return Err(EnvelopeError::Verification(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

impl Default for SmimeCommandVerifier {
    fn default() -> Self {
        Self::new("openssl", Duration::from_secs(30))
    }
}

#[async_trait]
impl EnvelopeVerifier for SmimeCommandVerifier {
    async fn verify_envelope(&self, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".der")
            .tempfile()?;
        file.write_all(envelope)?;
        file.flush()?;

        let path = file.path().to_path_buf();
        debug!(path = %path.display(), bytes = envelope.len(), "verifying envelope via external tool");

        let result = self.run(&path).await;

        // Removal failure never changes the verification outcome.
        if let Err(e) = file.close() {
            warn!(path = %path.display(), error = %e, "failed to remove temporary envelope file");
        }

        result
    }
}
