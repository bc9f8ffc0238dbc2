use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use aasa_verify::VerifierBackend;

#[derive(Parser)]
#[command(
    name = "aasa-check",
    version,
    about = "Check that a domain publishes a valid apple-app-site-association manifest"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch and verify a domain's manifest
    Check(CheckArgs),
    /// Verify and decode a manifest file, without network access
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct IdentifierArgs {
    /// Bundle identifier that must be authorized (e.g. com.example.App)
    #[arg(long)]
    pub bundle_id: Option<String>,

    /// Team identifier prefix of the app id
    #[arg(long, requires = "bundle_id")]
    pub team_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct VerifierArgs {
    /// Envelope verification backend (native or command)
    #[arg(long, env = "AASA_VERIFIER")]
    pub verifier: Option<VerifierBackend>,

    /// openssl binary for the command backend
    #[arg(long, env = "AASA_OPENSSL")]
    pub openssl: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Domain to check; scheme and path are ignored
    pub domain: String,

    #[command(flatten)]
    pub ids: IdentifierArgs,

    /// Accept unsigned application/json manifests
    #[arg(long)]
    pub allow_unencrypted: bool,

    /// Request timeout in seconds
    #[arg(long, env = "AASA_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    #[command(flatten)]
    pub verify: VerifierArgs,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Manifest file (raw JSON, or DER envelope with --signed)
    pub file: PathBuf,

    /// File is a signed PKCS#7 envelope
    #[arg(long)]
    pub signed: bool,

    #[command(flatten)]
    pub ids: IdentifierArgs,

    #[command(flatten)]
    pub verify: VerifierArgs,
}
