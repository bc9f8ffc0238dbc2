use anyhow::Context;

use aasa_verify::{decode_manifest, verifier_for, verify_and_decode, CheckError};

use super::{config_from, report};
use crate::cli::args::ValidateArgs;

pub async fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let bundle = args.ids.bundle_id.as_deref();
    let team = args.ids.team_id.as_deref();

    let outcome = if args.signed {
        match verifier_for(&config_from(&args.verify)) {
            Ok(verifier) => verify_and_decode(verifier.as_ref(), &bytes, bundle, team).await,
            Err(e) => Err(e),
        }
    } else {
        decode_manifest(&bytes, bundle, team, false).map_err(|e| CheckError::InvalidJson {
            reason: e.to_string(),
        })
    };

    report(outcome, args.verify.pretty)
}
