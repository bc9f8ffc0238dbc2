use aasa_verify::{CheckConfig, CheckError, VerificationResult};

use crate::exit_codes;

use super::args::{Cli, Command, VerifierArgs};

pub mod check;
pub mod validate;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Check(args) => check::run(args).await,
        Command::Validate(args) => validate::run(args).await,
    }
}

/// Env-derived config with command line overrides applied.
pub(crate) fn config_from(verify: &VerifierArgs) -> CheckConfig {
    let mut config = CheckConfig::from_env();
    if let Some(backend) = verify.verifier {
        config = config.with_verifier(backend);
    }
    if let Some(program) = &verify.openssl {
        config = config.with_openssl_program(program.clone());
    }
    config
}

/// Print the outcome as JSON on stdout and pick the exit code.
pub(crate) fn report(
    outcome: Result<VerificationResult, CheckError>,
    pretty: bool,
) -> anyhow::Result<i32> {
    let (value, code) = match outcome {
        Ok(result) => {
            let code = if result.structurally_valid && result.identifier_found != Some(false) {
                exit_codes::SUCCESS
            } else {
                exit_codes::NOT_AUTHORIZED
            };
            (serde_json::to_value(&result)?, code)
        }
        Err(e) => (
            serde_json::json!({
                "error": e.flags(),
                "message": e.to_string(),
            }),
            e.exit_code(),
        ),
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{rendered}");
    Ok(code)
}
